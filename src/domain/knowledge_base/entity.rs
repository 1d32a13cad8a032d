//! Provisioning entities for knowledge bases and data sources

use serde::{Deserialize, Serialize};

/// Data source name used when the caller does not pick one
pub const DEFAULT_DATA_SOURCE_NAME: &str = "claims-eoc-datasource";

/// Description attached to data sources created with the default spec
pub const DEFAULT_DATA_SOURCE_DESCRIPTION: &str = "direct injection of claims eoc documents";

/// Summary record returned by the list-knowledge-bases operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseSummary {
    /// Opaque identifier assigned by the remote service
    pub knowledge_base_id: String,
    /// Human-readable name, unique per account by convention
    pub name: String,
}

/// Summary record returned by the list-data-sources operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSummary {
    /// Opaque identifier assigned by the remote service
    pub data_source_id: String,
    /// Human-readable name, unique within its knowledge base by convention
    pub name: String,
}

/// Everything needed to create a vector knowledge base.
///
/// All fields are passed through to the remote service uninspected; the
/// service performs its own validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseSpec {
    pub name: String,
    pub description: String,
    /// IAM role the service assumes for storage and model access
    pub role_arn: String,
    pub embedding_model_arn: String,
    /// OpenSearch Serverless collection backing the vector store
    pub collection_arn: String,
    pub vector_index_name: String,
}

/// Everything needed to create a custom data source within a knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceSpec {
    pub name: String,
    pub description: String,
}

impl DataSourceSpec {
    /// Create a spec with the given name and the default description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_DATA_SOURCE_DESCRIPTION.to_string(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for DataSourceSpec {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_SOURCE_NAME)
    }
}
