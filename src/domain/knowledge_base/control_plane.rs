//! Control-plane trait for the managed knowledge base service

use async_trait::async_trait;

use super::entity::{DataSourceSpec, DataSourceSummary, KnowledgeBaseSpec, KnowledgeBaseSummary};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Remote create/list surface for knowledge bases and their data sources.
///
/// Every method is a single blocking remote call; there is no local state.
/// Implementations own the payload construction for their backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KnowledgeBaseControlPlane: Send + Sync {
    /// Lists all knowledge bases visible to the caller
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBaseSummary>, DomainError>;

    /// Creates a knowledge base and returns its identifier
    async fn create_knowledge_base(
        &self,
        spec: &KnowledgeBaseSpec,
    ) -> Result<String, DomainError>;

    /// Lists all data sources belonging to the given knowledge base
    async fn list_data_sources(
        &self,
        knowledge_base_id: &str,
    ) -> Result<Vec<DataSourceSummary>, DomainError>;

    /// Creates a data source within the given knowledge base and returns its
    /// identifier
    async fn create_data_source(
        &self,
        knowledge_base_id: &str,
        spec: &DataSourceSpec,
    ) -> Result<String, DomainError>;
}
