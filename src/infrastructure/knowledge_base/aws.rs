//! AWS Bedrock Agent control-plane implementation

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockagent::types::{
    BedrockEmbeddingModelConfiguration, ChunkingConfiguration, ChunkingStrategy,
    DataSourceConfiguration, DataSourceType, EmbeddingModelConfiguration,
    HierarchicalChunkingConfiguration, HierarchicalChunkingLevelConfiguration,
    KnowledgeBaseConfiguration, KnowledgeBaseStorageType, KnowledgeBaseType,
    OpenSearchServerlessConfiguration, OpenSearchServerlessFieldMapping, ParsingConfiguration,
    ParsingStrategy, StorageConfiguration, VectorIngestionConfiguration,
    VectorKnowledgeBaseConfiguration,
};
use aws_sdk_bedrockagent::Client as BedrockAgentClient;

use crate::domain::knowledge_base::{
    DataSourceSpec, DataSourceSummary, KnowledgeBaseControlPlane, KnowledgeBaseSpec,
    KnowledgeBaseSummary,
};
use crate::domain::DomainError;

const PROVIDER: &str = "bedrock_agent";

/// Embedding vector width expected by the vector index
const EMBEDDING_DIMENSIONS: i32 = 1024;

/// Field mapping of the OpenSearch Serverless vector index
const METADATA_FIELD: &str = "text-metadata";
const TEXT_FIELD: &str = "text";
const VECTOR_FIELD: &str = "vector";

/// Hierarchical chunking: parent and child chunk sizes, shared overlap
const PARENT_CHUNK_MAX_TOKENS: i32 = 1500;
const CHILD_CHUNK_MAX_TOKENS: i32 = 300;
const CHUNK_OVERLAP_TOKENS: i32 = 60;

/// Control plane backed by the Bedrock Agent API
pub struct AwsKnowledgeBaseControlPlane {
    client: BedrockAgentClient,
}

impl Debug for AwsKnowledgeBaseControlPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKnowledgeBaseControlPlane").finish()
    }
}

impl AwsKnowledgeBaseControlPlane {
    /// Create a control plane from default AWS credentials, with an optional
    /// region override
    pub async fn new(region: Option<String>) -> Self {
        let aws_config = if let Some(region) = region {
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(region))
                .load()
                .await
        } else {
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .load()
                .await
        };

        Self::with_config(&aws_config)
    }

    /// Create with an existing AWS SDK config
    pub fn with_config(aws_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: BedrockAgentClient::new(aws_config),
        }
    }

    fn knowledge_base_configuration(
        spec: &KnowledgeBaseSpec,
    ) -> Result<KnowledgeBaseConfiguration, DomainError> {
        let embedding_model_configuration = EmbeddingModelConfiguration::builder()
            .bedrock_embedding_model_configuration(
                BedrockEmbeddingModelConfiguration::builder()
                    .dimensions(EMBEDDING_DIMENSIONS)
                    .build(),
            )
            .build();

        let vector_configuration = VectorKnowledgeBaseConfiguration::builder()
            .embedding_model_arn(&spec.embedding_model_arn)
            .embedding_model_configuration(embedding_model_configuration)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build vector knowledge base configuration: {}",
                    e
                ))
            })?;

        KnowledgeBaseConfiguration::builder()
            .r#type(KnowledgeBaseType::Vector)
            .vector_knowledge_base_configuration(vector_configuration)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build knowledge base configuration: {}",
                    e
                ))
            })
    }

    fn storage_configuration(
        spec: &KnowledgeBaseSpec,
    ) -> Result<StorageConfiguration, DomainError> {
        let field_mapping = OpenSearchServerlessFieldMapping::builder()
            .metadata_field(METADATA_FIELD)
            .text_field(TEXT_FIELD)
            .vector_field(VECTOR_FIELD)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build field mapping: {}", e))
            })?;

        let opensearch_configuration = OpenSearchServerlessConfiguration::builder()
            .collection_arn(&spec.collection_arn)
            .vector_index_name(&spec.vector_index_name)
            .field_mapping(field_mapping)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build OpenSearch Serverless configuration: {}",
                    e
                ))
            })?;

        StorageConfiguration::builder()
            .r#type(KnowledgeBaseStorageType::OpensearchServerless)
            .opensearch_serverless_configuration(opensearch_configuration)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build storage configuration: {}", e))
            })
    }

    fn vector_ingestion_configuration() -> Result<VectorIngestionConfiguration, DomainError> {
        let hierarchical_configuration = HierarchicalChunkingConfiguration::builder()
            .level_configurations(
                HierarchicalChunkingLevelConfiguration::builder()
                    .max_tokens(PARENT_CHUNK_MAX_TOKENS)
                    .build()
                    .map_err(|e| {
                        DomainError::configuration(format!(
                            "Failed to build chunking level configuration: {}",
                            e
                        ))
                    })?,
            )
            .level_configurations(
                HierarchicalChunkingLevelConfiguration::builder()
                    .max_tokens(CHILD_CHUNK_MAX_TOKENS)
                    .build()
                    .map_err(|e| {
                        DomainError::configuration(format!(
                            "Failed to build chunking level configuration: {}",
                            e
                        ))
                    })?,
            )
            .overlap_tokens(CHUNK_OVERLAP_TOKENS)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build hierarchical chunking configuration: {}",
                    e
                ))
            })?;

        let chunking_configuration = ChunkingConfiguration::builder()
            .chunking_strategy(ChunkingStrategy::Hierarchical)
            .hierarchical_chunking_configuration(hierarchical_configuration)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build chunking configuration: {}",
                    e
                ))
            })?;

        let parsing_configuration = ParsingConfiguration::builder()
            .parsing_strategy(ParsingStrategy::BedrockDataAutomation)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build parsing configuration: {}", e))
            })?;

        Ok(VectorIngestionConfiguration::builder()
            .chunking_configuration(chunking_configuration)
            .parsing_configuration(parsing_configuration)
            .build())
    }
}

#[async_trait]
impl KnowledgeBaseControlPlane for AwsKnowledgeBaseControlPlane {
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBaseSummary>, DomainError> {
        let mut items = self
            .client
            .list_knowledge_bases()
            .into_paginator()
            .items()
            .send();

        let mut summaries = Vec::new();

        while let Some(item) = items.next().await {
            let summary = item.map_err(|e| {
                DomainError::provider(PROVIDER, format!("Failed to list knowledge bases: {}", e))
            })?;

            summaries.push(KnowledgeBaseSummary {
                knowledge_base_id: summary.knowledge_base_id().to_string(),
                name: summary.name().to_string(),
            });
        }

        Ok(summaries)
    }

    async fn create_knowledge_base(
        &self,
        spec: &KnowledgeBaseSpec,
    ) -> Result<String, DomainError> {
        let knowledge_base_configuration = Self::knowledge_base_configuration(spec)?;
        let storage_configuration = Self::storage_configuration(spec)?;

        let response = self
            .client
            .create_knowledge_base()
            .name(&spec.name)
            .description(&spec.description)
            .role_arn(&spec.role_arn)
            .knowledge_base_configuration(knowledge_base_configuration)
            .storage_configuration(storage_configuration)
            .send()
            .await
            .map_err(|e| {
                DomainError::provider(
                    PROVIDER,
                    format!("Failed to create knowledge base '{}': {}", spec.name, e),
                )
            })?;

        response
            .knowledge_base()
            .map(|kb| kb.knowledge_base_id().to_string())
            .ok_or_else(|| {
                DomainError::knowledge_base(format!(
                    "Create response for '{}' is missing the knowledge base",
                    spec.name
                ))
            })
    }

    async fn list_data_sources(
        &self,
        knowledge_base_id: &str,
    ) -> Result<Vec<DataSourceSummary>, DomainError> {
        let mut items = self
            .client
            .list_data_sources()
            .knowledge_base_id(knowledge_base_id)
            .into_paginator()
            .items()
            .send();

        let mut summaries = Vec::new();

        while let Some(item) = items.next().await {
            let summary = item.map_err(|e| {
                DomainError::provider(
                    PROVIDER,
                    format!(
                        "Failed to list data sources for knowledge base '{}': {}",
                        knowledge_base_id, e
                    ),
                )
            })?;

            summaries.push(DataSourceSummary {
                data_source_id: summary.data_source_id().to_string(),
                name: summary.name().to_string(),
            });
        }

        Ok(summaries)
    }

    async fn create_data_source(
        &self,
        knowledge_base_id: &str,
        spec: &DataSourceSpec,
    ) -> Result<String, DomainError> {
        let data_source_configuration = DataSourceConfiguration::builder()
            .r#type(DataSourceType::Custom)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!(
                    "Failed to build data source configuration: {}",
                    e
                ))
            })?;

        let response = self
            .client
            .create_data_source()
            .knowledge_base_id(knowledge_base_id)
            .name(&spec.name)
            .description(&spec.description)
            .data_source_configuration(data_source_configuration)
            .vector_ingestion_configuration(Self::vector_ingestion_configuration()?)
            .send()
            .await
            .map_err(|e| {
                DomainError::provider(
                    PROVIDER,
                    format!("Failed to create data source '{}': {}", spec.name, e),
                )
            })?;

        response
            .data_source()
            .map(|ds| ds.data_source_id().to_string())
            .ok_or_else(|| {
                DomainError::data_source(format!(
                    "Create response for '{}' is missing the data source",
                    spec.name
                ))
            })
    }
}
