//! In-memory control plane for development and testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::knowledge_base::{
    DataSourceSpec, DataSourceSummary, KnowledgeBaseControlPlane, KnowledgeBaseSpec,
    KnowledgeBaseSummary,
};
use crate::domain::DomainError;

/// In-memory control plane for development without AWS access.
///
/// Mirrors the remote contract, including its lack of a uniqueness guarantee:
/// creating the same name twice yields two resources.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeBaseControlPlane {
    state: Arc<RwLock<Vec<KnowledgeBaseRecord>>>,
}

#[derive(Debug, Clone)]
struct KnowledgeBaseRecord {
    knowledge_base_id: String,
    name: String,
    data_sources: Vec<DataSourceSummary>,
}

impl InMemoryKnowledgeBaseControlPlane {
    /// Create an empty control plane
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeBaseControlPlane for InMemoryKnowledgeBaseControlPlane {
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBaseSummary>, DomainError> {
        let records = self.state.read().await;

        Ok(records
            .iter()
            .map(|record| KnowledgeBaseSummary {
                knowledge_base_id: record.knowledge_base_id.clone(),
                name: record.name.clone(),
            })
            .collect())
    }

    async fn create_knowledge_base(
        &self,
        spec: &KnowledgeBaseSpec,
    ) -> Result<String, DomainError> {
        let mut records = self.state.write().await;
        let knowledge_base_id = format!("kb-{}", Uuid::new_v4().simple());

        records.push(KnowledgeBaseRecord {
            knowledge_base_id: knowledge_base_id.clone(),
            name: spec.name.clone(),
            data_sources: Vec::new(),
        });

        Ok(knowledge_base_id)
    }

    async fn list_data_sources(
        &self,
        knowledge_base_id: &str,
    ) -> Result<Vec<DataSourceSummary>, DomainError> {
        let records = self.state.read().await;

        let record = records
            .iter()
            .find(|record| record.knowledge_base_id == knowledge_base_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Knowledge base '{}' not found",
                    knowledge_base_id
                ))
            })?;

        Ok(record.data_sources.clone())
    }

    async fn create_data_source(
        &self,
        knowledge_base_id: &str,
        spec: &DataSourceSpec,
    ) -> Result<String, DomainError> {
        let mut records = self.state.write().await;

        let record = records
            .iter_mut()
            .find(|record| record.knowledge_base_id == knowledge_base_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Knowledge base '{}' not found",
                    knowledge_base_id
                ))
            })?;

        let data_source_id = format!("ds-{}", Uuid::new_v4().simple());

        record.data_sources.push(DataSourceSummary {
            data_source_id: data_source_id.clone(),
            name: spec.name.clone(),
        });

        Ok(data_source_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec(name: &str) -> KnowledgeBaseSpec {
        KnowledgeBaseSpec {
            name: name.to_string(),
            description: "test knowledge base".to_string(),
            role_arn: "arn:aws:iam::123456789012:role/kb-role".to_string(),
            embedding_model_arn: "arn:aws:bedrock:us-east-1::foundation-model/amazon.titan-embed-text-v2:0".to_string(),
            collection_arn: "arn:aws:aoss:us-east-1:123456789012:collection/abc".to_string(),
            vector_index_name: "claims-eoc-index".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_knowledge_bases() {
        let control_plane = InMemoryKnowledgeBaseControlPlane::new();

        let id = control_plane
            .create_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        let listed = control_plane.list_knowledge_bases().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].knowledge_base_id, id);
        assert_eq!(listed[0].name, "claims-kb");
    }

    #[tokio::test]
    async fn test_duplicate_names_yield_distinct_resources() {
        let control_plane = InMemoryKnowledgeBaseControlPlane::new();

        let first = control_plane
            .create_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();
        let second = control_plane
            .create_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(control_plane.list_knowledge_bases().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_data_sources_scoped_to_knowledge_base() {
        let control_plane = InMemoryKnowledgeBaseControlPlane::new();

        let kb_a = control_plane
            .create_knowledge_base(&sample_spec("kb-a"))
            .await
            .unwrap();
        let kb_b = control_plane
            .create_knowledge_base(&sample_spec("kb-b"))
            .await
            .unwrap();

        control_plane
            .create_data_source(&kb_a, &DataSourceSpec::default())
            .await
            .unwrap();

        assert_eq!(control_plane.list_data_sources(&kb_a).await.unwrap().len(), 1);
        assert!(control_plane.list_data_sources(&kb_b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_data_sources_unknown_knowledge_base() {
        let control_plane = InMemoryKnowledgeBaseControlPlane::new();

        let result = control_plane.list_data_sources("kb-missing").await;
        assert!(matches!(result, Err(DomainError::NotFound { message: _ })));
    }
}
