//! Idempotent provisioning of knowledge bases and data sources

use std::sync::Arc;

use crate::domain::knowledge_base::{DataSourceSpec, KnowledgeBaseControlPlane, KnowledgeBaseSpec};
use crate::domain::DomainError;

/// Get-or-create provisioning keyed by human-readable name.
///
/// Both operations are a single check-then-act against the remote service
/// and provide no protection against concurrent callers racing on the same
/// name; callers serialize invocations.
pub struct ProvisioningService {
    control_plane: Arc<dyn KnowledgeBaseControlPlane>,
}

impl std::fmt::Debug for ProvisioningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningService").finish()
    }
}

impl ProvisioningService {
    /// Create a new ProvisioningService over the given control plane
    pub fn new(control_plane: Arc<dyn KnowledgeBaseControlPlane>) -> Self {
        Self { control_plane }
    }

    /// Return the identifier of the knowledge base named in the spec,
    /// creating it if absent.
    ///
    /// Matching is by exact name only, case-sensitive. An existing knowledge
    /// base with the same name but a different configuration is reused
    /// as-is.
    pub async fn ensure_knowledge_base(
        &self,
        spec: &KnowledgeBaseSpec,
    ) -> Result<String, DomainError> {
        let existing = self.control_plane.list_knowledge_bases().await?;

        if let Some(kb) = existing.iter().find(|kb| kb.name == spec.name) {
            tracing::info!(
                name = %spec.name,
                knowledge_base_id = %kb.knowledge_base_id,
                "Knowledge base already exists, reusing"
            );
            return Ok(kb.knowledge_base_id.clone());
        }

        tracing::info!(name = %spec.name, "Creating new knowledge base");

        match self.control_plane.create_knowledge_base(spec).await {
            Ok(knowledge_base_id) => {
                tracing::info!(
                    name = %spec.name,
                    knowledge_base_id = %knowledge_base_id,
                    "Knowledge base created"
                );
                Ok(knowledge_base_id)
            }
            Err(e) => {
                tracing::error!(name = %spec.name, error = %e, "Failed to create knowledge base");
                Err(e)
            }
        }
    }

    /// Return the identifier of the data source named in the spec within the
    /// given knowledge base, creating it if absent.
    ///
    /// Same name-only matching as [`Self::ensure_knowledge_base`], scoped to
    /// the knowledge base.
    pub async fn ensure_data_source(
        &self,
        knowledge_base_id: &str,
        spec: &DataSourceSpec,
    ) -> Result<String, DomainError> {
        let existing = self.control_plane.list_data_sources(knowledge_base_id).await?;

        if let Some(ds) = existing.iter().find(|ds| ds.name == spec.name) {
            tracing::info!(
                name = %spec.name,
                data_source_id = %ds.data_source_id,
                "Data source already exists, reusing"
            );
            return Ok(ds.data_source_id.clone());
        }

        tracing::info!(
            name = %spec.name,
            knowledge_base_id = %knowledge_base_id,
            "Creating new data source"
        );

        match self
            .control_plane
            .create_data_source(knowledge_base_id, spec)
            .await
        {
            Ok(data_source_id) => {
                tracing::info!(
                    name = %spec.name,
                    data_source_id = %data_source_id,
                    "Data source created"
                );
                Ok(data_source_id)
            }
            Err(e) => {
                tracing::error!(name = %spec.name, error = %e, "Failed to create data source");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge_base::{
        DataSourceSummary, KnowledgeBaseSummary, MockKnowledgeBaseControlPlane,
        DEFAULT_DATA_SOURCE_NAME,
    };
    use crate::infrastructure::knowledge_base::InMemoryKnowledgeBaseControlPlane;

    fn sample_spec(name: &str) -> KnowledgeBaseSpec {
        KnowledgeBaseSpec {
            name: name.to_string(),
            description: "Knowledge base for claims EOC documents".to_string(),
            role_arn: "arn:aws:iam::123456789012:role/kb-role".to_string(),
            embedding_model_arn: "arn:aws:bedrock:us-east-1::foundation-model/amazon.titan-embed-text-v2:0".to_string(),
            collection_arn: "arn:aws:aoss:us-east-1:123456789012:collection/abc".to_string(),
            vector_index_name: "claims-eoc-index".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_creates_when_absent() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_knowledge_bases()
            .times(1)
            .returning(|| Ok(Vec::new()));
        mock.expect_create_knowledge_base()
            .withf(|spec| spec.name == "claims-kb")
            .times(1)
            .returning(|_| Ok("KB123".to_string()));

        let service = ProvisioningService::new(Arc::new(mock));
        let id = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        assert_eq!(id, "KB123");
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_reuses_existing() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_knowledge_bases().times(1).returning(|| {
            Ok(vec![
                KnowledgeBaseSummary {
                    knowledge_base_id: "KBOTHER".to_string(),
                    name: "other-kb".to_string(),
                },
                KnowledgeBaseSummary {
                    knowledge_base_id: "KBEXIST".to_string(),
                    name: "claims-kb".to_string(),
                },
            ])
        });
        mock.expect_create_knowledge_base().times(0);

        let service = ProvisioningService::new(Arc::new(mock));
        let id = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        assert_eq!(id, "KBEXIST");
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_name_match_is_case_sensitive() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_knowledge_bases().times(1).returning(|| {
            Ok(vec![KnowledgeBaseSummary {
                knowledge_base_id: "KBUPPER".to_string(),
                name: "Claims-KB".to_string(),
            }])
        });
        mock.expect_create_knowledge_base()
            .times(1)
            .returning(|_| Ok("KBNEW".to_string()));

        let service = ProvisioningService::new(Arc::new(mock));
        let id = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        assert_eq!(id, "KBNEW");
    }

    #[tokio::test]
    async fn test_knowledge_bases_with_distinct_names_resolve_independently() {
        let control_plane = Arc::new(InMemoryKnowledgeBaseControlPlane::new());
        let service = ProvisioningService::new(control_plane);

        // Identical specs apart from the name
        let id_a = service
            .ensure_knowledge_base(&sample_spec("kb-a"))
            .await
            .unwrap();
        let id_b = service
            .ensure_knowledge_base(&sample_spec("kb-b"))
            .await
            .unwrap();

        assert_ne!(id_a, id_b);
        assert_eq!(
            service.ensure_knowledge_base(&sample_spec("kb-a")).await.unwrap(),
            id_a
        );
        assert_eq!(
            service.ensure_knowledge_base(&sample_spec("kb-b")).await.unwrap(),
            id_b
        );
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_is_idempotent() {
        let control_plane = Arc::new(InMemoryKnowledgeBaseControlPlane::new());
        let service = ProvisioningService::new(control_plane.clone());

        let first = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();
        let second = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(control_plane.list_knowledge_bases().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_create_error_propagates() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_knowledge_bases()
            .times(1)
            .returning(|| Ok(Vec::new()));
        mock.expect_create_knowledge_base()
            .times(1)
            .returning(|_| Err(DomainError::provider("bedrock_agent", "access denied")));

        let service = ProvisioningService::new(Arc::new(mock));
        let result = service.ensure_knowledge_base(&sample_spec("claims-kb")).await;

        assert!(matches!(
            result,
            Err(DomainError::Provider {
                provider: _,
                message: _
            })
        ));
    }

    #[tokio::test]
    async fn test_ensure_knowledge_base_list_error_propagates() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_knowledge_bases()
            .times(1)
            .returning(|| Err(DomainError::provider("bedrock_agent", "throttled")));
        mock.expect_create_knowledge_base().times(0);

        let service = ProvisioningService::new(Arc::new(mock));
        let result = service.ensure_knowledge_base(&sample_spec("claims-kb")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ensure_data_source_creates_with_default_name() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_data_sources()
            .withf(|kb_id| kb_id == "KB123")
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mock.expect_create_data_source()
            .withf(|kb_id, spec| kb_id == "KB123" && spec.name == DEFAULT_DATA_SOURCE_NAME)
            .times(1)
            .returning(|_, _| Ok("DS123".to_string()));

        let service = ProvisioningService::new(Arc::new(mock));
        let id = service
            .ensure_data_source("KB123", &DataSourceSpec::default())
            .await
            .unwrap();

        assert_eq!(id, "DS123");
    }

    #[tokio::test]
    async fn test_ensure_data_source_reuses_existing() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_data_sources().times(1).returning(|_| {
            Ok(vec![DataSourceSummary {
                data_source_id: "DSEXIST".to_string(),
                name: "claims-eoc-datasource".to_string(),
            }])
        });
        mock.expect_create_data_source().times(0);

        let service = ProvisioningService::new(Arc::new(mock));
        let id = service
            .ensure_data_source("KB123", &DataSourceSpec::default())
            .await
            .unwrap();

        assert_eq!(id, "DSEXIST");
    }

    #[tokio::test]
    async fn test_ensure_data_source_create_error_propagates() {
        let mut mock = MockKnowledgeBaseControlPlane::new();
        mock.expect_list_data_sources()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mock.expect_create_data_source()
            .times(1)
            .returning(|_, _| Err(DomainError::provider("bedrock_agent", "access denied")));

        let service = ProvisioningService::new(Arc::new(mock));
        let result = service
            .ensure_data_source("KB123", &DataSourceSpec::default())
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Provider {
                provider: _,
                message: _
            })
        ));
    }

    #[tokio::test]
    async fn test_ensure_data_source_is_idempotent() {
        let control_plane = Arc::new(InMemoryKnowledgeBaseControlPlane::new());
        let service = ProvisioningService::new(control_plane.clone());

        let kb_id = service
            .ensure_knowledge_base(&sample_spec("claims-kb"))
            .await
            .unwrap();

        let first = service
            .ensure_data_source(&kb_id, &DataSourceSpec::default())
            .await
            .unwrap();
        let second = service
            .ensure_data_source(&kb_id, &DataSourceSpec::default())
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(control_plane.list_data_sources(&kb_id).await.unwrap().len(), 1);
    }
}
