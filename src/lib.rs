//! Bedrock Knowledge Base Provisioner
//!
//! A thin layer over the Amazon Bedrock Agent control plane:
//! - Idempotent get-or-create of knowledge bases, keyed by name
//! - Idempotent get-or-create of data sources within a knowledge base
//! - Descriptor payloads for documents injected into custom data sources
//!
//! All state lives in the remote service; this crate only builds request
//! payloads and resolves identifiers.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DataSourceSpec, DocumentDescriptor, DomainError, KnowledgeBaseSpec, DEFAULT_DATA_SOURCE_NAME,
};
pub use infrastructure::services::ProvisioningService;

use std::sync::Arc;

use infrastructure::knowledge_base::AwsKnowledgeBaseControlPlane;
use tracing::info;

/// Create a provisioning service from default configuration
pub async fn create_provisioning_service() -> anyhow::Result<ProvisioningService> {
    create_provisioning_service_with_config(&AppConfig::default()).await
}

/// Create a provisioning service with custom configuration
pub async fn create_provisioning_service_with_config(
    config: &AppConfig,
) -> anyhow::Result<ProvisioningService> {
    let control_plane = AwsKnowledgeBaseControlPlane::new(config.aws.region.clone()).await;

    info!(region = ?config.aws.region, "Bedrock Agent control plane initialized");

    Ok(ProvisioningService::new(Arc::new(control_plane)))
}
