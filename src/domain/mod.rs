//! Domain layer - Core entities and the remote-service boundary

pub mod document;
pub mod error;
pub mod knowledge_base;

pub use document::{AttributeValue, DocumentDescriptor, InlineAttribute};
pub use error::DomainError;
pub use knowledge_base::{
    DataSourceSpec, DataSourceSummary, KnowledgeBaseControlPlane, KnowledgeBaseSpec,
    KnowledgeBaseSummary, DEFAULT_DATA_SOURCE_NAME,
};
