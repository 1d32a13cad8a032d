//! Knowledge base domain - provisioning entities and the control-plane seam

mod control_plane;
mod entity;

pub use control_plane::KnowledgeBaseControlPlane;
pub use entity::{
    DataSourceSpec, DataSourceSummary, KnowledgeBaseSpec, KnowledgeBaseSummary,
    DEFAULT_DATA_SOURCE_DESCRIPTION, DEFAULT_DATA_SOURCE_NAME,
};

#[cfg(test)]
pub use control_plane::MockKnowledgeBaseControlPlane;
