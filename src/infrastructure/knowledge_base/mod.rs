//! Control-plane implementations

mod aws;
mod in_memory;

pub use aws::AwsKnowledgeBaseControlPlane;
pub use in_memory::InMemoryKnowledgeBaseControlPlane;
