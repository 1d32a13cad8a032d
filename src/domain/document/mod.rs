//! Document descriptors for custom data source ingestion

mod descriptor;

pub use descriptor::{
    AttributeValue, AttributeValueType, CustomContent, DocumentContent, DocumentContentType,
    DocumentDescriptor, DocumentIdentifier, DocumentMetadata, InlineAttribute, MetadataType,
    S3Location, SourceType,
};
