//! Ingestion payload for documents injected into a custom data source
//!
//! The shape mirrors the managed service's custom-document contract: an
//! S3-backed content block plus inline metadata attributes attached directly
//! to the ingested document.

use serde::Serialize;

/// Payload describing a single document to ingest into a custom data source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    pub content: DocumentContent,
    pub metadata: DocumentMetadata,
}

impl DocumentDescriptor {
    /// Build the descriptor for a plan document stored in S3.
    ///
    /// The plan name is attached as a single inline string attribute keyed
    /// `plan_name` so it is queryable as document metadata after ingestion.
    pub fn new(
        document_id: impl Into<String>,
        plan_name: impl Into<String>,
        s3_uri: impl Into<String>,
    ) -> Self {
        Self {
            content: DocumentContent {
                custom: CustomContent {
                    custom_document_identifier: DocumentIdentifier {
                        id: document_id.into(),
                    },
                    s3_location: S3Location { uri: s3_uri.into() },
                    source_type: SourceType::S3Location,
                },
                data_source_type: DocumentContentType::Custom,
            },
            metadata: DocumentMetadata {
                inline_attributes: vec![InlineAttribute {
                    key: "plan_name".to_string(),
                    value: AttributeValue::string(plan_name),
                }],
                metadata_type: MetadataType::InLineAttribute,
            },
        }
    }

    /// Attach an additional inline attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.metadata.inline_attributes.push(InlineAttribute {
            key: key.into(),
            value,
        });
        self
    }
}

/// Content block of a document descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub custom: CustomContent,
    pub data_source_type: DocumentContentType,
}

/// Custom-source content: caller-assigned identifier plus S3 location
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomContent {
    pub custom_document_identifier: DocumentIdentifier,
    pub s3_location: S3Location,
    pub source_type: SourceType,
}

/// Caller-assigned document identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentIdentifier {
    pub id: String,
}

/// S3 object location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct S3Location {
    pub uri: String,
}

/// Where the custom content lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    S3Location,
}

/// Data source type the content belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentContentType {
    Custom,
}

/// Metadata block of a document descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub inline_attributes: Vec<InlineAttribute>,
    #[serde(rename = "type")]
    pub metadata_type: MetadataType,
}

/// How the metadata is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataType {
    InLineAttribute,
}

/// A single metadata key/value pair attached to the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineAttribute {
    pub key: String,
    pub value: AttributeValue,
}

/// Typed inline attribute value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(rename = "type")]
    pub value_type: AttributeValueType,
}

impl AttributeValue {
    /// String attribute value
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            number_value: None,
            boolean_value: None,
            value_type: AttributeValueType::String,
        }
    }

    /// Numeric attribute value
    pub fn number(value: f64) -> Self {
        Self {
            string_value: None,
            number_value: Some(value),
            boolean_value: None,
            value_type: AttributeValueType::Number,
        }
    }

    /// Boolean attribute value
    pub fn boolean(value: bool) -> Self {
        Self {
            string_value: None,
            number_value: None,
            boolean_value: Some(value),
            value_type: AttributeValueType::Boolean,
        }
    }
}

/// Wire type tag of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeValueType {
    String,
    Number,
    Boolean,
}
