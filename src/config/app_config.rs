use serde::Deserialize;

use crate::domain::knowledge_base::{
    DataSourceSpec, KnowledgeBaseSpec, DEFAULT_DATA_SOURCE_DESCRIPTION, DEFAULT_DATA_SOURCE_NAME,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub aws: AwsSettings,
    pub knowledge_base: KnowledgeBaseSettings,
    pub data_source: DataSourceSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AwsSettings {
    /// Region override; falls back to the ambient AWS configuration
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    pub name: String,
    pub description: String,
    pub role_arn: String,
    pub embedding_model_arn: String,
    pub collection_arn: String,
    pub vector_index_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            name: "claims-eoc-kb".to_string(),
            description: "Knowledge base for claims EOC documents".to_string(),
            role_arn: String::new(),
            embedding_model_arn: String::new(),
            collection_arn: String::new(),
            vector_index_name: "claims-eoc-index".to_string(),
        }
    }
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_DATA_SOURCE_NAME.to_string(),
            description: DEFAULT_DATA_SOURCE_DESCRIPTION.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl KnowledgeBaseSettings {
    /// Map the configured values into a creation spec
    pub fn to_spec(&self) -> KnowledgeBaseSpec {
        KnowledgeBaseSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            role_arn: self.role_arn.clone(),
            embedding_model_arn: self.embedding_model_arn.clone(),
            collection_arn: self.collection_arn.clone(),
            vector_index_name: self.vector_index_name.clone(),
        }
    }
}

impl DataSourceSettings {
    /// Map the configured values into a creation spec
    pub fn to_spec(&self) -> DataSourceSpec {
        DataSourceSpec::new(&self.name).with_description(&self.description)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
