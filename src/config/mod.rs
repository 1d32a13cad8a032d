mod app_config;

pub use app_config::{
    AppConfig, AwsSettings, DataSourceSettings, KnowledgeBaseSettings, LogFormat, LoggingConfig,
};
