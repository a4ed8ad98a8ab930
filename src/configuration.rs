use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Admin API the questions are fetched from.
#[derive(Deserialize, Debug)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub questions_path: String,
    #[serde(default)]
    pub token: Option<SecretString>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_seconds: Option<u64>,
}

// defaults < configuration/base.yaml < APP_* environment
pub fn get_configuration(config_dir: &Path) -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("upstream.base_url", "http://localhost:8000")?
        .set_default("upstream.questions_path", "/admin/question-check")?
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
