use std::time::Duration;

use serde::Deserialize;

fn default_db_name() -> String {
    "workflow_approval".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_query_timeout_secs() -> u64 {
    10
}

fn default_ping_timeout_secs() -> u64 {
    5
}

/// Server configuration.
///
/// Read once at startup from an optional `config/default` file and then from
/// environment variables (`MONGODB_URI`, `DB_NAME`, `PORT`, ...), which win.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// MongoDB connection string. Required.
    pub mongodb_uri: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Single origin allowed by the CORS layer.
    #[serde(default = "default_cors_allowed_origin")]
    pub cors_allowed_origin: String,
    /// Deadline for find / update / insert / delete.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
    /// Deadline for connectivity checks.
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }

    /// Database name plus host part of the URI, without credentials.
    pub fn redacted_target(&self) -> String {
        let host = self
            .mongodb_uri
            .rsplit_once('@')
            .map(|(_, rest)| rest)
            .or_else(|| self.mongodb_uri.split_once("://").map(|(_, rest)| rest))
            .unwrap_or(&self.mongodb_uri);
        let host = host.split(['/', '?']).next().unwrap_or_default();
        format!("{host}/{}", self.db_name)
    }
}
