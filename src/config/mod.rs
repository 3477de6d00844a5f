//! Service configuration.
//!
//! Loaded from a TOML file with sane defaults for every field. Store
//! endpoint and credentials can be overridden through the environment
//! (`PLATEPICK_STORE_URI`, `PLATEPICK_STORE_USER`, `PLATEPICK_STORE_PASSWORD`,
//! `PLATEPICK_STORE_BACKEND`) so secrets never live in files or source.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const ENV_STORE_URI: &str = "PLATEPICK_STORE_URI";
pub const ENV_STORE_USER: &str = "PLATEPICK_STORE_USER";
pub const ENV_STORE_PASSWORD: &str = "PLATEPICK_STORE_PASSWORD";
pub const ENV_STORE_BACKEND: &str = "PLATEPICK_STORE_BACKEND";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Gateway-side bound on request handling, propagated as cancellation
    /// to the in-flight store transaction.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Neo4j over Bolt.
    Bolt,
    /// In-process store for development and tests.
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub user: String,
    /// Empty by default; supply via PLATEPICK_STORE_PASSWORD.
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Bolt,
            uri: "neo4j://127.0.0.1:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(uri) = env::var(ENV_STORE_URI) {
            self.store.uri = uri;
        }
        if let Ok(user) = env::var(ENV_STORE_USER) {
            self.store.user = user;
        }
        if let Ok(password) = env::var(ENV_STORE_PASSWORD) {
            self.store.password = password;
        }
        if let Ok(backend) = env::var(ENV_STORE_BACKEND) {
            match backend.to_lowercase().as_str() {
                "bolt" => self.store.backend = StoreBackend::Bolt,
                "memory" => self.store.backend = StoreBackend::Memory,
                other => tracing::warn!(backend = other, "unknown store backend, keeping configured value"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_no_secrets() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Bolt);
        assert!(config.store.password.is_empty());
    }

    #[test]
    fn load_round_trip() {
        let mut temp_file = NamedTempFile::new().expect("failed to create temporary file");
        let toml_content = r#"
            [server]
            host = "0.0.0.0"
            port = 5000
            request_timeout_secs = 10

            [store]
            backend = "memory"
            uri = "neo4j://graph:7687"
            user = "svc"
            password = ""
        "#;
        temp_file
            .write_all(toml_content.as_bytes())
            .expect("failed to write config");

        let config = Config::load(temp_file.path()).expect("failed to load config");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[server]\nhost = \"0.0.0.0\"\nport = 9000\nrequest_timeout_secs = 5\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.backend, StoreBackend::Bolt);
    }

    #[test]
    fn environment_overrides_store_credentials() {
        env::set_var(ENV_STORE_URI, "neo4j://override:7687");
        env::set_var(ENV_STORE_PASSWORD, "from-env");

        let mut config = Config::default();
        config.apply_env_overrides();

        env::remove_var(ENV_STORE_URI);
        env::remove_var(ENV_STORE_PASSWORD);

        assert_eq!(config.store.uri, "neo4j://override:7687");
        assert_eq!(config.store.password, "from-env");
    }
}
