//! Application configuration
//!
//! Split into focused sub-modules by concern:
//! - `server`: HTTP server settings
//! - `storage`: cache backend selection and TTL
//! - `sources`: vendor document probing and the KEV feed
//!
//! Inference settings come from `ai_core` so the client crate owns its own
//! config shape.

mod server;
mod sources;
mod storage;

use ai_core::InferenceConfig;
use serde::{Deserialize, Serialize};

pub use server::ServerConfig;
pub use sources::SourceSettings;
pub use storage::StorageSettings;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Assessment cache configuration
    #[serde(default)]
    pub storage: StorageSettings,

    /// Evidence gathering configuration
    #[serde(default)]
    pub sources: SourceSettings,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// A missing `config.toml` is fine; defaults apply and environment
    /// variables (e.g. `SOFTVET_SERVER_PORT`) override both.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SOFTVET")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_complete() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.inference.model, "gemini-2.0-flash");
        assert!(!config.storage.use_remote);
        assert_eq!(config.storage.ttl_days, 7);
        assert!(config.sources.kev_url.contains("cisa.gov"));
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.ttl_days, 7);
    }

    #[test]
    fn toml_sections_override_defaults() {
        let toml = r#"
            [server]
            port = 9090

            [storage]
            use_remote = true
            bucket = "assessments"
            ttl_days = 14

            [inference]
            api_key = "test-key"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.storage.use_remote);
        assert_eq!(config.storage.bucket.as_deref(), Some("assessments"));
        assert_eq!(config.storage.ttl_days, 14);
        assert_eq!(config.inference.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server.port, config.server.port);
        assert_eq!(back.storage.local_dir, config.storage.local_dir);
    }
}
