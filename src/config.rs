use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::core::OFFER_ID_LENGTH;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    #[serde(default)]
    #[validate(nested)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Record store connection. Without a `url` records are kept in memory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: String,
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_session_ttl() -> u64 { 86_400 }
fn default_bcrypt_cost() -> u32 { bcrypt::DEFAULT_COST }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[serde(default = "default_offer_id_length")]
    #[validate(range(min = 1, max = 64))]
    pub offer_id_length: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            offer_id_length: default_offer_id_length(),
        }
    }
}

fn default_offer_id_length() -> usize { OFFER_ID_LENGTH }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOMEROUTE_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOMEROUTE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOMEROUTE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(apply_database_url(settings)?)
    }

    /// Deserialize and check a built configuration
    pub fn from_config(settings: Config) -> Result<Self, ConfigError> {
        let settings: Settings = settings.try_deserialize()?;

        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;

        Ok(settings)
    }
}

/// Let the conventional DATABASE_URL variable select the record store
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    fn build(toml: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [session]
        secret = "abc"
    "#;

    #[test]
    fn test_minimal_settings() {
        let settings = Settings::from_config(build(MINIMAL)).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert!(settings.database.url.is_none());
        assert_eq!(settings.session.ttl_secs, 86_400);
        assert_eq!(settings.session.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(settings.matching.offer_id_length, OFFER_ID_LENGTH);
    }

    #[test]
    fn test_zero_offer_id_length_rejected() {
        let toml = format!("{}\n[matching]\noffer_id_length = 0\n", MINIMAL);

        let result = Settings::from_config(build(&toml));
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_custom_offer_id_length_accepted() {
        let toml = format!("{}\n[matching]\noffer_id_length = 16\n", MINIMAL);

        let settings = Settings::from_config(build(&toml)).unwrap();
        assert_eq!(settings.matching.offer_id_length, 16);
    }
}
