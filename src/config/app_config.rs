use serde::Deserialize;

use crate::domain::member::MembershipState;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
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

/// Which storage backend to construct at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// "memory" or "postgres"
    pub backend: String,
    /// Connection URL, required for the postgres backend.
    pub url: Option<String>,
}

/// Records auto-provisioned at startup (see
/// [`bootstrap`](crate::infrastructure::bootstrap)).
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Name of the default group type.
    pub group_type_name: String,
    /// State new members start in.
    pub member_state: MembershipState,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: None,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            group_type_name: "Team".to_string(),
            member_state: MembershipState::Active,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ROSTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
