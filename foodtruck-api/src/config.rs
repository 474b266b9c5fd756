use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

use crate::domain::models::SearchConfig;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub store: StoreSettings,
    pub search: SearchSettings,
    pub geocoding: GeocodingSettings,
    pub ip_lookup: IpLookupSettings,
    pub cache: CacheSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Fallback filter directive when `RUST_LOG` is unset
    pub log_level: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// JSON array of vendors, read when `backend` is `memory`
    pub fixture_path: Option<PathBuf>,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_limit: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_limit: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_max_distance_miles: f64,
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            default_limit: settings.default_limit,
            max_limit: settings.max_limit,
            default_max_distance_miles: settings.default_max_distance_miles,
        }
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct GeocodingSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

impl GeocodingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct IpLookupSettings {
    pub base_url: Option<String>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

impl IpLookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct CacheSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_capacity: u64,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl CacheSettings {
    pub fn time_to_live(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

pub fn read_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("failed to determine the current directory: {e}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| ConfigError::Message(format!("failed to parse APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("FOODTRUCK")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
