use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{Coordinates, DistanceModel};

/// Application configuration
///
/// Every section has defaults, so the service starts without any file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub fixture: FixtureSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub locator: LocatorSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSettings {
    #[serde(default = "default_fixture_path")]
    pub path: String,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self { path: default_fixture_path() }
    }
}

fn default_fixture_path() -> String { "data/atms.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default)]
    pub distance_model: DistanceModel,
    /// Fixed delay before answering a search, 0 disables it
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
            max_limit: default_max_limit(),
            distance_model: DistanceModel::default(),
            simulated_latency_ms: 0,
        }
    }
}

fn default_radius_km() -> f64 { 5.0 }
fn default_min_radius_km() -> f64 { 1.0 }
fn default_max_radius_km() -> f64 { 20.0 }
fn default_max_limit() -> usize { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct LocatorSettings {
    #[serde(default = "default_center_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_jitter_deg")]
    pub jitter_deg: f64,
}

impl LocatorSettings {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.default_latitude, self.default_longitude)
    }
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            default_latitude: default_center_latitude(),
            default_longitude: default_center_longitude(),
            jitter_deg: default_jitter_deg(),
        }
    }
}

// Vinnytsia city centre
fn default_center_latitude() -> f64 { 49.2331 }
fn default_center_longitude() -> f64 { 28.4682 }
fn default_jitter_deg() -> f64 { 0.025 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            l1_cache_size: default_l1_cache_size(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_l1_cache_size() -> u64 { 1000 }
fn default_ttl_secs() -> u64 { 300 }

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
    /// 4. Environment variables (prefixed with ATM__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ATM__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ATM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ATM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the unprefixed deployment variables
///
/// `FIXTURE_PATH` and `REDIS_URL` are honoured when the prefixed forms are
/// not set.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let fixture_path = env::var("ATM__FIXTURE__PATH")
        .or_else(|_| env::var("FIXTURE_PATH"))
        .ok();
    let redis_url = env::var("ATM__CACHE__REDIS_URL")
        .or_else(|_| env::var("REDIS_URL"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = fixture_path {
        builder = builder.set_override("fixture.path", path)?;
    }
    if let Some(url) = redis_url.filter(|u| !u.is_empty()) {
        builder = builder.set_override("cache.redis_url", url)?;
    }

    builder.build()
}
