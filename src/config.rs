use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";

/// Placeholder previous-period figures for the real-time counters.
///
/// Configuration rather than hardcoded values, so a future deployment can
/// source them from a persisted snapshot without touching the engine.
#[derive(Clone, Debug, Deserialize)]
pub struct Baselines {
    #[serde(default = "default_prev_items_in_stock")]
    pub prev_items_in_stock: i64,
    #[serde(default = "default_prev_reorder_recommendations")]
    pub prev_reorder_recommendations: i64,
    #[serde(default = "default_prev_expiring_items")]
    pub prev_expiring_items: f64,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            prev_items_in_stock: default_prev_items_in_stock(),
            prev_reorder_recommendations: default_prev_reorder_recommendations(),
            prev_expiring_items: default_prev_expiring_items(),
        }
    }
}

fn default_prev_items_in_stock() -> i64 {
    12_900
}
fn default_prev_reorder_recommendations() -> i64 {
    7
}
fn default_prev_expiring_items() -> f64 {
    8.4
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (1024-65535)
    #[serde(default = "default_port")]
    #[validate(range(min = 1024))]
    pub port: u16,

    /// Application environment
    #[serde(default = "default_env")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1))]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Optional JSON dataset loaded at startup (same shape as the
    /// `PUT /api/v1/datasets` payload)
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// CORS: comma-separated list of allowed origins (production)
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Previous-period baselines for the real-time counters
    #[serde(default)]
    pub baselines: Baselines,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_env() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_env(),
            log_level: default_log_level(),
            log_json: false,
            dataset_path: None,
            cors_allowed_origins: None,
            baselines: Baselines::default(),
        }
    }
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Layered load: `config/default.toml`, then `config/{environment}.toml`,
/// then `APP__`-prefixed environment variables (e.g. `APP__PORT=9000`).
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let settings = Config::builder()
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let cfg: AppConfig = settings.try_deserialize()?;
    cfg.validate()?;
    info!(environment = %cfg.environment, port = cfg.port, "configuration loaded");
    Ok(cfg)
}

/// Install the global tracing subscriber. Level comes from `RUST_LOG` when
/// set, else the configured level.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
