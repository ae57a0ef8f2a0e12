use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

pub const DEFAULT_PRICE_API_URL: &str = "https://api.awattar.de/v1/marketdata";

/// Config file read when no path is given; allowed to be absent
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Market data endpoint, queried as `<base_url>?start=<ms>&end=<ms>`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Fail requests whose readings fall outside every returned price bucket
    /// instead of pricing those intervals at zero
    #[serde(default)]
    pub reject_unpriced_intervals: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            reject_unpriced_intervals: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            endpoint: default_metrics_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_base_url() -> String {
    DEFAULT_PRICE_API_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

/// Load configuration from a TOML file, overlaid by
/// `ENERGY_COST__SECTION__KEY` environment variables.
///
/// An explicitly given `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`]
/// is read if present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let file = match path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config::File::from(path).required(true)
        }
        None => config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
    };

    let config = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix("ENERGY_COST").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<IpAddr>().is_err() {
        anyhow::bail!("Invalid server host '{}': expected an IP address", cfg.server.host);
    }

    if cfg.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': expected 'text' or 'json'", other),
    }

    let base_url = &cfg.pricing.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("Pricing base_url must start with http:// or https://, got '{}'", base_url);
    }

    if cfg.pricing.timeout_seconds == 0 {
        anyhow::bail!("Pricing timeout_seconds must be greater than 0");
    }

    if cfg.metrics.enabled {
        let endpoint = cfg.metrics.endpoint.as_str();
        if !endpoint.starts_with('/') {
            anyhow::bail!("Metrics endpoint must start with '/', got '{}'", endpoint);
        }
        if endpoint == "/energy_cost" || endpoint == "/health" {
            anyhow::bail!("Metrics endpoint '{}' collides with a built-in route", endpoint);
        }
    }

    Ok(())
}
