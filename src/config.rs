use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use validator::Validate;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_MAIL_FROM: &str = "orcamentos@localhost";
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const CONFIG_FILE: &str = "config/default";

/// Application configuration, layered from `config/default.toml` and
/// `APP_*` environment variables.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    /// Server bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// JWT signing secret
    #[validate(length(min = 32))]
    pub jwt_secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Credentials accepted by the login endpoint
    pub admin_username: String,
    pub admin_password: String,

    /// Directory holding the HTML template assets
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Sender address for outbound quote e-mails
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_template_dir() -> String {
    DEFAULT_TEMPLATE_DIR.to_string()
}
fn default_mail_from() -> String {
    DEFAULT_MAIL_FROM.to_string()
}
fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads configuration from file and environment, then validates it.
pub fn load_config() -> Result<AppConfig, anyhow::Error> {
    let cfg: AppConfig = Config::builder()
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
        .map_err(|e: ConfigError| anyhow::anyhow!(e))?;

    cfg.validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
    Ok(cfg)
}

/// Initializes the global tracing subscriber. Falls back to the default
/// filter when `log_level` does not parse.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_json: false,
            jwt_secret: "0123456789abcdef0123456789abcdef".into(),
            token_ttl_secs: default_token_ttl(),
            admin_username: "admin".into(),
            admin_password: "s3nha".into(),
            template_dir: default_template_dir(),
            mail_from: default_mail_from(),
        }
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let cfg = base_config();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn short_jwt_secret_fails_validation() {
        let mut cfg = base_config();
        cfg.jwt_secret = "short".into();
        assert!(cfg.validate().is_err());
    }
}
