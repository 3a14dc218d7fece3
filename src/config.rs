//! Config module contains the top-level config for the app.
use std::env;

use config_crate::{Config as RawConfig, ConfigError, Environment, File};

/// Basic settings - HTTP binding address and worker pool size
#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: String,
    pub thread_count: usize,
}

/// Bearer token settings
#[derive(Debug, Deserialize, Clone)]
pub struct Auth {
    pub jwt_secret: String,
    pub token_ttl_sec: i64,
}

/// Cross-origin headers attached to every response
#[derive(Debug, Deserialize, Clone)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
}

/// Per-client request limit. Counters live in Redis when `redis` is set,
/// in process memory otherwise.
#[derive(Debug, Deserialize, Clone)]
pub struct RateLimit {
    pub enabled: bool,
    pub per_second: u64,
    pub redis: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Logging {
    pub level: String,
    pub json: bool,
}

/// Global app config
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: Server,
    pub auth: Auth,
    pub cors: Cors,
    pub rate_limit: RateLimit,
    pub logging: Logging,
}

impl Config {
    /// Creates config from base.toml, which are overwritten by <env>.toml, where env is one of dev,
    /// k8s, test. After that it could be overwritten by env variables like COUPONS_SERVER__PORT.
    pub fn new() -> Result<Self, ConfigError> {
        // Optional file specific for environment
        let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Config::with_env(env)
    }

    pub fn with_env(env: impl Into<String>) -> Result<Self, ConfigError> {
        let mut s = RawConfig::new();

        s.set_default("server.host", "0.0.0.0")?;
        s.set_default("server.port", "8080")?;
        s.set_default("server.thread_count", 4)?;
        s.set_default("auth.token_ttl_sec", 86400)?;
        s.set_default("cors.allowed_origins", vec!["*"])?;
        s.set_default("cors.allowed_methods", vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])?;
        s.set_default("rate_limit.enabled", true)?;
        s.set_default("rate_limit.per_second", 5)?;
        s.set_default("logging.level", "info")?;
        s.set_default("logging.json", false)?;

        s.merge(File::with_name("config/base"))?;
        s.merge(File::with_name(&format!("config/{}", env.into())).required(false))?;
        s.merge(Environment::with_prefix("COUPONS").separator("__"))?;
        s.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_config() {
        let config = Config::with_env("missing").unwrap();
        assert_eq!(config.server.port, "8080");
        assert_eq!(config.auth.token_ttl_sec, 86400);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.rate_limit.per_second, 5);
        assert!(config.rate_limit.redis.is_none());
    }
}
