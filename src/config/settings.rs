use clap::{Parser, ValueEnum};
use std::time::Duration;

pub const DEFAULT_WS_URL: &str = "http://legislatie.just.ro/apiws/FreeWebService.svc";

/// ================================
/// Global service-wide settings
/// ================================
///
/// Every flag can also come from the environment, which is how the service
/// is configured when deployed.
#[derive(Debug, Clone, Parser)]
#[command(name = "legislatie-proxy", about = "JSON proxy over the legislatie.just.ro SOAP web service")]
pub struct Settings {
    /// Upstream SOAP endpoint
    #[arg(long, env = "LEGISLATIE_WS_URL", default_value = DEFAULT_WS_URL)]
    pub upstream_url: String,

    /// Seconds a fetched token is considered valid
    #[arg(long, env = "TOKEN_LIFETIME_SECS", default_value_t = 3600)]
    pub token_lifetime_secs: u64,

    /// Request timeout for Search calls. Generous: upstream is known to be
    /// slow for large full-text queries.
    #[arg(long, env = "SEARCH_TIMEOUT_SECS", default_value_t = 120)]
    pub search_timeout_secs: u64,

    /// Request timeout for GetToken calls
    #[arg(long, env = "TOKEN_TIMEOUT_SECS", default_value_t = 15)]
    pub token_timeout_secs: u64,

    /// Bind host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Verbose logging
    #[arg(long, env = "DEBUG", default_value_t = false)]
    pub debug: bool,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

impl Settings {
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.token_lifetime_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn token_timeout(&self) -> Duration {
        Duration::from_secs(self.token_timeout_secs)
    }

    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_without_env() {
        std::env::remove_var("LEGISLATIE_WS_URL");
        std::env::remove_var("TOKEN_LIFETIME_SECS");
        let settings = Settings::try_parse_from(["legislatie-proxy"]).unwrap();
        assert_eq!(settings.upstream_url, DEFAULT_WS_URL);
        assert_eq!(settings.token_lifetime_secs, 3600);
        assert_eq!(settings.port, 5000);
        assert!(!settings.debug);
        assert_eq!(settings.log_level(), "info");
    }

    #[test]
    #[serial]
    fn env_overrides_apply() {
        std::env::set_var("LEGISLATIE_WS_URL", "http://127.0.0.1:9/ws");
        std::env::set_var("TOKEN_LIFETIME_SECS", "60");
        let settings = Settings::try_parse_from(["legislatie-proxy"]).unwrap();
        assert_eq!(settings.upstream_url, "http://127.0.0.1:9/ws");
        assert_eq!(settings.token_lifetime(), Duration::from_secs(60));
        std::env::remove_var("LEGISLATIE_WS_URL");
        std::env::remove_var("TOKEN_LIFETIME_SECS");
    }
}
