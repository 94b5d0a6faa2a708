//! Server configuration

/// Environment variable overriding the listen address
pub const ADDR_ENV: &str = "ITEMS_ADDR";
/// Environment variable overriding the default log filter
pub const LOG_ENV: &str = "ITEMS_LOG";

/// Runtime settings for the HTTP server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`
    pub addr: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".to_string(),
            log_filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by `ITEMS_ADDR` / `ITEMS_LOG` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: lookup(ADDR_ENV).unwrap_or(defaults.addr),
            log_filter: lookup(LOG_ENV).unwrap_or(defaults.log_filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn env_overrides_each_field() {
        let config = ServerConfig::from_lookup(|key| match key {
            ADDR_ENV => Some("0.0.0.0:9000".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.log_filter, ServerConfig::default().log_filter);

        let config = ServerConfig::from_lookup(|key| match key {
            LOG_ENV => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, ServerConfig::default().addr);
        assert_eq!(config.log_filter, "debug");
    }
}
