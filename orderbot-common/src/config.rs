//! Configuration for orderbot services.
//!
//! All configuration comes from the process environment; there is no
//! configuration file. Every value has a default suitable for local
//! development, so a bare `orderbot-gateway` starts and binds to loopback.
//!
//! # Environment Variable Mapping
//!
//! ## Gateway
//! - `ORDERBOT_HOST` → bind host (default `127.0.0.1`)
//! - `ORDERBOT_PORT` → bind port (default `8000`)
//! - `OPENAI_MODEL` → completion model identifier (default `gpt-4o-mini`)
//! - `OPENAI_API_KEY` → completion API credential (no default; its absence
//!   is reported per request, not at startup)
//! - `OPENAI_BASE_URL` → completion API base (default `https://api.openai.com`)
//!
//! ## Client shell
//! - `API_BASE` → gateway base URL (default `http://localhost:8000`)
//!
//! ## Observability
//! - `ORDERBOT_LOG_LEVEL` → base log level (default `info`)
//! - `ORDERBOT_LOG_FORMAT` → `pretty` or `json` (default `pretty`)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default completion model, matching the smallest hosted model tier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default completion API endpoint base.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default gateway base URL for the client shell.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

// ============================================================================
// Gateway Configuration
// ============================================================================

/// Gateway service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind host. Default: "127.0.0.1" (local only)
    pub host: String,

    /// Bind port. Default: 8000
    pub port: u16,

    /// Completion model identifier.
    pub model: String,

    /// Completion API credential. `None` when unset in the environment;
    /// the gateway still starts and reports the missing key per request.
    pub api_key: Option<String>,

    /// Completion API base URL (overridable for tests and compatible hosts).
    pub openai_base_url: String,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Logging configuration shared by both binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Output format: "pretty" or "json".
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_format: "pretty".into(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            model: DEFAULT_MODEL.into(),
            api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load the gateway configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let port = env_or("ORDERBOT_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid ORDERBOT_PORT: {e}")))?;

        Ok(Self {
            host: env_or("ORDERBOT_HOST", "127.0.0.1"),
            port,
            model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            observability: ObservabilityConfig {
                log_level: env_or("ORDERBOT_LOG_LEVEL", "info"),
                log_format: env_or("ORDERBOT_LOG_FORMAT", "pretty"),
            },
        })
    }
}

// ============================================================================
// Client Shell Configuration
// ============================================================================

/// Client shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway base URL.
    pub api_base: String,

    /// Request timeout toward the gateway, in seconds.
    pub timeout_secs: u64,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            timeout_secs: 60,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load the client configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            api_base: env_or("API_BASE", DEFAULT_API_BASE),
            timeout_secs: 60,
            observability: ObservabilityConfig {
                log_level: env_or("ORDERBOT_LOG_LEVEL", "warn"),
                log_format: env_or("ORDERBOT_LOG_FORMAT", "pretty"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com");
    }

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_observability_defaults() {
        let obs = ObservabilityConfig::default();
        assert_eq!(obs.log_level, "info");
        assert_eq!(obs.log_format, "pretty");
    }
}
