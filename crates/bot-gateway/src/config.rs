//! Bot gateway configuration.
//!
//! Configuration is loaded from environment variables. Nothing here is
//! secret, but the TLS CA path is only logged as a path, never its contents.

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default bot service endpoint (bot gRPC server listens on 50051).
pub const DEFAULT_BOT_SERVICE_URL: &str = "http://localhost:50051";

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Default deadline for unary calls in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 10;

/// Default capacity of the join stream hand-off queue.
pub const DEFAULT_JOIN_BUFFER_SIZE: usize = 16;

/// TLS settings for the bot service channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// PEM CA bundle used to verify the server. Native roots when `None`.
    pub ca_cert_path: Option<String>,

    /// Domain name used for SNI and certificate verification.
    pub domain: Option<String>,
}

/// Bot gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// gRPC endpoint of the bot service (default: "http://localhost:50051").
    pub bot_service_url: String,

    /// Connect timeout in seconds (default: 5, minimum 1).
    pub connect_timeout_seconds: u64,

    /// Deadline applied to unary calls whose context has none (default: 10, minimum 1).
    pub rpc_timeout_seconds: u64,

    /// Join stream hand-off queue capacity (default: 16, minimum 1).
    pub join_buffer_size: usize,

    /// Connect during `BotClient::connect` instead of on first call.
    pub eager_connect: bool,

    /// TLS settings; plaintext when `None`.
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_service_url: DEFAULT_BOT_SERVICE_URL.to_string(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            rpc_timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
            join_buffer_size: DEFAULT_JOIN_BUFFER_SIZE,
            eager_connect: false,
            tls: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bot_service_url = vars
            .get("BOT_SERVICE_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BOT_SERVICE_URL.to_string());

        if bot_service_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "BOT_SERVICE_URL must not be empty".to_string(),
            ));
        }

        let connect_timeout_seconds = parse_var(
            vars,
            "BOT_CONNECT_TIMEOUT_SECONDS",
            DEFAULT_CONNECT_TIMEOUT_SECONDS,
        )?;

        if connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "BOT_CONNECT_TIMEOUT_SECONDS must be at least 1".to_string(),
            ));
        }

        let rpc_timeout_seconds =
            parse_var(vars, "BOT_RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS)?;
        if rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "BOT_RPC_TIMEOUT_SECONDS must be at least 1".to_string(),
            ));
        }

        let join_buffer_size = parse_var(vars, "BOT_JOIN_BUFFER_SIZE", DEFAULT_JOIN_BUFFER_SIZE)?;
        if join_buffer_size == 0 {
            return Err(ConfigError::InvalidValue(
                "BOT_JOIN_BUFFER_SIZE must be at least 1".to_string(),
            ));
        }

        let eager_connect = parse_var(vars, "BOT_EAGER_CONNECT", false)?;

        let tls = if parse_var(vars, "BOT_TLS_ENABLED", false)? {
            Some(TlsConfig {
                ca_cert_path: vars.get("BOT_TLS_CA_CERT_PATH").cloned(),
                domain: vars.get("BOT_TLS_DOMAIN").cloned(),
            })
        } else {
            None
        };

        Ok(Config {
            bot_service_url,
            connect_timeout_seconds,
            rpc_timeout_seconds,
            join_buffer_size,
            eager_connect,
            tls,
        })
    }

    /// Connect timeout as a `Duration`.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Default unary call deadline as a `Duration`.
    #[must_use]
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }
}

/// One join to drive from the `bot-gateway` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinArgs {
    pub meepo_id: String,
    pub bot_id: String,
    pub meeting_url: String,
    pub bot_name: String,
}

impl JoinArgs {
    /// Load join arguments from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load join arguments from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(JoinArgs {
            meepo_id: required_var(vars, "BOT_MEEPO_ID")?,
            bot_id: required_var(vars, "BOT_ID")?,
            meeting_url: required_var(vars, "BOT_MEETING_URL")?,
            bot_name: required_var(vars, "BOT_NAME")?,
        })
    }
}

fn required_var(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    vars.get(name)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parse an optional variable, rejecting values that are present but malformed.
fn parse_var<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{name}={raw}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_success_with_defaults() {
        let vars = HashMap::new();

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bot_service_url, DEFAULT_BOT_SERVICE_URL);
        assert_eq!(config.connect_timeout_seconds, DEFAULT_CONNECT_TIMEOUT_SECONDS);
        assert_eq!(config.rpc_timeout_seconds, DEFAULT_RPC_TIMEOUT_SECONDS);
        assert_eq!(config.join_buffer_size, DEFAULT_JOIN_BUFFER_SIZE);
        assert!(!config.eager_connect);
        assert!(config.tls.is_none());
    }

    #[test]
    fn test_from_vars_success_with_custom_values() {
        let vars = HashMap::from([
            ("BOT_SERVICE_URL".to_string(), "https://bot:50051".to_string()),
            ("BOT_CONNECT_TIMEOUT_SECONDS".to_string(), "2".to_string()),
            ("BOT_RPC_TIMEOUT_SECONDS".to_string(), "30".to_string()),
            ("BOT_JOIN_BUFFER_SIZE".to_string(), "1".to_string()),
            ("BOT_EAGER_CONNECT".to_string(), "true".to_string()),
            ("BOT_TLS_ENABLED".to_string(), "true".to_string()),
            (
                "BOT_TLS_CA_CERT_PATH".to_string(),
                "/etc/meepo/ca.pem".to_string(),
            ),
            ("BOT_TLS_DOMAIN".to_string(), "bot.internal".to_string()),
        ]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bot_service_url, "https://bot:50051");
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.rpc_timeout(), Duration::from_secs(30));
        assert_eq!(config.join_buffer_size, 1);
        assert!(config.eager_connect);
        assert_eq!(
            config.tls,
            Some(TlsConfig {
                ca_cert_path: Some("/etc/meepo/ca.pem".to_string()),
                domain: Some("bot.internal".to_string()),
            })
        );
    }

    #[test]
    fn test_tls_paths_ignored_when_disabled() {
        let vars = HashMap::from([(
            "BOT_TLS_CA_CERT_PATH".to_string(),
            "/etc/meepo/ca.pem".to_string(),
        )]);

        let config = Config::from_vars(&vars).unwrap();
        assert!(config.tls.is_none());
    }

    #[test]
    fn test_zero_buffer_size_rejected() {
        let vars = HashMap::from([("BOT_JOIN_BUFFER_SIZE".to_string(), "0".to_string())]);

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        for name in ["BOT_CONNECT_TIMEOUT_SECONDS", "BOT_RPC_TIMEOUT_SECONDS"] {
            let vars = HashMap::from([(name.to_string(), "0".to_string())]);

            let result = Config::from_vars(&vars);
            assert!(
                matches!(&result, Err(ConfigError::InvalidValue(v)) if v.contains(name)),
                "{name}=0 should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_malformed_number_rejected() {
        let vars = HashMap::from([(
            "BOT_CONNECT_TIMEOUT_SECONDS".to_string(),
            "five".to_string(),
        )]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue(v)) if v.contains("BOT_CONNECT_TIMEOUT_SECONDS"))
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        let vars = HashMap::from([("BOT_SERVICE_URL".to_string(), "  ".to_string())]);

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_join_args_from_vars() {
        let vars = HashMap::from([
            ("BOT_MEEPO_ID".to_string(), "m1".to_string()),
            ("BOT_ID".to_string(), "b1".to_string()),
            ("BOT_MEETING_URL".to_string(), "http://x".to_string()),
            ("BOT_NAME".to_string(), "Bot".to_string()),
        ]);

        let args = JoinArgs::from_vars(&vars).unwrap();
        assert_eq!(args.meepo_id, "m1");
        assert_eq!(args.bot_id, "b1");
        assert_eq!(args.meeting_url, "http://x");
        assert_eq!(args.bot_name, "Bot");
    }

    #[test]
    fn test_join_args_missing_var() {
        let vars = HashMap::from([("BOT_MEEPO_ID".to_string(), "m1".to_string())]);

        let result = JoinArgs::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "BOT_ID"));
    }
}
