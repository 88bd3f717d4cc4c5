//! Environment-driven service configuration.
//!
//! Everything the process needs arrives through `FLOWD_*` variables,
//! resolved once at startup. Invalid values are a startup error, not a
//! panic.

use std::path::PathBuf;
use std::time::Duration;

use flowd_sandbox::SandboxConfig;

/// Resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds.
    pub listen_addr: String,
    /// GraphQL endpoint of the external flow store.
    pub store_endpoint: String,
    /// Interpreter for `/flows/execute`.
    pub interpreter: PathBuf,
    /// Wall-clock budget per execution.
    pub exec_timeout: Duration,
    /// Cap on concurrently running interpreters.
    pub exec_max_concurrent: usize,
    /// Allowed CORS origins; `*` means any.
    pub cors_origins: Vec<String>,
}

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl GatewayConfig {
    /// Read configuration from the environment, applying defaults for
    /// anything unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("FLOWD_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(endpoint) = std::env::var("FLOWD_STORE_ENDPOINT") {
            config.store_endpoint = endpoint;
        }
        if let Ok(interpreter) = std::env::var("FLOWD_EXEC_INTERPRETER") {
            config.interpreter = PathBuf::from(interpreter);
        }
        if let Ok(ms) = std::env::var("FLOWD_EXEC_TIMEOUT_MS") {
            let ms: u64 = ms.parse().map_err(|e| ConfigError::Invalid {
                var: "FLOWD_EXEC_TIMEOUT_MS",
                reason: format!("{e}"),
            })?;
            config.exec_timeout = Duration::from_millis(ms);
        }
        if let Ok(n) = std::env::var("FLOWD_EXEC_MAX_CONCURRENT") {
            config.exec_max_concurrent = n.parse().map_err(|e| ConfigError::Invalid {
                var: "FLOWD_EXEC_MAX_CONCURRENT",
                reason: format!("{e}"),
            })?;
        }
        if let Ok(origins) = std::env::var("FLOWD_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_owned())
                .filter(|o| !o.is_empty())
                .collect();
            if config.cors_origins.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "FLOWD_CORS_ORIGINS",
                    reason: "no origins listed".to_owned(),
                });
            }
        }

        Ok(config)
    }

    /// Sandbox limits derived from this configuration.
    #[must_use]
    pub fn sandbox(&self) -> SandboxConfig {
        let mut sandbox = SandboxConfig::new(self.interpreter.clone());
        sandbox.timeout = self.exec_timeout;
        sandbox.max_concurrent = self.exec_max_concurrent;
        sandbox
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_owned(),
            store_endpoint: "http://127.0.0.1:8080/graphql".to_owned(),
            interpreter: PathBuf::from("python3"),
            exec_timeout: Duration::from_millis(10_000),
            exec_max_concurrent: 8,
            cors_origins: vec!["*".to_owned()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_usable() {
        let config = GatewayConfig::default();
        assert!(!config.store_endpoint.is_empty(), "store endpoint must never default to empty");
        assert_eq!(config.cors_origins, vec!["*".to_owned()]);
    }

    #[test]
    fn sandbox_limits_follow_gateway_settings() {
        let mut config = GatewayConfig::default();
        config.exec_timeout = Duration::from_millis(1234);
        config.exec_max_concurrent = 2;
        let sandbox = config.sandbox();
        assert_eq!(sandbox.timeout, Duration::from_millis(1234));
        assert_eq!(sandbox.max_concurrent, 2);
    }
}
