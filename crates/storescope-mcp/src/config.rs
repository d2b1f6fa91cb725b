// crates/storescope-mcp/src/config.rs
// ============================================================================
// Module: Gateway Configuration
// Description: Configuration loading and validation for the gateway server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: storescope-backend, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits, then
//! overridden from the environment. An explicitly named file must exist and
//! parse; only the implicit default path is allowed to be absent, in which
//! case built-in defaults apply. Every load path ends in [`GatewayConfig::validate`],
//! so an invalid configuration never reaches the server. The API credential
//! is deliberately not part of this structure; it is supplied separately and
//! never written to disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use storescope_backend::HttpBackendConfig;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "storescope.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "STORESCOPE_CONFIG";
/// Environment variable supplying the API credential.
pub const TOKEN_ENV_VAR: &str = "STORESCOPE_API_TOKEN";
/// Environment variable overriding the remote API base URL.
pub const BASE_URL_ENV_VAR: &str = "STORESCOPE_API_BASE_URL";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Minimum accepted per-attempt backend timeout in milliseconds.
const MIN_BACKEND_TIMEOUT_MS: u64 = 100;
/// Maximum accepted per-attempt backend timeout in milliseconds.
const MAX_BACKEND_TIMEOUT_MS: u64 = 300_000;
/// Maximum accepted backend attempt ceiling.
const MAX_BACKEND_ATTEMPTS: u32 = 10;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Gateway server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// Server transport configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl GatewayConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// An explicit path (argument or `STORESCOPE_CONFIG`) must exist; the
    /// implicit default file may be absent, in which case defaults apply.
    /// Environment overrides are applied after parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
        let explicit = path.map(Path::to_path_buf).or(env_path);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(env::var(BASE_URL_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from one TOML file with a size limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, or
    /// malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment-derived overrides onto parsed configuration.
    pub fn apply_overrides(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url {
            self.backend.base_url = base_url;
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.backend.validate()?;
        Ok(())
    }
}

/// Server configuration for gateway transports.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Transport type for the server.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for HTTP or SSE transports.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Whether internal error detail is withheld from callers.
    #[serde(default = "default_mask_internal_errors")]
    pub mask_internal_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            max_body_bytes: default_max_body_bytes(),
            mask_internal_errors: default_mask_internal_errors(),
        }
    }
}

impl ServerConfig {
    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        match self.transport {
            ServerTransport::Stdio => Ok(()),
            ServerTransport::Http | ServerTransport::Sse => {
                let bind = self.bind.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("server.bind is required for http and sse".to_string())
                })?;
                bind.parse::<SocketAddr>().map_err(|_| {
                    ConfigError::Invalid(format!("server.bind is not a socket address: {bind}"))
                })?;
                Ok(())
            }
        }
    }
}

/// Transport types for the gateway server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Use stdin/stdout transport.
    #[default]
    Stdio,
    /// Use HTTP JSON-RPC transport.
    Http,
    /// Use SSE transport for responses.
    Sse,
}

impl ServerTransport {
    /// Returns a stable label for the transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Sse => "sse",
        }
    }
}

/// Outbound backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Remote API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_backend_timeout_ms")]
    pub timeout_ms: u64,
    /// Total attempt ceiling, counting the first attempt.
    #[serde(default = "default_backend_attempts")]
    pub max_attempts: u32,
    /// Backoff before the first retry, in milliseconds.
    #[serde(default = "default_backoff_initial_ms")]
    pub backoff_initial_ms: u64,
    /// Upper bound on any single backoff sleep, in milliseconds.
    #[serde(default = "default_backoff_cap_ms")]
    pub backoff_cap_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_backend_timeout_ms(),
            max_attempts: default_backend_attempts(),
            backoff_initial_ms: default_backoff_initial_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
        }
    }
}

impl BackendConfig {
    /// Validates backend configuration ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|_| {
            ConfigError::Invalid(format!("backend.base_url is not a url: {}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "backend.base_url must use http or https".to_string(),
            ));
        }
        if !(MIN_BACKEND_TIMEOUT_MS..=MAX_BACKEND_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "backend.timeout_ms must be between {MIN_BACKEND_TIMEOUT_MS} and \
                 {MAX_BACKEND_TIMEOUT_MS}"
            )));
        }
        if self.max_attempts == 0 || self.max_attempts > MAX_BACKEND_ATTEMPTS {
            return Err(ConfigError::Invalid(format!(
                "backend.max_attempts must be between 1 and {MAX_BACKEND_ATTEMPTS}"
            )));
        }
        if self.backoff_cap_ms < self.backoff_initial_ms {
            return Err(ConfigError::Invalid(
                "backend.backoff_cap_ms must be at least backoff_initial_ms".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts into the backend client configuration.
    #[must_use]
    pub fn to_http_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout_ms,
            max_attempts: self.max_attempts,
            backoff_initial_ms: self.backoff_initial_ms,
            backoff_cap_ms: self.backoff_cap_ms,
            ..HttpBackendConfig::default()
        }
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether audit events are written to stderr.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default maximum request body size in bytes.
const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Internal error detail is masked unless explicitly disabled.
const fn default_mask_internal_errors() -> bool {
    true
}

/// Default remote API base URL.
fn default_base_url() -> String {
    storescope_backend::DEFAULT_API_BASE_URL.to_string()
}

/// Default per-attempt backend timeout.
const fn default_backend_timeout_ms() -> u64 {
    30_000
}

/// Default backend attempt ceiling.
const fn default_backend_attempts() -> u32 {
    3
}

/// Default backoff before the first retry.
const fn default_backoff_initial_ms() -> u64 {
    500
}

/// Default backoff ceiling.
const fn default_backoff_cap_ms() -> u64 {
    5_000
}

/// Audit logging defaults to enabled.
const fn default_audit_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::ConfigError;
    use super::GatewayConfig;
    use super::ServerTransport;

    #[test]
    fn defaults_are_valid_and_masked() {
        let config = GatewayConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server.transport, ServerTransport::Stdio);
        assert!(config.server.mask_internal_errors);
        assert_eq!(config.backend.max_attempts, 3);
        assert_eq!(config.backend.timeout_ms, 30_000);
        assert!(config.audit.enabled);
    }

    #[test]
    fn http_transport_requires_a_bind_address() {
        let mut config = GatewayConfig::default();
        config.server.transport = ServerTransport::Http;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.server.bind = Some("127.0.0.1:8666".to_string());
        config.validate().unwrap();
        config.server.bind = Some("not-an-address".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn backend_ranges_fail_closed() {
        let mut config = GatewayConfig::default();
        config.backend.max_attempts = 0;
        assert!(config.validate().is_err());
        config.backend.max_attempts = 11;
        assert!(config.validate().is_err());
        config.backend.max_attempts = 3;
        config.backend.timeout_ms = 0;
        assert!(config.validate().is_err());
        config.backend.timeout_ms = 30_000;
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.backend.base_url = "https://example.com".to_string();
        config.backend.backoff_initial_ms = 1_000;
        config.backend.backoff_cap_ms = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_override_replaces_the_configured_value() {
        let mut config = GatewayConfig::default();
        config.apply_overrides(Some("https://staging.analytics.example".to_string()));
        assert_eq!(config.backend.base_url, "https://staging.analytics.example");
        config.apply_overrides(None);
        assert_eq!(config.backend.base_url, "https://staging.analytics.example");
    }
}
