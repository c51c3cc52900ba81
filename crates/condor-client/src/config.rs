//! Connection settings for the Conductor endpoint.
//!
//! ```toml
//! endpoint = "http://localhost:8080/api/"
//! timeout_secs = 10
//!
//! [custom_headers]
//! X-Authorization = "token"
//! ```

use condor_core::errors::{ConductorError, Result};
use condor_core_types::Sensitive;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Base URL of the Conductor API.
    #[serde(default)]
    pub endpoint: String,

    /// Headers sent with every request; values are redacted in logs.
    #[serde(default)]
    pub custom_headers: BTreeMap<String, Sensitive<String>>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            custom_headers: BTreeMap::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// `Config` when the text is not valid TOML for this shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConductorError::Config {
            reason: format!("invalid configuration: {}", e),
        })
    }

    /// # Errors
    ///
    /// `Config` when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConductorError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Add or replace a custom header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers
            .insert(key.into(), Sensitive::new(value.into()));
        self
    }

    /// Endpoint with any trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// # Errors
    ///
    /// `Config` when the endpoint is empty or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url().trim().is_empty() {
            return Err(ConductorError::Config {
                reason: "endpoint can't be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConductorError::Config {
                reason: "timeout_secs must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Split a `KEY=VALUE` header argument.
///
/// # Errors
///
/// `Config` when there is no `=` or the key is empty.
pub fn parse_header_arg(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConductorError::Config {
            reason: format!("header must look like KEY=VALUE, got '{}'", arg),
        }),
    }
}
