//! # Config Module
//!
//! The persisted client settings.
//!
//! The on-disk shape is a flat JSON object with camelCase keys:
//!
//! ```json
//! { "baseUrl": "https://apis.nbg.gr/uk/v3_1", "accessToken": "...", "sandboxId": "..." }
//! ```
//!
//! Reading and writing the file is the app's job; this module only knows
//! the model, its validation and the environment overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL used when none has been configured.
pub const DEFAULT_BASE_URL: &str = "https://apis.nbg.gr/uk/v3_1";

/// Environment variable overriding `baseUrl`.
pub const ENV_BASE_URL: &str = "OBCLI_BASE_URL";

/// Environment variable overriding `accessToken`.
pub const ENV_ACCESS_TOKEN: &str = "OBCLI_ACCESS_TOKEN";

/// Environment variable overriding `sandboxId`.
pub const ENV_SANDBOX_ID: &str = "OBCLI_SANDBOX_ID";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// =============================================================================
// CONFIG KEY
// =============================================================================

/// One persisted configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    BaseUrl,
    AccessToken,
    SandboxId,
}

impl ConfigKey {
    /// All keys, in display order.
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::BaseUrl,
        ConfigKey::AccessToken,
        ConfigKey::SandboxId,
    ];

    /// The key name as stored in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "baseUrl",
            ConfigKey::AccessToken => "accessToken",
            ConfigKey::SandboxId => "sandboxId",
        }
    }

    /// The environment variable that overrides this key.
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => ENV_BASE_URL,
            ConfigKey::AccessToken => ENV_ACCESS_TOKEN,
            ConfigKey::SandboxId => ENV_SANDBOX_ID,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    /// Accepts the stored name (`baseUrl`) or the flag spelling (`base-url`).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "baseUrl" | "base-url" => Ok(ConfigKey::BaseUrl),
            "accessToken" | "access-token" => Ok(ConfigKey::AccessToken),
            "sandboxId" | "sandbox-id" => Ok(ConfigKey::SandboxId),
            other => Err(Error::InvalidConfig(format!(
                "unknown key '{}' (expected baseUrl, accessToken or sandboxId)",
                other
            ))),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API root every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token, obtained outside this tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Sandbox instance sent as the `sandbox-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            sandbox_id: None,
        }
    }
}

impl Config {
    /// Get the current value of a key.
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BaseUrl => Some(self.base_url.as_str()),
            ConfigKey::AccessToken => self.access_token.as_deref(),
            ConfigKey::SandboxId => self.sandbox_id.as_deref(),
        }
    }

    /// Set a key after validating the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if:
    /// - `value` is empty or only whitespace
    /// - the base URL does not start with `http://` or `https://`
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::InvalidConfig(format!("{} must not be empty", key)));
        }

        match key {
            ConfigKey::BaseUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(Error::InvalidConfig(format!(
                        "baseUrl must start with http:// or https:// (got '{}')",
                        value
                    )));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::AccessToken => self.access_token = Some(value.to_string()),
            ConfigKey::SandboxId => self.sandbox_id = Some(value.to_string()),
        }
        Ok(())
    }

    /// Clear a key. The base URL falls back to [`DEFAULT_BASE_URL`].
    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = default_base_url(),
            ConfigKey::AccessToken => self.access_token = None,
            ConfigKey::SandboxId => self.sandbox_id = None,
        }
    }

    /// Every key with its current value, in [`ConfigKey::ALL`] order.
    pub fn entries(&self) -> Vec<(ConfigKey, Option<&str>)> {
        ConfigKey::ALL.iter().map(|&k| (k, self.get(k))).collect()
    }

    /// Apply environment overrides.
    ///
    /// `lookup` is usually `|name| std::env::var(name).ok()`; it is a
    /// parameter so tests don't have to mutate the process environment.
    /// Empty values are ignored, invalid ones are reported.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ConfigKey::ALL {
            if let Some(value) = lookup(key.env_var()) {
                if !value.trim().is_empty() {
                    self.set(key, &value)?;
                }
            }
        }
        Ok(())
    }

    /// Parse a config file body.
    ///
    /// Blank values count as unset, the same as [`Config::set`] refuses them.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        if config.base_url.trim().is_empty() {
            config.base_url = default_base_url();
        }
        config.access_token = config.access_token.filter(|v| !v.trim().is_empty());
        config.sandbox_id = config.sandbox_id.filter(|v| !v.trim().is_empty());
        Ok(config)
    }

    /// Serialize for writing to disk.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
