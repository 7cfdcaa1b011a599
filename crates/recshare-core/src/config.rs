//! Runtime configuration for planning and confirmation.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults ([`ShareConfig::default`])
//! 2. a TOML file ([`ShareConfig::load`])
//! 3. environment variables ([`ShareConfig::with_env_overrides`]):
//!    `RECSHARE_CONFIRM`, `RECSHARE_ON_DECLINE`, `RECSHARE_LOG_FORMAT`
//!
//! Command-line flags are applied on top by the binary.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::confirm::DeclinePolicy;
use crate::domain::{Result, ShareError};

pub const ENV_CONFIRM: &str = "RECSHARE_CONFIRM";
pub const ENV_ON_DECLINE: &str = "RECSHARE_ON_DECLINE";
pub const ENV_LOG_FORMAT: &str = "RECSHARE_LOG_FORMAT";

/// How flagged expansions get answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmMode {
    /// Ask interactively.
    #[default]
    Prompt,
    /// Accept every expansion without asking.
    AcceptAll,
    /// Decline every expansion without asking.
    DeclineAll,
}

impl FromStr for ConfirmMode {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "prompt" => Ok(Self::Prompt),
            "accept_all" | "yes" => Ok(Self::AcceptAll),
            "decline_all" | "no" => Ok(Self::DeclineAll),
            other => Err(ShareError::Config(format!("unknown confirm mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub confirm_mode: ConfirmMode,
    pub decline_policy: DeclinePolicy,
    /// Emit JSON log lines.
    pub log_json: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            confirm_mode: ConfirmMode::Prompt,
            decline_policy: DeclinePolicy::Exclude,
            log_json: false,
        }
    }
}

impl ShareConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ShareError::Config(e.to_string()))
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply `RECSHARE_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_CONFIRM) {
            self.confirm_mode = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_ON_DECLINE) {
            self.decline_policy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            self.log_json = match raw.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" | "" => false,
                other => {
                    return Err(ShareError::Config(format!("unknown log format: {other}")))
                }
            };
        }
        Ok(self)
    }

    pub fn with_confirm_mode(mut self, mode: ConfirmMode) -> Self {
        self.confirm_mode = mode;
        self
    }

    pub fn with_decline_policy(mut self, policy: DeclinePolicy) -> Self {
        self.decline_policy = policy;
        self
    }
}
