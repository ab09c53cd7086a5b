use crate::error::{ReframeError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display, EnumString};

/// Environment variable holding the overwrite policy.
pub const OVERWRITE_POLICY_ENV: &str = "REFRAME_OVERWRITE_POLICY";

/// Configuration source backed by the process environment
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// What happens when a metadata key is written twice for the same target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OverwritePolicy {
    /// Last write wins silently.
    #[default]
    Replace,
    /// Last write wins, and the overwrite is logged.
    Warn,
    /// The second write fails with `DuplicateAnnotation`.
    Reject,
}

/// Settings for a [`MetadataStore`](crate::metadata::MetadataStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub overwrite: OverwritePolicy,
}

impl RegistryConfig {
    pub fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_service(&ConfigService::new())
    }

    /// Read settings from a config source. Missing keys keep their defaults.
    pub fn from_service(service: &ConfigService) -> Result<Self> {
        let overwrite = match service.get(OVERWRITE_POLICY_ENV) {
            Some(raw) => OverwritePolicy::from_str(raw.trim()).map_err(|_| {
                ReframeError::config(format!(
                    "{OVERWRITE_POLICY_ENV} must be one of replace, warn, reject (got '{raw}')"
                ))
            })?,
            None => OverwritePolicy::default(),
        };
        Ok(Self { overwrite })
    }
}
