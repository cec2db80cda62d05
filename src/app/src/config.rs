use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use crate::error::Error;

pub const DEFAULT_WIFI_SCAN_DEBOUNCE_MS: u64 = 10_000;
pub const DEFAULT_PASSWORD_MASK: &str = "*****";
pub const DEFAULT_UNSAFE_WARNING_PREFERENCE_KEY: &str = "hideUnsafeSettingsWarning";

/// Runtime settings the shell may override with `SessionEvent::Configure`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Minimum age of a successful scan before opening the selector rescans.
    #[validate(minimum = 1)]
    pub wifi_scan_debounce_ms: u64,

    /// Placeholder shown for passwords that were not edited.
    #[validate(min_length = 1)]
    pub password_mask: String,

    /// Preference key of the "don't warn about unsafe settings again" opt-out.
    #[validate(min_length = 1)]
    pub unsafe_warning_preference_key: String,

    /// Timeout for loading device info, 0 for none. Enforced by the shell.
    pub info_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wifi_scan_debounce_ms: DEFAULT_WIFI_SCAN_DEBOUNCE_MS,
            password_mask: DEFAULT_PASSWORD_MASK.to_string(),
            unsafe_warning_preference_key: DEFAULT_UNSAFE_WARNING_PREFERENCE_KEY.to_string(),
            info_timeout_ms: 0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Configuration(e.to_string()))?;
        config
            .validate()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(config)
    }
}
