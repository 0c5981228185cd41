//! Markers, names and timings the UI behaviors depend on.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page templates render the markers (`.alert`, `data-bs-theme`) that these
//! defaults name. A page that renders different markers can override any
//! field with a JSON object on the root element; see [`crate::dom::load_config`].

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::UiError;

/// Delay before alerts start fading, in milliseconds.
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 5000;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// CSS selector matching dismissible alerts.
    pub alert_selector: String,
    /// Class added to an alert to start its fade-out transition.
    pub fade_out_class: String,
    pub dismiss_delay_ms: u64,
    /// Root element attribute read by the theme stylesheet.
    pub theme_attribute: String,
    /// Durable store key holding the saved theme.
    pub theme_storage_key: String,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_selector: ".alert".to_owned(),
            fade_out_class: "fade-out".to_owned(),
            dismiss_delay_ms: DEFAULT_DISMISS_DELAY_MS,
            theme_attribute: "data-bs-theme".to_owned(),
            theme_storage_key: "theme".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse a JSON override; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` on malformed JSON or unknown fields, and
    /// `InvalidConfig` when a field fails [`UiConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would silently match nothing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), UiError> {
        let required = [
            ("alert_selector", &self.alert_selector),
            ("fade_out_class", &self.fade_out_class),
            ("theme_attribute", &self.theme_attribute),
            ("theme_storage_key", &self.theme_storage_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(UiError::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        if self.fade_out_class.contains(char::is_whitespace) {
            return Err(UiError::InvalidConfig("fade_out_class must be a single class".to_owned()));
        }
        if log::Level::from_str(&self.log_level).is_err() {
            return Err(UiError::InvalidConfig(format!("unknown log_level: {}", self.log_level)));
        }
        Ok(())
    }

    #[must_use]
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    /// Console log level; falls back to `Info` for an unparseable value.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}
