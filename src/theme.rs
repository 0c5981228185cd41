//! Light/dark theme restore and toggle.
//!
//! The saved theme is restored onto the root element's theme attribute when
//! the module starts, before page load completes, so styles apply on first
//! paint. Toggle flips the attribute and writes the new value back to the
//! durable store.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A store that cannot be read restores `light`;
//! a store that cannot be written keeps the new attribute, so the page flips
//! but the choice is lost on reload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::UiConfig;
use crate::error::UiError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme that follows a raw root attribute value.
    ///
    /// Only an exact `"dark"` flips to light; a missing or unrecognized value
    /// is treated as light and flips to dark.
    #[must_use]
    pub fn toggled_from(current: Option<&str>) -> Self {
        match current {
            Some("dark") => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UiError::UnknownTheme(s.to_owned()))
    }
}

/// The element whose attribute drives the theme stylesheet.
pub trait ThemeRoot {
    fn attribute(&self, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns `Dom` if the host rejects the attribute write.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), UiError>;
}

/// Origin-scoped key-value storage that survives reloads.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns `StorageUnavailable` or `Storage` when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, UiError>;

    /// # Errors
    ///
    /// Returns `StorageUnavailable` or `Storage` when the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// Theme restore/toggle bound to a root element and a store.
pub struct ThemeToggle<R, S> {
    attribute: String,
    storage_key: String,
    root: R,
    store: S,
}

impl<R: ThemeRoot, S: KeyValueStore> ThemeToggle<R, S> {
    #[must_use]
    pub fn new(config: &UiConfig, root: R, store: S) -> Self {
        Self {
            attribute: config.theme_attribute.clone(),
            storage_key: config.theme_storage_key.clone(),
            root,
            store,
        }
    }

    /// Apply the saved theme (or `light`) to the root element.
    ///
    /// # Errors
    ///
    /// Returns the root's error if the attribute cannot be set.
    pub fn init(&self) -> Result<Theme, UiError> {
        let theme = self.saved();
        self.root.set_attribute(&self.attribute, theme.as_str())?;
        log::debug!("theme: restored {theme}");
        Ok(theme)
    }

    /// Flip the root attribute and persist the new theme.
    ///
    /// A failed store write is logged and does not fail the toggle.
    ///
    /// # Errors
    ///
    /// Returns the root's error if the attribute cannot be set; the store is
    /// left untouched in that case.
    pub fn toggle(&self) -> Result<Theme, UiError> {
        let current = self.root.attribute(&self.attribute);
        let next = Theme::toggled_from(current.as_deref());
        self.root.set_attribute(&self.attribute, next.as_str())?;
        if let Err(e) = self.store.set(&self.storage_key, next.as_str()) {
            log::warn!("theme: could not persist {next}: {e}");
        }
        Ok(next)
    }

    /// Theme currently on the root, if it is one of the known values.
    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        self.root
            .attribute(&self.attribute)
            .as_deref()
            .and_then(Theme::parse)
    }

    fn saved(&self) -> Theme {
        match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("theme: ignoring saved value {raw:?}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("theme: could not read saved theme: {e}");
                Theme::default()
            }
        }
    }
}
