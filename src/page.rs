//! Start-up wiring for one page.
//!
//! The theme is restored as soon as the module starts; alert dismissal is
//! armed once content has loaded. The two never share state.

use crate::alert::{AlertDismisser, AlertHost, Scheduler};
use crate::config::UiConfig;
use crate::theme::{KeyValueStore, Theme, ThemeRoot, ThemeToggle};

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

#[derive(Debug, Clone, Default)]
pub struct Page {
    config: UiConfig,
}

impl Page {
    #[must_use]
    pub fn new(config: UiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    #[must_use]
    pub fn theme<R: ThemeRoot, S: KeyValueStore>(&self, root: R, store: S) -> ThemeToggle<R, S> {
        ThemeToggle::new(&self.config, root, store)
    }

    /// Apply the saved theme. Failures are logged and the default stylesheet
    /// theme stays in effect.
    pub fn restore_theme<R: ThemeRoot, S: KeyValueStore>(&self, root: R, store: S) -> Option<Theme> {
        match self.theme(root, store).init() {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::warn!("theme: restore failed: {e}");
                None
            }
        }
    }

    /// Arm alert dismissal. Call once page content has loaded.
    pub fn content_loaded<C, H>(&self, scheduler: &C, host: H)
    where
        C: Scheduler,
        H: AlertHost + 'static,
    {
        AlertDismisser::new(&self.config).arm(scheduler, host);
    }
}
