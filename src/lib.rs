//! Browser-side UI behaviors for the storefront pages.
//!
//! This crate is compiled to WebAssembly and loaded by every page. It owns
//! two independent behaviors: alerts fade out and disappear a few seconds
//! after page load, and the light/dark theme is restored on load and flipped
//! by `toggleTheme()` from markup. Templates only render the markers; no
//! other JavaScript is involved.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Theme enum and the testable [`theme::ThemeToggle`] core |
//! | [`alert`] | Alert lifecycle and the testable [`alert::AlertDismisser`] core |
//! | [`page`] | Start-up order for one page |
//! | [`config`] | Markers, names and delays, with JSON override |
//! | [`dom`] | web-sys implementations of the theme and alert seams |
//! | [`error`] | Shared error type |

pub mod alert;
pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod theme;

#[cfg(test)]
mod test_helpers;

use wasm_bindgen::prelude::*;

use crate::config::UiConfig;
use crate::dom::{DocumentAlerts, LocalStorage, RootElement, TimeoutScheduler};
use crate::error::UiError;
use crate::page::Page;

/// Module start: set up console logging, restore the theme, and arm alert
/// dismissal for when content has loaded.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let (config, config_err) = match page_config() {
        Ok(config) => (config, None),
        Err(e) => (UiConfig::default(), Some(e)),
    };
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("storefront-ui: logger already installed"));
    }
    if let Some(e) = config_err {
        log::warn!("storefront-ui: using default config: {e}");
    }
    if let Err(e) = boot(Page::new(config)) {
        log::warn!("storefront-ui: start failed: {e}");
    }
}

/// Flip between light and dark and remember the choice. Bound to the theme
/// button in markup.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() {
    match try_toggle_theme() {
        Ok(theme) => log::debug!("theme: switched to {theme}"),
        Err(e) => log::warn!("theme: toggle failed: {e}"),
    }
}

fn page_config() -> Result<UiConfig, UiError> {
    let window = dom::window()?;
    let root = dom::root_element(&dom::document(&window)?)?;
    dom::load_config(&root)
}

fn boot(page: Page) -> Result<(), UiError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let root = dom::root_element(&document)?;

    page.restore_theme(RootElement(root), LocalStorage::open(&window));

    let alerts = DocumentAlerts(document.clone());
    dom::on_content_loaded(&document, move || {
        page.content_loaded(&TimeoutScheduler, alerts);
    })
}

fn try_toggle_theme() -> Result<theme::Theme, UiError> {
    let window = dom::window()?;
    let root = dom::root_element(&dom::document(&window)?)?;
    let page = Page::new(dom::load_config(&root).unwrap_or_default());
    page.theme(RootElement(root), LocalStorage::open(&window)).toggle()
}
