//! web-sys adapters for the theme and alert seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only module that touches browser types. Everything here is a
//! thin wrapper that maps `JsValue` exceptions to [`UiError`] so the cores in
//! [`crate::theme`] and [`crate::alert`] can be exercised without a browser.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{AddEventListenerOptions, Document, Element, Storage, Window};

use crate::alert::{AlertHost, AlertNode, AlertStage, Scheduler};
use crate::config::UiConfig;
use crate::error::UiError;
use crate::theme::{KeyValueStore, ThemeRoot};

/// Root element attribute holding an optional JSON [`UiConfig`] override.
pub const CONFIG_ATTRIBUTE: &str = "data-storefront-ui";

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn dom_err(value: JsValue) -> UiError {
    UiError::Dom(describe(&value))
}

fn storage_err(value: JsValue) -> UiError {
    UiError::Storage(describe(&value))
}

// =============================================================================
// LOOKUP
// =============================================================================

/// # Errors
///
/// Returns `NoWindow` outside a browser main thread.
pub fn window() -> Result<Window, UiError> {
    web_sys::window().ok_or(UiError::NoWindow)
}

/// # Errors
///
/// Returns `NoDocument` if the window has no document.
pub fn document(window: &Window) -> Result<Document, UiError> {
    window.document().ok_or(UiError::NoDocument)
}

/// # Errors
///
/// Returns `NoRootElement` if the document has no `<html>` element yet.
pub fn root_element(document: &Document) -> Result<Element, UiError> {
    document.document_element().ok_or(UiError::NoRootElement)
}

/// Read the config override from [`CONFIG_ATTRIBUTE`], defaulting when absent.
///
/// # Errors
///
/// Returns the parse or validation error for a malformed override.
pub fn load_config(root: &Element) -> Result<UiConfig, UiError> {
    match root.get_attribute(CONFIG_ATTRIBUTE) {
        Some(raw) => UiConfig::from_json(&raw),
        None => Ok(UiConfig::default()),
    }
}

// =============================================================================
// THEME
// =============================================================================

pub struct RootElement(pub Element);

impl ThemeRoot for RootElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), UiError> {
        self.0.set_attribute(name, value).map_err(dom_err)
    }
}

/// `window.localStorage`, which may be missing (privacy modes, sandboxed frames).
pub struct LocalStorage(Option<Storage>);

impl LocalStorage {
    #[must_use]
    pub fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(storage) => Self(storage),
            Err(e) => {
                log::debug!("localStorage access denied: {}", describe(&e));
                Self(None)
            }
        }
    }

    fn storage(&self) -> Result<&Storage, UiError> {
        self.0.as_ref().ok_or(UiError::StorageUnavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, UiError> {
        self.storage()?.get_item(key).map_err(storage_err)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        self.storage()?.set_item(key, value).map_err(storage_err)
    }
}

// =============================================================================
// ALERTS
// =============================================================================

#[derive(Clone)]
pub struct DomAlert(pub Element);

impl AlertNode for DomAlert {
    fn stage(&self, fade_out_class: &str) -> AlertStage {
        if !self.0.is_connected() {
            AlertStage::Removed
        } else if self.0.class_list().contains(fade_out_class) {
            AlertStage::Fading
        } else {
            AlertStage::Visible
        }
    }

    fn add_class(&self, class: &str) -> Result<(), UiError> {
        self.0.class_list().add_1(class).map_err(dom_err)
    }

    fn on_transition_end(&self, handler: Box<dyn FnOnce()>) -> Result<(), UiError> {
        add_once_listener(&self.0, "transitionend", handler)
    }

    fn remove(&self) {
        self.0.remove();
    }
}

pub struct DocumentAlerts(pub Document);

impl AlertHost for DocumentAlerts {
    type Alert = DomAlert;

    fn alerts(&self, selector: &str) -> Result<Vec<DomAlert>, UiError> {
        let nodes = self.0.query_selector_all(selector).map_err(dom_err)?;
        let mut alerts = Vec::with_capacity(nodes.length() as usize);
        for node in (0..nodes.length()).filter_map(|idx| nodes.item(idx)) {
            // Selectors only match elements, but NodeList is typed as Node.
            if let Ok(el) = node.dyn_into::<Element>() {
                alerts.push(DomAlert(el));
            }
        }
        Ok(alerts)
    }
}

// =============================================================================
// SCHEDULING
// =============================================================================

/// `setTimeout` via gloo. Timers are forgotten so they always fire.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

/// Run `f` once the document's content has loaded.
///
/// The wasm module may finish instantiating after `DOMContentLoaded` has
/// already fired, so a document past the `loading` state runs `f` at once.
///
/// # Errors
///
/// Returns `Dom` if the listener cannot be registered.
pub fn on_content_loaded(document: &Document, f: impl FnOnce() + 'static) -> Result<(), UiError> {
    if document.ready_state() == "loading" {
        add_once_listener(document, "DOMContentLoaded", Box::new(f))
    } else {
        f();
        Ok(())
    }
}

fn add_once_listener(
    target: &web_sys::EventTarget,
    event: &str,
    handler: Box<dyn FnOnce()>,
) -> Result<(), UiError> {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(move || handler());
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.unchecked_ref::<js_sys::Function>(),
            &options,
        )
        .map_err(dom_err)
}
