//! Error type shared by the theme and alert components.
//!
//! Nothing here is user-visible. Browser exceptions arrive as `JsValue` and are
//! flattened to strings at the `dom` seam so the cores stay free of wasm types.

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no root element")]
    NoRootElement,
    #[error("local storage unavailable")]
    StorageUnavailable,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
