use thiserror::Error;

/// Failures from the browser-facing ports. None of these end a run; callers
/// log them and carry on in a degraded mode.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no browser window")]
    NoWindow,
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("storage access failed: {0}")]
    Storage(String),
    #[error("settings could not be encoded: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("audio is unavailable: {0}")]
    Audio(String),
    #[error("canvas has no 2d context")]
    NoCanvasContext,
    #[error("share failed: {0}")]
    Share(String),
}

impl PlatformError {
    /// Wraps an opaque JS exception, keeping its printable form.
    pub fn js(wrap: fn(String) -> Self, value: wasm_bindgen::JsValue) -> Self {
        wrap(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
