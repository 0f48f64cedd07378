use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong inside the renderer.
///
/// None of these reach the page as a visible error: a missing surface turns
/// the background into a no-op and drawing failures are logged and skipped.
#[derive(Debug, Error)]
pub enum RendererError {
    /// No 2D context could be acquired for the canvas
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,
    /// A host drawing call failed
    #[error("surface operation failed: {0}")]
    Surface(String),
    /// Configuration values out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Configuration JSON could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type RendererResult<T> = Result<T, RendererError>;

impl RendererError {
    pub(crate) fn from_js(op: &str, err: JsValue) -> Self {
        RendererError::Surface(format!("{op}: {err:?}"))
    }
}

impl From<RendererError> for JsValue {
    fn from(err: RendererError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
