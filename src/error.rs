use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ViewerError::Dom(format!("{:?}", value))
    }
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to parse artwork catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("artwork catalogue is empty")]
    Empty,
}
