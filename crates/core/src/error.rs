/// Result alias that carries the custom [`TeatroError`] type.
pub type Result<T> = std::result::Result<T, TeatroError>;

/// Common error type for the core crate.
///
/// Rendering a node tree to text never fails; these variants only surface from
/// the side-effecting operations (file output, rasterization, external tools)
/// and from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum TeatroError {
    /// Free-form message for failures without a more specific category.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration or node-tree JSON that could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The rasterization backend rejected the canvas or could not encode it.
    #[error("raster error: {0}")]
    Raster(String),
    /// An external tool could not be launched or exited unsuccessfully.
    #[error("process error: {0}")]
    Process(String),
}

impl TeatroError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn raster<T: Into<String>>(msg: T) -> Self {
        Self::Raster(msg.into())
    }

    pub fn process<T: Into<String>>(msg: T) -> Self {
        Self::Process(msg.into())
    }
}

impl From<&str> for TeatroError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for TeatroError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
