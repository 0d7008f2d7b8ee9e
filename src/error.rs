use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("InvalidInput: {0}")]
    InvalidInput(String),
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to render figure: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("invalid figure parameters: {0}")]
    Config(#[from] serde_json::Error),
}
