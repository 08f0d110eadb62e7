//! Error taxonomy for the collaborators around the engine.
//!
//! The evaluation engine itself never fails; these errors come from lifecycle
//! sources, configuration loading and artifact writing.

/// eol-check errors.
#[derive(Debug, thiserror::Error)]
pub enum EolError {
    #[error("Product \"{0}\" not found in lifecycle data")]
    ProductNotFound(String),

    #[error("failed to fetch lifecycle data for {product}: {detail}")]
    Fetch { product: String, detail: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EolError {
    pub fn fetch(product: &str, detail: impl std::fmt::Display) -> Self {
        EolError::Fetch {
            product: product.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Result type for eol-check operations.
pub type Result<T> = std::result::Result<T, EolError>;
