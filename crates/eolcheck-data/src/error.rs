//! Error types for eolcheck-data

use eolcheck_core::EolError;
use thiserror::Error;

/// Errors that can occur while loading lifecycle data
#[derive(Error, Debug)]
pub enum DataError {
    /// Product slug unknown to the lifecycle API
    #[error("Product \"{0}\" not found on endoflife.date (404)")]
    NotFound(String),

    /// Non-success HTTP status other than 404
    #[error("Failed to fetch EOL data for {product}: HTTP {status}")]
    Status { product: String, status: u16 },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Cache directory or entry problem
    #[error("Cache error: {0}")]
    Cache(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::Http(err.to_string())
    }
}

impl DataError {
    /// Convert into the engine-facing error for `product`.
    pub fn into_eol_error(self, product: &str) -> EolError {
        match self {
            DataError::NotFound(p) => EolError::ProductNotFound(p),
            DataError::Io(e) => EolError::Io(e),
            DataError::Json(e) => EolError::Serialization(e),
            other => EolError::fetch(product, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = DataError::NotFound("nodejz".to_string());
        assert_eq!(
            err.to_string(),
            "Product \"nodejz\" not found on endoflife.date (404)"
        );
        assert!(matches!(
            err.into_eol_error("nodejz"),
            EolError::ProductNotFound(p) if p == "nodejz"
        ));
    }

    #[test]
    fn status_maps_to_fetch() {
        let err = DataError::Status {
            product: "python".to_string(),
            status: 503,
        };
        match err.into_eol_error("python") {
            EolError::Fetch { product, detail } => {
                assert_eq!(product, "python");
                assert!(detail.contains("HTTP 503"));
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
    }
}
