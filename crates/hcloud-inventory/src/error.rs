//! Error types for hcloud-inventory

use thiserror::Error;

/// Errors that can occur while collecting or rendering an inventory
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// The server listing could not be fetched
    #[error("failed to list servers ({source_type}): {message}")]
    ListFailed {
        /// Kind of lister that failed (e.g. "hcloud")
        source_type: &'static str,
        /// Underlying error message
        message: String,
    },

    /// The inventory could not be serialized
    #[error("JSON serialization failed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialize(err.to_string())
    }
}
