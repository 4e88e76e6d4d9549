//! Error types for state mapping and upgrades.

use snowgrant_id::IdError;
use thiserror::Error;

/// Errors that can occur when mapping configuration or persisted state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The identifier could not be decoded or encoded.
    #[error(transparent)]
    Id(#[from] IdError),

    /// A configuration block is inconsistent.
    #[error("invalid configuration for '{field}': {reason}")]
    Config { field: String, reason: String },

    /// The persisted state was written by an unknown schema version.
    #[error("unsupported state schema version: {0}")]
    UnsupportedVersion(u64),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StateError {
    pub(crate) fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StateError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error comes from the identifier codec.
    pub fn is_id_error(&self) -> bool {
        matches!(self, StateError::Id(_))
    }
}

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Serialization(err.to_string())
    }
}
