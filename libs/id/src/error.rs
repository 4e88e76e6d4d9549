//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Errors that can occur when encoding, decoding, or validating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier string is empty.
    #[error("identifier cannot be empty")]
    Empty,

    /// Fewer segments than the observed target kind requires.
    #[error("identifier should hold at least {required} parts, got {actual}")]
    InsufficientSegments { required: usize, actual: usize },

    /// More segments than the observed target kind allows.
    #[error("identifier should hold exactly {expected} parts, got {actual}")]
    UnexpectedSegments { expected: usize, actual: usize },

    /// The grant option flag is not a boolean literal.
    #[error("invalid with_grant_option value: expected 'true' or 'false', got '{0}'")]
    InvalidBool(String),

    /// The privilege list is empty or holds an empty entry.
    #[error("privilege list cannot be empty or contain empty entries: '{0}'")]
    EmptyPrivileges(String),

    /// Unrecognized literal at the target kind position.
    #[error("invalid DatabaseRoleGrantKind: {0}")]
    InvalidTargetKind(String),

    /// Unrecognized literal at the schema sub-kind position.
    #[error("invalid OnSchemaGrantKind: {0}")]
    InvalidSchemaGrantKind(String),

    /// Unrecognized literal at the schema object sub-kind position.
    #[error("invalid OnSchemaObjectGrantKind: {0}")]
    InvalidSchemaObjectGrantKind(String),

    /// Unrecognized literal at the bulk scope position.
    #[error("invalid OnSchemaObjectBulkScope: {0}")]
    InvalidBulkScope(String),

    /// Unrecognized object type literal.
    #[error("invalid ObjectType: {0}")]
    InvalidObjectType(String),

    /// A structured name segment failed dot/quote tokenization.
    #[error("malformed quoted name '{input}': {reason}")]
    MalformedQuotedName { input: String, reason: String },

    /// A structured name has the wrong number of parts for its position.
    #[error("expected a {expected}-part name, got {actual} part(s) in '{input}'")]
    InvalidNameParts {
        input: String,
        expected: usize,
        actual: usize,
    },

    /// The value handed to the encoder cannot be represented.
    ///
    /// This indicates a bug in the caller that built the value, not a user
    /// input error.
    #[error("invalid identifier state: {message}")]
    InvalidState { message: String },
}

impl IdError {
    /// Returns true if this error is about the number of segments.
    pub fn is_segment_count_error(&self) -> bool {
        matches!(
            self,
            IdError::InsufficientSegments { .. } | IdError::UnexpectedSegments { .. }
        )
    }

    /// Returns true if this error indicates an unknown kind or scope tag.
    pub fn is_kind_error(&self) -> bool {
        matches!(
            self,
            IdError::InvalidTargetKind(_)
                | IdError::InvalidSchemaGrantKind(_)
                | IdError::InvalidSchemaObjectGrantKind(_)
                | IdError::InvalidBulkScope(_)
        )
    }

    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        IdError::MalformedQuotedName {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        IdError::InvalidState {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_segments_message() {
        let err = IdError::InsufficientSegments {
            required: 4,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "identifier should hold at least 4 parts, got 2"
        );
        assert!(err.is_segment_count_error());
        assert!(!err.is_kind_error());
    }

    #[test]
    fn test_kind_error_messages() {
        let err = IdError::InvalidTargetKind("some-kind".to_string());
        assert_eq!(err.to_string(), "invalid DatabaseRoleGrantKind: some-kind");
        assert!(err.is_kind_error());

        let err = IdError::InvalidSchemaObjectGrantKind("OnSome".to_string());
        assert_eq!(err.to_string(), "invalid OnSchemaObjectGrantKind: OnSome");
    }
}
