//! Error types for script generation and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type PlotResult<T> = Result<T, PlotError>;

/// Everything that can go wrong while building or rendering a chart.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Input was the wrong type, out of domain, missing, or of mismatched length.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A value cannot be expressed as an R literal.
    #[error("type error: {0}")]
    Type(String),

    /// The operation is not allowed in the document's current state.
    #[error("invalid state: {0}")]
    State(String),

    #[error("failed to write script to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run interpreter '{interpreter}': {source}")]
    Execute {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    /// A chart description could not be parsed.
    #[error("invalid chart description: {0}")]
    Description(#[from] toml::de::Error),
}

impl PlotError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn type_err(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }
}

/// Failure raised by a domain value constructor.
///
/// Carries only the reason; the mapping engine attaches the field name when it
/// turns this into a [`PlotError::Validation`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct DomainError(pub String);

impl DomainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn into_validation(self, field: impl Into<String>) -> PlotError {
        PlotError::validation(field, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let err = PlotError::validation("color", "expected a color");
        assert_eq!(err.to_string(), "invalid color: expected a color");
        assert!(err.is_validation());
        assert!(!err.is_state());
    }

    #[test]
    fn test_domain_error_into_validation() {
        let err = DomainError::new("out of range").into_validation("size[0]");
        match err {
            PlotError::Validation { field, message } => {
                assert_eq!(field, "size[0]");
                assert_eq!(message, "out of range");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
