//! Error types for flag accumulation and environment loading.

use std::convert::Infallible;
use thiserror::Error;

/// Result type for toolchain flag operations.
pub type Result<T> = std::result::Result<T, FlagsError>;

/// Errors that can occur while accumulating or applying flags.
#[derive(Debug, Error)]
pub enum FlagsError {
    /// Value is neither a string nor a list of strings.
    #[error("value must be string or list of strings, got {type_name}")]
    InvalidValue { type_name: &'static str },

    /// A list element is not a string.
    #[error("value must be string or list of strings, element {index} is {type_name}")]
    InvalidElement {
        index: usize,
        type_name: &'static str,
    },

    /// Category name is not one of CPPFLAGS, CFLAGS, CXXFLAGS or LINKFLAGS.
    #[error("unknown flag category: {0}")]
    UnknownCategory(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlagsError {
    /// Whether this error rejects the shape of a flag value.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            FlagsError::InvalidValue { .. } | FlagsError::InvalidElement { .. }
        )
    }
}

impl From<Infallible> for FlagsError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl From<serde_json::Error> for FlagsError {
    fn from(err: serde_json::Error) -> Self {
        FlagsError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FlagsError {
    fn from(err: serde_yaml::Error) -> Self {
        FlagsError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_error_names_type() {
        let err = FlagsError::InvalidElement {
            index: 1,
            type_name: "number",
        };
        assert_eq!(
            err.to_string(),
            "value must be string or list of strings, element 1 is number"
        );
        assert!(err.is_type_error());
    }

    #[test]
    fn test_unknown_category_is_not_type_error() {
        let err = FlagsError::UnknownCategory("LDFLAGS".to_string());
        assert!(!err.is_type_error());
        assert!(err.to_string().contains("LDFLAGS"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FlagsError = json_err.into();
        assert!(matches!(err, FlagsError::Serialization(_)));
    }
}
