//! Error types for nxconverge.
//!
//! This module defines the error types used throughout the reconciliation
//! engine. Errors fall into four classes: validation (raised before any
//! facade call), facade (raised by the device and propagated verbatim),
//! ambiguous matches (defects) and I/O or parsing problems at the edges.

use crate::facade::FacadeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nxconverge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for nxconverge.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A declared resource failed validation.
    #[error("Validation failed for '{resource}': {message}")]
    Validation {
        /// Resource reference, e.g. `cisco_bgp_neighbor[42 red 1.1.1.1]`
        resource: String,
        /// Error message
        message: String,
    },

    /// Resource kind not present in the schema registry.
    #[error("Unknown resource kind '{0}'")]
    UnknownKind(String),

    /// Property not declared by the kind's schema.
    #[error("Unknown property '{property}' for resource kind '{kind}'")]
    UnknownProperty {
        /// Resource kind name
        kind: String,
        /// Property name
        property: String,
    },

    /// Two or more properties were declared that cannot be combined.
    #[error("Properties {properties:?} of '{resource}' are mutually exclusive")]
    MutualExclusion {
        /// Resource reference
        resource: String,
        /// Conflicting properties
        properties: Vec<String>,
    },

    /// Property not supported on the device platform.
    #[error("Property '{property}' is not supported on platform '{platform}'")]
    Unsupported {
        /// Property name
        property: String,
        /// Platform name
        platform: String,
    },

    // ========================================================================
    // Facade Errors
    // ========================================================================
    /// Error raised by the device facade.
    #[error(transparent)]
    Facade(#[from] FacadeError),

    /// A composite key matched more than one enumerated instance.
    #[error("Identity '{identity}' of kind '{kind}' matched {count} instances")]
    AmbiguousMatch {
        /// Resource kind name
        kind: String,
        /// Identity that was looked up
        identity: String,
        /// Number of matches
        count: usize,
    },

    // ========================================================================
    // Manifest and IO Errors
    // ========================================================================
    /// Error loading a manifest.
    #[error("Failed to load manifest from '{path}': {message}")]
    ManifestLoad {
        /// Path to the manifest
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Generic error with source.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Creates a new unknown property error.
    pub fn unknown_property(kind: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            kind: kind.into(),
            property: property.into(),
        }
    }

    /// Creates a new manifest load error.
    pub fn manifest_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ManifestLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was raised before any facade call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::UnknownKind(_)
                | Error::UnknownProperty { .. }
                | Error::MutualExclusion { .. }
                | Error::Unsupported { .. }
        )
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Facade(_) | Error::AmbiguousMatch { .. } => 2,
            Error::ManifestLoad { .. } | Error::YamlParse(_) | Error::JsonParse(_) => 4,
            e if e.is_validation() => 4,
            _ => 1,
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Adds context with a closure that is only evaluated on error.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other {
            message: message.into(),
            source: Some(Box::new(e)),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| Error::Other {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_class() {
        assert!(Error::validation("cisco_vtp[default]", "bad").is_validation());
        assert!(Error::unknown_property("cisco_vtp", "bogus").is_validation());
        assert!(!Error::Config("x".into()).is_validation());
    }

    #[test]
    fn test_exit_codes() {
        let facade = Error::from(FacadeError::Connection("timed out".into()));
        assert_eq!(facade.exit_code(), 2);
        assert_eq!(Error::UnknownKind("nope".into()).exit_code(), 4);
        assert_eq!(Error::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_facade_message_is_verbatim() {
        let err = Error::from(FacadeError::Rejected {
            command: "set_metric_set".into(),
            message: "% Invalid command".into(),
        });
        assert_eq!(
            err.to_string(),
            FacadeError::Rejected {
                command: "set_metric_set".into(),
                message: "% Invalid command".into(),
            }
            .to_string()
        );
    }
}
