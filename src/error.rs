//! Error types for the onedevx deployment composer.
//!
//! This module provides the error hierarchy for the whole installation run:
//! specification loading and resolution, and resource creation against the
//! cluster backend.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the onedevx deployment composer.
#[derive(Debug, Error)]
pub enum OnedevxError {
    /// Specification-related errors (loading, decoding, resolution).
    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),

    /// Cluster backend errors.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specification-related errors.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The specification file was not found.
    #[error("Specification file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The specification file could not be read.
    #[error("Failed to read specification file: {message}")]
    ReadError {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Description of the read failure.
        message: String,
    },

    /// The specification file could not be decoded.
    #[error("Failed to parse specification: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Directory traversal failed.
    #[error("Directory walk failed: {message}")]
    Walk {
        /// Path at which the traversal failed, when known.
        path: Option<PathBuf>,
        /// Description of the traversal failure.
        message: String,
    },

    /// The component declares a type the composer cannot synthesize.
    #[error("Unsupported component type: {component_type}")]
    UnsupportedComponentType {
        /// The offending type string.
        component_type: String,
    },

    /// A field required by the declared component type is missing or empty.
    #[error("Component '{component}' is missing required field: {field}")]
    MissingField {
        /// Name of the component.
        component: String,
        /// The missing field.
        field: String,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },
}

/// Cluster backend errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// API request failed.
    #[error("Cluster API request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Network error.
    #[error("Network error communicating with the cluster: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid response from the cluster API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },

    /// Helm chart installation failed.
    #[error("Helm chart installation failed for release '{release}': {message}")]
    ChartInstallFailed {
        /// Name of the release being installed.
        release: String,
        /// Description of the installation failure.
        message: String,
    },
}

/// Result type alias for onedevx operations.
pub type Result<T> = std::result::Result<T, OnedevxError>;

impl OnedevxError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl SpecError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Creates an unsupported-component-type error.
    #[must_use]
    pub fn unsupported(component_type: impl Into<String>) -> Self {
        Self::UnsupportedComponentType {
            component_type: component_type.into(),
        }
    }
}

impl BackendError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }
}
