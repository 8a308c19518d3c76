//! Error types for the Universign SDK.
//!
//! Construction errors (schema and business rules) are raised synchronously by
//! the validating constructors. Transport errors come from the remote call and
//! are passed through to the caller untouched.

use thiserror::Error;

/// Result type for Universign operations.
pub type Result<T> = std::result::Result<T, UniversignError>;

/// Errors that can occur when using the Universign SDK.
#[derive(Error, Debug)]
pub enum UniversignError {
    /// A field failed its schema rule (missing, empty or malformed).
    #[error("{entity} - \"{field}\" {reason}")]
    Validation {
        /// Entity being constructed.
        entity: &'static str,
        /// Offending field, using its protocol name.
        field: String,
        /// Violated constraint.
        reason: String,
    },

    /// A cross-field rule was violated before schema validation ran.
    #[error("{entity} - {message}")]
    BusinessRule {
        /// Entity being constructed.
        entity: &'static str,
        /// Which rule failed.
        message: String,
    },

    /// A raw JSON options bag could not be read.
    #[error("{entity} - invalid options: {source}")]
    InvalidOptions {
        /// Entity being constructed.
        entity: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP status {status_code}: {body}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Response body, as returned by the server.
        body: String,
    },

    /// Authentication error.
    #[error("Unauthorized: invalid credentials")]
    Unauthorized,

    /// The remote method returned an XML-RPC fault.
    #[error("XML-RPC fault {code}: {message}")]
    Fault {
        /// Fault code.
        code: i32,
        /// Fault string.
        message: String,
    },

    /// Malformed XML in a response.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A value cannot be represented in an XML-RPC request.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The response did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl UniversignError {
    /// Returns true if this error was raised while constructing an entity.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            UniversignError::Validation { .. }
                | UniversignError::BusinessRule { .. }
                | UniversignError::InvalidOptions { .. }
        )
    }

    /// Returns true if this is a retryable error.
    ///
    /// The SDK never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            UniversignError::Http(_) => true,
            UniversignError::Status { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            UniversignError::Unauthorized
                | UniversignError::Status {
                    status_code: 401 | 403,
                    ..
                }
        )
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UniversignError::Status { status_code, .. } => Some(*status_code),
            UniversignError::Unauthorized => Some(401),
            _ => None,
        }
    }
}
