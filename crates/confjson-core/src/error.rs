//! Error types for configuration encoding, decoding and file transport.

use thiserror::Error;

/// Errors raised while turning a [`ConfigValue`](crate::ConfigValue) into a document.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A registered serializer rejected the object it was asked to flatten.
    #[error("failed to serialize object of type '{alias}': {message}")]
    Serialization { alias: String, message: String },

    /// JSON has no literal for NaN or infinities.
    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),

    /// The number printer produced text the JSON number parser refused.
    #[error("invalid numeric literal '{0}'")]
    InvalidLiteral(String),

    /// A mapping or an object's field set used a key the document format reserves.
    #[error("reserved key '{key}' is not allowed in {place}")]
    ReservedKey { key: &'static str, place: String },
}

/// Errors raised while turning a document back into a [`ConfigValue`](crate::ConfigValue).
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The text was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An object carried the type-alias key but no constructor is registered for it.
    #[error("no object type registered for alias '{0}'")]
    UnregisteredAlias(String),

    /// A node of the wrong kind appeared where a specific kind is required.
    #[error("expected {expected}, found {found}")]
    UnexpectedNode {
        expected: &'static str,
        found: &'static str,
    },

    /// The text used a key the JSON number transport claims for itself.
    #[error("reserved key '{0}' is not allowed in a document")]
    ReservedKey(&'static str),

    /// A numeric literal that none of the width rules accept.
    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),

    /// The registry refused to rebuild an object from its fields.
    #[error("failed to reconstruct object of type '{alias}': {source}")]
    Reconstruction {
        alias: String,
        #[source]
        source: ReconstructionError,
    },
}

/// Returned by a registered constructor when a field set does not describe a valid object.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ReconstructionError {
    pub message: String,
}

impl ReconstructionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shorthand for the most common failure: a required field is absent or has the wrong kind.
    pub fn missing_field(field: &str, expected: &str) -> Self {
        Self::new(format!("field '{field}' must be {expected}"))
    }
}

/// Errors surfaced by the file-level [`JsonConfiguration`](crate::JsonConfiguration) API.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A path segment was empty or ran through a non-section entry.
    #[error("invalid path '{0}'")]
    InvalidPath(String),
}

/// Convenience alias used by the file-level API.
pub type Result<T> = std::result::Result<T, ConfigError>;
