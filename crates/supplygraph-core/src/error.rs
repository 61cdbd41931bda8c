//! Error types for SupplyGraph Core

use thiserror::Error;

use crate::id::NodeId;

/// Result type alias using SupplyGraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// SupplyGraph error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("ID does not match existing node: {0}")]
    NotFound(NodeId),

    #[error("Node {id} is a {found}, expected {expected}")]
    TypeMismatch {
        id: NodeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid node ID: {0:?}")]
    InvalidId(String),

    #[error("Failed to retrieve {endpoint} for hasSourceAt {link}")]
    MissingEndpoint { link: NodeId, endpoint: &'static str },

    #[error("Must specify exactly one of {expected} for {path}")]
    CardinalityViolation { expected: &'static str, path: String },

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
