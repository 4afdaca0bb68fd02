//! Error types for world atlas operations.

use thiserror::Error;

/// Unified error type for registry, graph, and configuration operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A supplied value breaks a domain rule (empty field, self relation,
    /// type mismatch, cross-world reference, would-be cycle, duplicate name).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A relationship label outside the catalog.
    #[error("Unknown relationship type: {0}")]
    UnknownRelationship(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorldError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error naming what was missing.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, WorldError>;
