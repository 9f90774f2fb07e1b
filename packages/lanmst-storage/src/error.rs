//! Error types for lanmst-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Serialization/deserialization errors
    Serialization,
    /// Node label not present in the store
    NodeNotFound,
    /// Edge not present in the store
    EdgeNotFound,
    /// Snapshot rejected on import (dangling endpoint, bad weight)
    InvalidSnapshot,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Serialization => "serialization",
            ErrorKind::NodeNotFound => "node_not_found",
            ErrorKind::EdgeNotFound => "edge_not_found",
            ErrorKind::InvalidSnapshot => "invalid_snapshot",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn node_not_found(label: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::NodeNotFound,
            format!("Node not found: {}", label.into()),
        )
    }

    pub fn edge_not_found(u: impl Into<String>, v: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::EdgeNotFound,
            format!("Edge not found: {} -- {}", u.into(), v.into()),
        )
    }

    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSnapshot, message)
    }
}

// JSON error conversions
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;
