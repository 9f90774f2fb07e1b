//! Error types for lanmst-engine

use thiserror::Error;

/// Failure of a spanning-tree computation
///
/// Only non-empty disconnected graphs fail; an empty graph yields an empty
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Some node cannot be reached from `start`; no partial forest is returned
    #[error(
        "Graph is not connected: {components} components, {} node(s) unreachable from '{start}'",
        unreachable.len()
    )]
    DisconnectedGraph {
        components: usize,
        start: String,
        unreachable: Vec<String>,
    },

    /// Frontier exhausted before the tree spanned a graph already checked as connected
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn internal(msg: impl Into<String>) -> Self {
        EngineError::Internal(msg.into())
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, EngineError::DisconnectedGraph { .. })
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_display() {
        let err = EngineError::DisconnectedGraph {
            components: 2,
            start: "A".to_string(),
            unreachable: vec!["C".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Graph is not connected: 2 components, 1 node(s) unreachable from 'A'"
        );
        assert!(err.is_disconnected());
    }

    #[test]
    fn test_internal() {
        let err = EngineError::internal("frontier exhausted");
        assert_eq!(err.to_string(), "Internal error: frontier exhausted");
        assert!(!err.is_disconnected());
    }
}
