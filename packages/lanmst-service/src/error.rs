use lanmst_engine::{EngineError, ExportError};
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failures surfaced by the service boundary
///
/// Declined mutations (duplicate node, missing endpoint) are not errors:
/// they come back as a status in the response body.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Graph is not connected")]
    Disconnected(#[source] EngineError),

    #[error("Engine error: {0}")]
    Engine(EngineError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        if err.is_disconnected() {
            ServiceError::Disconnected(err)
        } else {
            ServiceError::Engine(err)
        }
    }
}

impl ServiceError {
    pub fn invalid_request<E: std::fmt::Display>(e: E) -> Self {
        Self::InvalidRequest(e.to_string())
    }

    pub fn parse<E: std::fmt::Display>(e: E) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Disconnected(_) => ErrorCategory::Computation,
            ServiceError::InvalidRequest(_) | ServiceError::Parse(_) => ErrorCategory::Input,
            ServiceError::Engine(_)
            | ServiceError::Export(_)
            | ServiceError::Config(_)
            | ServiceError::Io(_) => ErrorCategory::Infrastructure,
        }
    }
}

/// Error category, so callers can surface failures distinctly
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The request is well-formed but the computation is impossible (disconnected graph)
    Computation,
    /// Malformed payload (e.g. non-numeric weight)
    Input,
    /// Filesystem, configuration or internal failure
    Infrastructure,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Computation => "computation",
            ErrorCategory::Input => "input",
            ErrorCategory::Infrastructure => "infrastructure",
        }
    }

    /// Status code a JSON front end would answer with
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCategory::Computation | ErrorCategory::Input => 400,
            ErrorCategory::Infrastructure => 500,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disconnected() -> EngineError {
        EngineError::DisconnectedGraph {
            components: 2,
            start: "A".to_string(),
            unreachable: vec!["C".to_string()],
        }
    }

    #[test]
    fn test_engine_error_routing() {
        let err: ServiceError = disconnected().into();
        assert!(matches!(err, ServiceError::Disconnected(_)));
        assert_eq!(err.to_string(), "Graph is not connected");
        assert_eq!(err.category(), ErrorCategory::Computation);

        let err: ServiceError = EngineError::internal("boom").into();
        assert!(matches!(err, ServiceError::Engine(_)));
        assert_eq!(err.category(), ErrorCategory::Infrastructure);
    }

    #[test]
    fn test_category_status() {
        assert_eq!(ErrorCategory::Computation.http_status(), 400);
        assert_eq!(ErrorCategory::Input.http_status(), 400);
        assert_eq!(ErrorCategory::Infrastructure.http_status(), 500);
        assert_eq!(
            ServiceError::invalid_request("weight").category(),
            ErrorCategory::Input
        );
    }
}
