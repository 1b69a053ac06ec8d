//! Error types for the Gumloop MCP server.
//!
//! All errors are designed to be agent-friendly: each variant carries a
//! stable code that AI agents can parse and act upon.

use thiserror::Error;

/// Result type alias for gumloop-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// gumloop-mcp error types.
///
/// Each error variant includes a code that agents can parse programmatically.
#[derive(Error, Debug)]
pub enum Error {
    /// The credential (or other required configuration) is missing at
    /// startup. Fatal: the server does not start accepting calls.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A call's arguments failed structural checks.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The Gumloop API answered with a failing HTTP status. The response
    /// body is not parsed in this case.
    #[error("Gumloop API error: {status} {status_text}")]
    Remote { status: u16, status_text: String },

    /// A call referenced a tool name not present in the route table.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The stdio transport failed to initialize or serve.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error code for agent parsing.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Remote { .. } => "REMOTE_ERROR",
            Error::UnknownTool(_) => "UNKNOWN_TOOL",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Http(_) => "HTTP_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Config("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(Error::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(
            Error::Remote {
                status: 404,
                status_text: "Not Found".into()
            }
            .code(),
            "REMOTE_ERROR"
        );
        assert_eq!(Error::UnknownTool("x".into()).code(), "UNKNOWN_TOOL");
        assert_eq!(Error::Transport("x".into()).code(), "TRANSPORT_ERROR");
    }

    #[test]
    fn test_remote_error_display_carries_status() {
        let err = Error::Remote {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));
    }

    #[test]
    fn test_validation_error_names_constraint() {
        let err = Error::Validation("either user_id or project_id must be provided".into());
        assert!(err.to_string().contains("user_id"));
        assert!(err.to_string().contains("project_id"));
    }
}
