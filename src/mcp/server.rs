//! Gumloop MCP server implementation.
//!
//! Wires the tool service to the stdio transport and runs it until the
//! client disconnects.

use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

use super::tools::GumloopService;

/// Gumloop MCP server.
///
/// Runs over the stdio transport, one client at a time; all run state
/// lives on the remote platform, so the server itself is stateless per
/// call.
pub struct GumloopMcpServer {
    service: GumloopService,
}

impl GumloopMcpServer {
    /// Create a new MCP server from an already-loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            service: GumloopService::new(config),
        }
    }

    /// Run the MCP server with stdio transport.
    pub async fn run_stdio(self) -> Result<()> {
        info!("Starting Gumloop MCP server (stdio transport)");

        let service = self
            .service
            .serve(stdio())
            .await
            .map_err(|e| Error::Transport(format!("MCP server error: {}", e)))?;

        // Wait for shutdown
        let quit_reason = service
            .waiting()
            .await
            .map_err(|e| Error::Transport(format!("MCP server error: {}", e)))?;

        info!("Gumloop MCP server stopped: {:?}", quit_reason);
        Ok(())
    }
}
