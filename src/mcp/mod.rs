//! Gumloop MCP server.
//!
//! Exposes the Gumloop automation platform via the Model Context Protocol
//! so AI agents (Claude Desktop, Claude Code, etc.) can start automations,
//! inspect run state, enumerate saved flows, and move files in and out of
//! the platform.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gumloop_mcp::{Config, GumloopMcpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = GumloopMcpServer::new(Config::from_env()?);
//!     server.run_stdio().await?;
//!     Ok(())
//! }
//! ```

mod server;
mod tools;

pub use server::GumloopMcpServer;
pub use tools::GumloopService;
