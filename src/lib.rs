//! gumloop-mcp - Gumloop over the Model Context Protocol
//!
//! A protocol adapter that exposes the Gumloop workflow-automation
//! platform's REST API as MCP tools, so an AI agent can start
//! automations, inspect run state, enumerate saved flows and workbooks,
//! and move files in and out of the platform.
//!
//! ## Key properties
//!
//! - **Stateless per call**: every tool call is one validated, bearer-
//!   authenticated HTTP request against the Gumloop API; no local state,
//!   no retries, no cross-call correlation.
//! - **Structural validation first**: required fields and the
//!   user/project either-or constraint are checked before any network
//!   activity.
//! - **Agent-friendly failures**: every error becomes an error-flagged
//!   tool result with a parseable code; a bad call never takes the
//!   server down.
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

pub mod config;
pub mod error;
pub mod gateway;
pub mod mcp;

pub use config::Config;
pub use error::{Error, Result};
pub use mcp::GumloopMcpServer;
