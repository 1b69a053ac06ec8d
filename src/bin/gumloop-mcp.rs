//! Gumloop MCP server binary
//!
//! Run with: gumloop-mcp [OPTIONS]
//!
//! This binary starts the Gumloop MCP server, which exposes the Gumloop
//! automation platform via the Model Context Protocol. It can be used
//! with Claude Desktop, Claude Code, or any MCP-compatible client.
//!
//! ## Usage with Claude Desktop
//!
//! Add to `~/Library/Application Support/Claude/claude_desktop_config.json`:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "gumloop": {
//!       "command": "gumloop-mcp",
//!       "env": { "GUMLOOP_API_KEY": "<your key>" }
//!     }
//!   }
//! }
//! ```
//!
//! ## Usage with Claude Code
//!
//! Add to `.claude/settings.json`:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "gumloop": {
//!       "command": "gumloop-mcp",
//!       "env": { "GUMLOOP_API_KEY": "<your key>" }
//!     }
//!   }
//! }
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gumloop_mcp::{Config, GumloopMcpServer};

#[derive(Parser)]
#[command(name = "gumloop-mcp")]
#[command(about = "Gumloop MCP server - expose Gumloop automations via Model Context Protocol")]
#[command(version)]
struct Cli {
    /// Enable debug logging (writes to stderr)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is used for MCP transport)
    if cli.debug {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                "gumloop_mcp=debug,rmcp=debug",
            ))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new("gumloop_mcp=info"))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Fail fast: the server does not start accepting calls without the
    // bearer credential in the environment.
    let config = Config::from_env()?;

    tracing::info!("Starting Gumloop MCP server against {}", config.base_url);

    let server = GumloopMcpServer::new(config);
    server.run_stdio().await?;

    Ok(())
}
