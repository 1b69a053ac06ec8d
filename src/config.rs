//! Configuration management.
//!
//! The server is configured entirely from environment variables, read once
//! at startup:
//!
//! - `GUMLOOP_API_KEY`: bearer credential for the Gumloop API (required)
//! - `GUMLOOP_API_URL`: base URL override (default: the public API)
//!
//! The credential is captured into an immutable [`Config`] and injected
//! into the gateway's constructor; no other code reads the environment.

use crate::error::{Error, Result};

/// Default base address of the Gumloop REST API.
pub const DEFAULT_API_URL: &str = "https://api.gumloop.com/api/v1";

/// Immutable server configuration, captured once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential sent with every Gumloop API request.
    pub api_key: String,
    /// Base URL of the Gumloop API, without a trailing slash.
    pub base_url: String,
}

impl Config {
    /// Build a configuration from explicit values.
    ///
    /// Used by tests and embedders that manage credentials themselves.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Fails with a [`Error::Config`] when `GUMLOOP_API_KEY` is absent or
    /// empty, so the process can refuse to start accepting calls.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GUMLOOP_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("GUMLOOP_API_KEY environment variable is not set".to_string())
            })?;

        let base_url =
            std::env::var("GUMLOOP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self::new(api_key, base_url))
    }
}
