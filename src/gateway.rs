//! API gateway - translate validated tool calls into Gumloop API requests.
//!
//! Every tool maps to a fixed (HTTP verb, path) pair in [`ROUTES`]. The
//! [`GumloopClient`] performs exactly one outbound request per call: GET
//! endpoints receive the arguments as query parameters, POST endpoints as
//! a JSON body, and every request carries the bearer credential. The
//! response is normalized into [`ApiResponse`] by declared content type.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};

/// HTTP shape of a Gumloop endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Arguments are serialized as URL query parameters.
    Get,
    /// Arguments are serialized as a JSON request body.
    Post,
}

/// A fixed (verb, path) pair on the Gumloop API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: &'static str,
}

/// Route table: public tool name to Gumloop endpoint, registered once.
///
/// Adding a tool means adding one row here plus its param struct and
/// method in `mcp::tools`; nothing else changes.
pub const ROUTES: &[(&str, Endpoint)] = &[
    (
        "startAutomation",
        Endpoint {
            verb: Verb::Post,
            path: "/start_pipeline",
        },
    ),
    (
        "retrieveRunDetails",
        Endpoint {
            verb: Verb::Get,
            path: "/get_pl_run",
        },
    ),
    (
        "listSavedFlows",
        Endpoint {
            verb: Verb::Get,
            path: "/list_saved_items",
        },
    ),
    (
        "listWorkbooks",
        Endpoint {
            verb: Verb::Get,
            path: "/list_workbooks",
        },
    ),
    (
        "retrieveInputSchema",
        Endpoint {
            verb: Verb::Get,
            path: "/get_inputs",
        },
    ),
    (
        "uploadFile",
        Endpoint {
            verb: Verb::Post,
            path: "/upload_file",
        },
    ),
    (
        "uploadMultipleFiles",
        Endpoint {
            verb: Verb::Post,
            path: "/upload_files",
        },
    ),
    (
        "downloadFile",
        Endpoint {
            verb: Verb::Post,
            path: "/download_file",
        },
    ),
    (
        "downloadMultipleFiles",
        Endpoint {
            verb: Verb::Post,
            path: "/download_files",
        },
    ),
];

/// Look up the endpoint for a public tool name.
pub fn endpoint_for(tool: &str) -> Result<Endpoint> {
    ROUTES
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, endpoint)| *endpoint)
        .ok_or_else(|| Error::UnknownTool(tool.to_string()))
}

/// Normalized Gumloop API response, tagged by declared content type.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// Decoded `application/json` document.
    Json(Value),
    /// Opaque payload of any other content type, passed through unparsed.
    Binary(Bytes),
}

/// Check whether a `Content-Type` header value declares JSON.
fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// HTTP client for the Gumloop API.
///
/// Holds the credential captured at startup; shared read-only across
/// calls and never mutated afterwards. No retries and no timeout beyond
/// the client defaults: a failure is surfaced immediately to the caller,
/// who owns the decision to retry.
#[derive(Clone)]
pub struct GumloopClient {
    http: Client,
    config: Config,
}

impl GumloopClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Perform the single outbound request for one tool call.
    ///
    /// `args` must be validated arguments; absent optional fields are
    /// omitted from the query string / body by their serde attributes.
    pub async fn call<T: Serialize>(&self, tool: &str, args: &T) -> Result<ApiResponse> {
        let endpoint = endpoint_for(tool)?;
        let url = format!("{}{}", self.config.base_url, endpoint.path);

        debug!("Gumloop {:?} {}", endpoint.verb, url);

        let request = match endpoint.verb {
            Verb::Get => self.http.get(&url).query(args),
            Verb::Post => self.http.post(&url).json(args),
        };

        let start = std::time::Instant::now();
        let response = request.bearer_auth(&self.config.api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let json = is_json_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let body = response.bytes().await?;

        info!(
            "Gumloop {:?} {} -> {} ({}ms)",
            endpoint.verb,
            endpoint.path,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        if json {
            Ok(ApiResponse::Json(serde_json::from_slice(&body)?))
        } else {
            Ok(ApiResponse::Binary(body))
        }
    }
}
