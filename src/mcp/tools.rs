//! MCP tool definitions for the Gumloop API.
//!
//! Each tool pairs a typed parameter struct (the published input schema)
//! with a method that validates, forwards the call through the gateway,
//! and renders the outcome as a tool result. Structural checks happen
//! before any network activity: required fields are enforced by
//! deserialization into the param struct, and the user/project either-or
//! constraint by [`require_scope`].

use rmcp::{model::*, tool, Error as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{self, Error};
use crate::gateway::{ApiResponse, GumloopClient};

/// Gumloop MCP service - handles all tool calls.
#[derive(Clone)]
pub struct GumloopService {
    client: GumloopClient,
}

impl GumloopService {
    pub fn new(config: Config) -> Self {
        Self {
            client: GumloopClient::new(config),
        }
    }
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// A named input passed to a flow's input node at run start.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PipelineInput {
    /// Name of the input node in the flow
    pub input_name: String,
    /// Value supplied to that input
    pub value: Value,
}

/// Parameters for starting an automation run
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StartAutomationParams {
    /// ID of the user the saved flow belongs to
    pub user_id: String,
    /// ID of the saved flow to run
    pub saved_item_id: String,
    /// Project the saved flow is scoped to, for workspace flows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Inputs for the flow's input nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_inputs: Option<Vec<PipelineInput>>,
}

/// Parameters for retrieving run details
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RetrieveRunDetailsParams {
    /// ID of the flow run to inspect
    pub run_id: String,
    /// ID of the user who started the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project the run is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for listing saved flows
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListSavedFlowsParams {
    /// ID of the user whose saved flows to list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project whose saved flows to list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for listing workbooks
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListWorkbooksParams {
    /// ID of the user whose workbooks to list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project whose workbooks to list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for retrieving a flow's input schema
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RetrieveInputSchemaParams {
    /// ID of the saved flow whose input nodes to describe
    pub saved_item_id: String,
    /// ID of the user the saved flow belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project the saved flow is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for uploading a single file
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadFileParams {
    /// Name to store the file under
    pub file_name: String,
    /// Contents of the file
    pub file_content: String,
    /// ID of the user to upload for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project to upload into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// One file in a multi-file upload.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FileUpload {
    /// Name to store the file under
    pub file_name: String,
    /// Contents of the file
    pub file_content: String,
}

/// Parameters for uploading multiple files
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadMultipleFilesParams {
    /// Files to upload
    pub files: Vec<FileUpload>,
    /// ID of the user to upload for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project to upload into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for downloading a single file
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DownloadFileParams {
    /// Name of the file to download
    pub file_name: String,
    /// ID of the run that produced the file
    pub run_id: String,
    /// ID of the saved flow the run belongs to
    pub saved_item_id: String,
}

/// Parameters for downloading multiple files
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DownloadMultipleFilesParams {
    /// Names of the files to download
    pub file_names: Vec<String>,
    /// ID of the run that produced the files
    pub run_id: String,
    /// ID of the user who started the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Project the run is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

// ============================================================================
// Validation & Rendering
// ============================================================================

/// Shared either-or constraint: calls scoped to a user or a project must
/// name at least one of the two.
fn require_scope(user_id: &Option<String>, project_id: &Option<String>) -> error::Result<()> {
    if user_id.is_none() && project_id.is_none() {
        return Err(Error::Validation(
            "either user_id or project_id must be provided".to_string(),
        ));
    }
    Ok(())
}

fn error_result(err: &Error) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}

/// Render a gateway outcome whose success payload is a JSON document.
fn render_json(outcome: error::Result<ApiResponse>) -> CallToolResult {
    match outcome {
        Ok(ApiResponse::Json(value)) => CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&value).unwrap_or_default(),
        )]),
        Ok(ApiResponse::Binary(bytes)) => CallToolResult::success(vec![Content::text(format!(
            "Received {} bytes of non-JSON response data",
            bytes.len()
        ))]),
        Err(err) => error_result(&err),
    }
}

/// Render a download outcome. The result channel is text-only: binary
/// payloads are acknowledged with a confirmation, never embedded.
fn render_download(outcome: error::Result<ApiResponse>, what: &str) -> CallToolResult {
    match outcome {
        Ok(ApiResponse::Binary(bytes)) => CallToolResult::success(vec![Content::text(format!(
            "Downloaded {} ({} bytes)",
            what,
            bytes.len()
        ))]),
        other => render_json(other),
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool(tool_box)]
impl GumloopService {
    /// Start a run of a saved flow.
    #[tool(
        name = "startAutomation",
        description = "Start a Gumloop automation (saved flow). Returns the run ID for tracking."
    )]
    pub async fn start_automation(
        &self,
        #[tool(aggr)] params: StartAutomationParams,
    ) -> Result<CallToolResult, McpError> {
        Ok(render_json(
            self.client.call("startAutomation", &params).await,
        ))
    }

    /// Get the state and logs of one run.
    #[tool(
        name = "retrieveRunDetails",
        description = "Retrieve the state, logs, and outputs of an automation run."
    )]
    pub async fn retrieve_run_details(
        &self,
        #[tool(aggr)] params: RetrieveRunDetailsParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(
            self.client.call("retrieveRunDetails", &params).await,
        ))
    }

    /// Enumerate saved flows for a user or project.
    #[tool(
        name = "listSavedFlows",
        description = "List the saved flows available to a user or project."
    )]
    pub async fn list_saved_flows(
        &self,
        #[tool(aggr)] params: ListSavedFlowsParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(self.client.call("listSavedFlows", &params).await))
    }

    /// Enumerate workbooks (groupings of saved flows).
    #[tool(
        name = "listWorkbooks",
        description = "List the workbooks available to a user or project."
    )]
    pub async fn list_workbooks(
        &self,
        #[tool(aggr)] params: ListWorkbooksParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(self.client.call("listWorkbooks", &params).await))
    }

    /// Describe the inputs a saved flow expects.
    #[tool(
        name = "retrieveInputSchema",
        description = "Retrieve the input schema of a saved flow: the inputs it expects at run start."
    )]
    pub async fn retrieve_input_schema(
        &self,
        #[tool(aggr)] params: RetrieveInputSchemaParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(
            self.client.call("retrieveInputSchema", &params).await,
        ))
    }

    /// Upload one file for use as flow input.
    #[tool(
        name = "uploadFile",
        description = "Upload a single file to Gumloop so flows can use it as input."
    )]
    pub async fn upload_file(
        &self,
        #[tool(aggr)] params: UploadFileParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(self.client.call("uploadFile", &params).await))
    }

    /// Upload several files in one call.
    #[tool(
        name = "uploadMultipleFiles",
        description = "Upload multiple files to Gumloop in a single call."
    )]
    pub async fn upload_multiple_files(
        &self,
        #[tool(aggr)] params: UploadMultipleFilesParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        Ok(render_json(
            self.client.call("uploadMultipleFiles", &params).await,
        ))
    }

    /// Download one file produced by a run.
    #[tool(
        name = "downloadFile",
        description = "Download a file produced by an automation run. Confirms the transfer; file contents are not returned in the text result."
    )]
    pub async fn download_file(
        &self,
        #[tool(aggr)] params: DownloadFileParams,
    ) -> Result<CallToolResult, McpError> {
        let what = params.file_name.clone();
        Ok(render_download(
            self.client.call("downloadFile", &params).await,
            &what,
        ))
    }

    /// Download several files produced by a run.
    #[tool(
        name = "downloadMultipleFiles",
        description = "Download multiple files produced by an automation run. Confirms the transfer; file contents are not returned in the text result."
    )]
    pub async fn download_multiple_files(
        &self,
        #[tool(aggr)] params: DownloadMultipleFilesParams,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = require_scope(&params.user_id, &params.project_id) {
            return Ok(error_result(&err));
        }
        let what = format!("{} file(s)", params.file_names.len());
        Ok(render_download(
            self.client.call("downloadMultipleFiles", &params).await,
            &what,
        ))
    }
}

#[tool(tool_box)]
impl ServerHandler for GumloopService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Gumloop is a workflow automation platform. Use tools to start automations, \
                 inspect run state, list saved flows and workbooks, and move files in and out \
                 of the platform."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gumloop-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    fn result_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap_or("").to_string()
    }

    #[test]
    fn test_start_automation_requires_user_and_item() {
        let missing_item = json!({ "user_id": "u1" });
        assert!(serde_json::from_value::<StartAutomationParams>(missing_item).is_err());

        let missing_user = json!({ "saved_item_id": "s1" });
        assert!(serde_json::from_value::<StartAutomationParams>(missing_user).is_err());

        let complete = json!({ "user_id": "u1", "saved_item_id": "s1" });
        let params = serde_json::from_value::<StartAutomationParams>(complete).unwrap();
        assert!(params.project_id.is_none());
        assert!(params.pipeline_inputs.is_none());
    }

    #[test]
    fn test_start_automation_accepts_pipeline_inputs() {
        let params: StartAutomationParams = serde_json::from_value(json!({
            "user_id": "u1",
            "saved_item_id": "s1",
            "pipeline_inputs": [
                { "input_name": "query", "value": "quarterly report" },
                { "input_name": "limit", "value": 5 }
            ]
        }))
        .unwrap();

        let inputs = params.pipeline_inputs.as_ref().unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].input_name, "query");
    }

    #[test]
    fn test_download_file_requires_all_fields() {
        for incomplete in [
            json!({ "run_id": "r1", "saved_item_id": "s1" }),
            json!({ "file_name": "out.csv", "saved_item_id": "s1" }),
            json!({ "file_name": "out.csv", "run_id": "r1" }),
        ] {
            assert!(serde_json::from_value::<DownloadFileParams>(incomplete).is_err());
        }

        let complete = json!({ "file_name": "out.csv", "run_id": "r1", "saved_item_id": "s1" });
        assert!(serde_json::from_value::<DownloadFileParams>(complete).is_ok());
    }

    #[test]
    fn test_upload_multiple_files_shape() {
        let params: UploadMultipleFilesParams = serde_json::from_value(json!({
            "files": [
                { "file_name": "a.txt", "file_content": "alpha" },
                { "file_name": "b.txt", "file_content": "beta" }
            ],
            "project_id": "p1"
        }))
        .unwrap();
        assert_eq!(params.files.len(), 2);
        assert_eq!(params.files[1].file_name, "b.txt");

        let bad = json!({ "files": [{ "file_name": "a.txt" }], "project_id": "p1" });
        assert!(serde_json::from_value::<UploadMultipleFilesParams>(bad).is_err());
    }

    #[test]
    fn test_require_scope() {
        let err = require_scope(&None, &None).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("user_id"));
        assert!(err.to_string().contains("project_id"));

        assert!(require_scope(&Some("u1".into()), &None).is_ok());
        assert!(require_scope(&None, &Some("p1".into())).is_ok());
        assert!(require_scope(&Some("u1".into()), &Some("p1".into())).is_ok());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let params = ListSavedFlowsParams {
            user_id: Some("u1".to_string()),
            project_id: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("user_id"), Some(&json!("u1")));
        assert!(!object.contains_key("project_id"));
    }

    #[test]
    fn test_post_body_is_verbatim() {
        let params: StartAutomationParams = serde_json::from_value(json!({
            "user_id": "u1",
            "saved_item_id": "s1",
            "pipeline_inputs": [{ "input_name": "query", "value": "x" }]
        }))
        .unwrap();

        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(
            body,
            json!({
                "user_id": "u1",
                "saved_item_id": "s1",
                "pipeline_inputs": [{ "input_name": "query", "value": "x" }]
            })
        );
    }

    #[test]
    fn test_render_json_roundtrips_document() {
        let document = json!({ "run_id": "r1", "state": "RUNNING", "outputs": [1, 2, 3] });
        let result = render_json(Ok(ApiResponse::Json(document.clone())));

        assert_ne!(result.is_error, Some(true));
        let reparsed: Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_render_download_acknowledges_bytes() {
        let payload = Bytes::from_static(b"\x00\x01binary payload");
        let size = payload.len();
        let result = render_download(Ok(ApiResponse::Binary(payload)), "out.csv");

        assert_ne!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.contains("out.csv"));
        assert!(text.contains(&size.to_string()));
        assert!(!text.contains('\u{0}'));
    }

    #[test]
    fn test_render_download_passes_json_through() {
        let document = json!({ "url": "https://example.com/out.csv" });
        let result = render_download(Ok(ApiResponse::Json(document.clone())), "out.csv");
        let reparsed: Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_remote_failure_is_error_flagged() {
        let result = render_json(Err(Error::Remote {
            status: 404,
            status_text: "Not Found".to_string(),
        }));

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.contains("404"));
    }

    #[test]
    fn test_validation_failure_is_error_flagged() {
        let err = require_scope(&None, &None).unwrap_err();
        let result = error_result(&err);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("user_id"));
    }
}
