// src/mcp/response.rs
// Helper functions for MCP tool responses

use crate::error::RoadmapError;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialization failures are the only internal errors at this boundary
pub fn to_mcp_err(e: serde_json::Error) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

/// Create a success response with pretty JSON content
pub fn json_response<T: Serialize>(result: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(result).map_err(to_mcp_err)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Create a tool-level error result carrying the error's message
pub fn tool_error(err: &RoadmapError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_user_string())])
}
