//! MCP Initialize Handler
//!
//! Handles the MCP initialization handshake and capability discovery.
//! This is the first method called when a client connects to the server.

use crate::mcp::types::MCPError;
use serde_json::{json, Value};

/// Server name reported in `serverInfo`
pub const SERVER_NAME: &str = "webmcp-graph-server";

/// Supported MCP protocol versions, newest first
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Handle MCP initialize request
///
/// Echoes the client's protocol version when supported and advertises the
/// static tool capability. The client follows up with a
/// `notifications/initialized` notification, handled by the server loop.
///
/// # Errors
///
/// Returns error if:
/// - protocolVersion is missing
/// - Client requests unsupported protocol version
pub fn handle_initialize(params: Value) -> Result<Value, MCPError> {
    let client_version = params["protocolVersion"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing protocolVersion parameter".to_string()))?;

    if !SUPPORTED_PROTOCOL_VERSIONS.contains(&client_version) {
        return Err(MCPError::invalid_request(format!(
            "Unsupported protocol version: {}. Server supports: {:?}",
            client_version, SUPPORTED_PROTOCOL_VERSIONS
        )));
    }

    Ok(json!({
        "protocolVersion": client_version,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Read-only knowledge graph tools. Entity names are matched as case-insensitive fragments, so partial names like 'alice' work. Use find_connections to explore one entity, find_path to link two, and analyze_clusters for an overview."
    }))
}

#[cfg(test)]
#[path = "initialize_test.rs"]
mod initialize_test;
