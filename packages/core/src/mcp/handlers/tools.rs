//! MCP Tools Handler
//!
//! Implements MCP-compliant tools/list and tools/call methods for the three
//! read-only graph tools. Tool failures are reported inside the result
//! (`isError: true`), only an unknown tool name is a JSON-RPC error.

use crate::mcp::handlers::graph;
use crate::mcp::types::MCPError;
use crate::models::{MAX_STRENGTH, MIN_STRENGTH};
use crate::services::graph_service::{
    DEFAULT_CONNECTION_LIMIT, DEFAULT_MAX_DEPTH, DEFAULT_MIN_CONNECTIONS, DEFAULT_MIN_STRENGTH,
    MAX_CONNECTION_LIMIT, MAX_PATH_DEPTH,
};
use crate::services::GraphQueryService;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Names of every tool this server exposes
pub const TOOL_NAMES: &[&str] = &["find_connections", "find_path", "analyze_clusters"];

/// Handle tools/list MCP request
///
/// The catalog is static; `params` (cursor) is ignored.
pub fn handle_tools_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "tools": get_tool_schemas()
    }))
}

/// Handle tools/call MCP request
///
/// Routes to the graph handler named by `params.name` with `params.arguments`
/// (an empty object when omitted) and wraps the text report in an MCP content
/// array.
#[instrument(skip(service, params), fields(tool = tracing::field::Empty))]
pub async fn handle_tools_call(
    service: &Arc<GraphQueryService>,
    params: Value,
) -> Result<Value, MCPError> {
    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing 'name' parameter".to_string()))?;
    tracing::Span::current().record("tool", tool_name);

    let arguments = match params.get("arguments") {
        Some(Value::Null) | None => json!({}),
        Some(arguments) => arguments.clone(),
    };

    let result = match tool_name {
        "find_connections" => graph::handle_find_connections(service, arguments).await,
        "find_path" => graph::handle_find_path(service, arguments).await,
        "analyze_clusters" => graph::handle_analyze_clusters(service, arguments).await,
        _ => {
            return Err(MCPError::invalid_params(format!(
                "Unknown tool: {} (available: {})",
                tool_name,
                TOOL_NAMES.join(", ")
            )))
        }
    };

    match result {
        Ok(text) => {
            debug!("tool {} produced {} bytes", tool_name, text.len());
            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "isError": false
            }))
        }
        Err(e) => {
            warn!("tool {} failed: {} (code: {})", tool_name, e.message, e.code);
            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": e.message
                }],
                "isError": true
            }))
        }
    }
}

/// JSON schemas for the graph tool catalog
fn get_tool_schemas() -> Value {
    json!([
        {
            "name": "find_connections",
            "description": "Find entities directly connected to a named entity. The name is matched as a case-insensitive fragment; an exact name match wins, then the most important entity. Results are grouped by relationship type and sorted by strength.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "entity_name": {
                        "type": "string",
                        "description": "Full or partial entity name, e.g. 'alice' or 'Rust'"
                    },
                    "min_strength": {
                        "type": "integer",
                        "description": "Only include relationships at least this strong",
                        "default": DEFAULT_MIN_STRENGTH,
                        "minimum": MIN_STRENGTH,
                        "maximum": MAX_STRENGTH
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of connections to return",
                        "default": DEFAULT_CONNECTION_LIMIT,
                        "minimum": 1,
                        "maximum": MAX_CONNECTION_LIMIT
                    }
                },
                "required": ["entity_name"]
            },
            "annotations": {
                "title": "Find connections",
                "readOnlyHint": true
            }
        },
        {
            "name": "find_path",
            "description": "Find the shortest chain of relationships linking two entities, ignoring relationship direction. Reports a direct connection when one exists, otherwise the entity names along the path.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "from_entity": {
                        "type": "string",
                        "description": "Full or partial name of the starting entity"
                    },
                    "to_entity": {
                        "type": "string",
                        "description": "Full or partial name of the target entity"
                    },
                    "max_depth": {
                        "type": "integer",
                        "description": "Maximum number of hops to search",
                        "default": DEFAULT_MAX_DEPTH,
                        "minimum": 1,
                        "maximum": MAX_PATH_DEPTH
                    }
                },
                "required": ["from_entity", "to_entity"]
            },
            "annotations": {
                "title": "Find path",
                "readOnlyHint": true
            }
        },
        {
            "name": "analyze_clusters",
            "description": "Summarize the graph: the most connected hub entities, entity counts per category, relationship counts per type, and how many entities have no relationships.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "min_connections": {
                        "type": "integer",
                        "description": "Minimum relationship count for an entity to be listed as a hub",
                        "default": DEFAULT_MIN_CONNECTIONS,
                        "minimum": 1
                    }
                }
            },
            "annotations": {
                "title": "Analyze clusters",
                "readOnlyHint": true
            }
        }
    ])
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;
