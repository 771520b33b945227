//! MCP JSON-RPC 2.0 Types
//!
//! Type definitions for Model Context Protocol communication.
//! Implements JSON-RPC 2.0 specification for stdio-based MCP transport.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept only the "2.0" protocol marker
fn deserialize_jsonrpc_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let version = String::deserialize(deserializer)?;
    if version != "2.0" {
        return Err(serde::de::Error::custom(format!(
            "unsupported jsonrpc version: {}",
            version
        )));
    }
    Ok(version)
}

/// JSON-RPC 2.0 request identifier
///
/// Clients may use numbers or strings; `Null` is echoed when the id of a
/// malformed message cannot be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
    Null,
}

impl RequestId {
    /// Recover the id of a message that failed to parse as a request
    pub fn from_message(message: &Value) -> Self {
        message
            .get("id")
            .and_then(|id| serde_json::from_value(id.clone()).ok())
            .unwrap_or(Self::Null)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Null => write!(f, "null"),
        }
    }
}

/// JSON-RPC 2.0 request structure
///
/// # Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 7,
///     "method": "tools/call",
///     "params": {
///         "name": "find_path",
///         "arguments": { "from_entity": "Alice", "to_entity": "Rust" }
///     }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct MCPRequest {
    /// JSON-RPC version (must be "2.0")
    #[serde(deserialize_with = "deserialize_jsonrpc_version")]
    pub jsonrpc: String,

    /// Request identifier (used to match responses)
    pub id: RequestId,

    /// Method name to invoke
    pub method: String,

    /// Method parameters as JSON value
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 notification (a request without an id; never answered)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MCPNotification {
    #[serde(deserialize_with = "deserialize_jsonrpc_version")]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 response structure
///
/// `result` and `error` are mutually exclusive; the absent one is omitted.
#[derive(Debug, Serialize)]
pub struct MCPResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matches request)
    pub id: RequestId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

/// JSON-RPC 2.0 error structure
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MCPError {
    /// Error code (standard JSON-RPC or graph-server specific)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Optional structured detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// JSON-RPC 2.0 standard error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

// Graph server error codes (application errors: -32000 to -32099)
pub const STORE_ERROR: i32 = -32000;
pub const SEARCH_CANCELLED: i32 = -32001;

impl MCPError {
    fn new(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    /// Create a parse error
    pub fn parse_error(message: String) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    /// Create an invalid request error
    pub fn invalid_request(message: String) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    /// Create a method not found error
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Create an invalid params error
    pub fn invalid_params(message: String) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    /// Create a store failure error
    pub fn store_error(message: String) -> Self {
        Self::new(STORE_ERROR, message)
    }

    /// Create a cancelled search error
    pub fn search_cancelled(message: String) -> Self {
        Self::new(SEARCH_CANCELLED, message)
    }

    /// Attach structured detail
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl MCPResponse {
    /// Create a success response
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: RequestId, error: MCPError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
