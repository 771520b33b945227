//! Model Context Protocol (MCP) Integration
//!
//! stdio JSON-RPC 2.0 server exposing the graph query tools to AI agents.
//!
//! # Usage
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "tools/call",
//!   "params": {
//!     "name": "find_connections",
//!     "arguments": { "entity_name": "alice", "min_strength": 5 }
//!   }
//! }
//! ```

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{handle_request, run_mcp_server, serve};
pub use types::{MCPError, MCPRequest, MCPResponse, RequestId};
