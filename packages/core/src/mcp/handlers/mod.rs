//! MCP Request Handlers
//!
//! Handler modules for different MCP operations.

pub mod graph;
pub mod initialize;
pub mod tools;
