//! WebMCP Graph Core
//!
//! Read-only query layer over a knowledge graph of entities and weighted,
//! typed relationships, exposed to AI agents as MCP tools.
//!
//! # Architecture
//!
//! - **libsql**: Embedded SQLite-compatible store (`entities`, `relationships`)
//! - **QueryExecutor seam**: services issue parameterized SQL through a trait,
//!   so tests can wrap the store and inspect what was queried
//! - **Typed outcomes**: not-found and no-path are values, not errors; reports
//!   render to text at the tool boundary
//!
//! # Modules
//!
//! - [`models`] - Entity and relationship data structures
//! - [`db`] - Database layer with libsql integration and demo seed data
//! - [`services`] - GraphQueryService (connections, paths, clusters) and reports
//! - [`mcp`] - MCP stdio server for AI agent integration
//! - [`config`] - Runtime configuration from the environment

pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use services::*;
