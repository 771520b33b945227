//! WebMCP Graph MCP Server
//!
//! Serves the read-only graph tools (`find_connections`, `find_path`,
//! `analyze_clusters`) over stdio JSON-RPC.
//!
//! # Usage
//!
//! ```bash
//! GRAPH_DB_PATH=/tmp/graph.db RUST_LOG=debug cargo run --bin graph-mcp
//! ```
//!
//! stdout is the protocol channel; logs are written to stderr.

use std::sync::Arc;

use webmcp_graph_core::config::ServerConfig;
use webmcp_graph_core::db::{seed_demo_graph, DatabaseService};
use webmcp_graph_core::mcp::run_mcp_server;
use webmcp_graph_core::services::GraphQueryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🚀 WebMCP graph server");

    let config = ServerConfig::from_env()?;
    tracing::info!("📁 Database: {}", config.database_path.display());

    let db = DatabaseService::new(config.database_path.clone()).await?;

    if config.seed_demo {
        seed_demo_graph(&db).await?;
    }

    let service = Arc::new(GraphQueryService::new(Arc::new(db)));

    run_mcp_server(service).await
}
