//! MCP stdio Server
//!
//! Async Tokio task that handles JSON-RPC 2.0 requests over stdin/stdout,
//! one JSON object per line. stdout carries only protocol messages; all
//! logging goes through `tracing`.

use crate::mcp::handlers::{initialize, tools};
use crate::mcp::types::{MCPError, MCPNotification, MCPRequest, MCPResponse, RequestId};
use crate::services::GraphQueryService;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, error, info, instrument, warn};

/// Run the MCP stdio server
///
/// Reads JSON-RPC requests from stdin, processes them via handlers,
/// and writes responses to stdout. Runs until EOF on stdin.
#[instrument(skip(service))]
pub async fn run_mcp_server(service: Arc<GraphQueryService>) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = BufWriter::new(tokio::io::stdout());
    serve(service, reader, &mut writer).await
}

/// Serve line-delimited JSON-RPC from any reader/writer pair
///
/// Returns Ok(()) at EOF, or Err when the transport itself fails.
pub async fn serve<R, W>(
    service: Arc<GraphQueryService>,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("🔌 MCP stdio server started");

    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("📥 MCP message: {}", line);

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("❌ Failed to parse JSON-RPC message: {}", e);
                let response = MCPResponse::error(
                    RequestId::Null,
                    MCPError::parse_error(format!("Invalid JSON: {}", e)),
                );
                write_response(writer, &response).await?;
                continue;
            }
        };

        if message.get("id").is_none() {
            handle_notification(message);
            continue;
        }

        let request: MCPRequest = match serde_json::from_value(message.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!("❌ Invalid JSON-RPC request: {}", e);
                let response = MCPResponse::error(
                    RequestId::from_message(&message),
                    MCPError::invalid_request(format!("Invalid request: {}", e)),
                );
                write_response(writer, &response).await?;
                continue;
            }
        };

        let request_id = request.id.clone();
        let method = request.method.clone();

        let response = handle_request(&service, request).await;

        debug!(
            "📤 MCP response for method '{}' (id={})",
            method, request_id
        );

        write_response(writer, &response).await?;
    }

    info!("🔌 MCP stdio server stopped (stdin closed)");
    Ok(())
}

/// Notifications are never answered, even when malformed
fn handle_notification(message: Value) {
    match serde_json::from_value::<MCPNotification>(message) {
        Ok(notification) if notification.method == "notifications/initialized" => {
            info!("✅ MCP client initialized");
        }
        Ok(notification) => {
            debug!("Ignoring MCP notification: {}", notification.method);
        }
        Err(e) => {
            warn!("❌ Invalid JSON-RPC notification: {}", e);
        }
    }
}

/// Handle a JSON-RPC request and return a response
#[instrument(skip(service, request), fields(method = %request.method, id = %request.id))]
pub async fn handle_request(service: &Arc<GraphQueryService>, request: MCPRequest) -> MCPResponse {
    let result = match request.method.as_str() {
        "initialize" => initialize::handle_initialize(request.params),
        "tools/list" => tools::handle_tools_list(request.params),
        "tools/call" => tools::handle_tools_call(service, request.params).await,
        "ping" => Ok(json!({})),
        _ => {
            warn!("⚠️  Unknown MCP method: {}", request.method);
            Err(MCPError::method_not_found(&request.method))
        }
    };

    match result {
        Ok(result) => {
            debug!("✅ MCP request {} succeeded", request.id);
            MCPResponse::success(request.id, result)
        }
        Err(error) => {
            error!(
                "❌ MCP request {} failed: {} (code: {})",
                request.id, error.message, error.code
            );
            MCPResponse::error(request.id, error)
        }
    }
}

/// Write a JSON-RPC response as a single line
async fn write_response<W>(writer: &mut W, response: &MCPResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
