//! Graph Query MCP Handlers
//!
//! Read-only tools over the knowledge graph:
//!
//! - `find_connections` - direct neighbours of a named entity
//! - `find_path` - shortest relationship chain between two entities
//! - `analyze_clusters` - hubs, category and relationship-type statistics
//!
//! Each handler deserializes its arguments, calls `GraphQueryService`, and
//! renders the outcome as a text report.

use crate::mcp::types::MCPError;
use crate::services::graph_service::{
    DEFAULT_CONNECTION_LIMIT, DEFAULT_MAX_DEPTH, DEFAULT_MIN_CONNECTIONS, DEFAULT_MIN_STRENGTH,
    MAX_PATH_DEPTH,
};
use crate::services::{
    ClusterQuery, ConnectionQuery, GraphQueryService, GraphServiceError, PathQuery,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Parameters for find_connections
#[derive(Debug, Deserialize)]
pub struct FindConnectionsParams {
    /// Name fragment identifying the pivot entity
    pub entity_name: String,

    /// Only relationships at least this strong are returned
    #[serde(default = "default_min_strength")]
    pub min_strength: i64,

    /// Maximum number of connections
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_min_strength() -> i64 {
    DEFAULT_MIN_STRENGTH
}

fn default_limit() -> i64 {
    DEFAULT_CONNECTION_LIMIT
}

/// Parameters for find_path
#[derive(Debug, Deserialize)]
pub struct FindPathParams {
    pub from_entity: String,
    pub to_entity: String,

    /// Maximum number of hops; signed so negative input is reported as a bound error
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,
}

fn default_max_depth() -> i64 {
    DEFAULT_MAX_DEPTH as i64
}

/// Parameters for analyze_clusters
#[derive(Debug, Deserialize)]
pub struct AnalyzeClustersParams {
    #[serde(default = "default_min_connections")]
    pub min_connections: i64,
}

fn default_min_connections() -> i64 {
    DEFAULT_MIN_CONNECTIONS
}

/// Map a service failure onto the JSON-RPC error space
pub fn service_error(error: GraphServiceError) -> MCPError {
    if !error.is_invalid_input() {
        warn!("graph query failed: {}", error);
    }
    match &error {
        GraphServiceError::InvalidInput { field, .. } => {
            MCPError::invalid_params(error.to_string()).with_data(json!({ "field": field }))
        }
        GraphServiceError::Cancelled { depth } => {
            MCPError::search_cancelled(error.to_string()).with_data(json!({ "depth": depth }))
        }
        GraphServiceError::DatabaseError(_) => MCPError::store_error(error.to_string()),
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, MCPError> {
    serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))
}

/// Handle find_connections MCP request
#[instrument(skip(service, params))]
pub async fn handle_find_connections(
    service: &Arc<GraphQueryService>,
    params: Value,
) -> Result<String, MCPError> {
    let params: FindConnectionsParams = parse_params(params)?;

    let query = ConnectionQuery::new(params.entity_name)
        .with_min_strength(params.min_strength)
        .with_limit(params.limit);

    let outcome = service
        .find_connections(&query)
        .await
        .map_err(service_error)?;

    Ok(outcome.to_string())
}

/// Handle find_path MCP request
#[instrument(skip(service, params))]
pub async fn handle_find_path(
    service: &Arc<GraphQueryService>,
    params: Value,
) -> Result<String, MCPError> {
    let params: FindPathParams = parse_params(params)?;

    let max_depth = usize::try_from(params.max_depth).map_err(|_| {
        service_error(GraphServiceError::invalid_input(
            "max_depth",
            format!(
                "must be between 1 and {}, got {}",
                MAX_PATH_DEPTH, params.max_depth
            ),
        ))
    })?;

    let query = PathQuery::new(params.from_entity, params.to_entity).with_max_depth(max_depth);

    let outcome = service.find_path(&query).await.map_err(service_error)?;

    Ok(outcome.to_string())
}

/// Handle analyze_clusters MCP request
#[instrument(skip(service, params))]
pub async fn handle_analyze_clusters(
    service: &Arc<GraphQueryService>,
    params: Value,
) -> Result<String, MCPError> {
    // Called with no arguments at all
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    let params: AnalyzeClustersParams = parse_params(params)?;

    let report = service
        .analyze_clusters(&ClusterQuery::new(params.min_connections))
        .await
        .map_err(service_error)?;

    Ok(report.to_string())
}
