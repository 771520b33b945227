//! Business Services
//!
//! This module contains the graph query layer:
//!
//! - `GraphQueryService` - Name resolution, connection lookup, path finding
//!   and cluster analysis over a [`QueryExecutor`](crate::db::QueryExecutor)
//! - `report` - Text rendering of query outcomes for tool results
//!
//! Services compose parameterized SQL; the database layer executes it.

pub mod error;
pub mod graph_service;
pub mod report;

pub use error::GraphServiceError;
pub use graph_service::{
    CancellationFlag, ClusterQuery, ClusterReport, Connection, ConnectionOutcome,
    ConnectionQuery, ConnectionReport, GraphQueryService, PathOutcome, PathQuery,
    ResolvedEntity,
};
