//! Graph Query Service
//!
//! Read-only analysis over the entity/relationship graph. Every operation
//! resolves free-text names to entities, composes parameterized SQL against a
//! [`QueryExecutor`], and returns a typed outcome that the report module
//! renders as text.
//!
//! # Operations
//!
//! - [`GraphQueryService::find_connections`] - edges around a pivot entity
//! - [`GraphQueryService::find_path`] - shortest hop path between two entities
//! - [`GraphQueryService::analyze_clusters`] - hubs and distributions
//!
//! The service holds no state between calls, takes no locks and starts no
//! transactions. Store failures propagate unchanged; nothing is retried.
//!
//! # Name Resolution
//!
//! Names resolve by case-insensitive substring match. When several entities
//! match, the winner is picked deterministically: an exact (case-insensitive)
//! name match first, then the highest importance, then the shortest name,
//! then the smallest id.

use crate::db::{integer, text, DatabaseError, QueryExecutor, QueryRow};
use crate::models::{Direction, EntityCategory, RelationshipType, MAX_STRENGTH, MIN_STRENGTH};
use crate::services::error::GraphServiceError;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_MIN_STRENGTH: i64 = 1;
pub const DEFAULT_CONNECTION_LIMIT: i64 = 20;
pub const MAX_CONNECTION_LIMIT: i64 = 100;
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const MAX_PATH_DEPTH: usize = 5;
pub const DEFAULT_MIN_CONNECTIONS: i64 = 3;

/// Hub list is capped regardless of the threshold
pub const HUB_LIMIT: i64 = 10;

/// Entries shown per relationship-type group in a connection report
pub const GROUP_DISPLAY_LIMIT: usize = 5;

// ============================================================================
// Inputs
// ============================================================================

/// Arguments for connection lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
    pub entity_name: String,
    pub min_strength: i64,
    pub limit: i64,
}

impl ConnectionQuery {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            min_strength: DEFAULT_MIN_STRENGTH,
            limit: DEFAULT_CONNECTION_LIMIT,
        }
    }

    pub fn with_min_strength(mut self, min_strength: i64) -> Self {
        self.min_strength = min_strength;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), GraphServiceError> {
        if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&self.min_strength) {
            return Err(GraphServiceError::invalid_input(
                "min_strength",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_STRENGTH, MAX_STRENGTH, self.min_strength
                ),
            ));
        }
        if !(1..=MAX_CONNECTION_LIMIT).contains(&self.limit) {
            return Err(GraphServiceError::invalid_input(
                "limit",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_CONNECTION_LIMIT, self.limit
                ),
            ));
        }
        Ok(())
    }
}

/// Arguments for path finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    pub from_entity: String,
    pub to_entity: String,
    pub max_depth: usize,
}

impl PathQuery {
    pub fn new(from_entity: impl Into<String>, to_entity: impl Into<String>) -> Self {
        Self {
            from_entity: from_entity.into(),
            to_entity: to_entity.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), GraphServiceError> {
        if !(1..=MAX_PATH_DEPTH).contains(&self.max_depth) {
            return Err(GraphServiceError::invalid_input(
                "max_depth",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_PATH_DEPTH, self.max_depth
                ),
            ));
        }
        Ok(())
    }
}

/// Arguments for cluster analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterQuery {
    pub min_connections: i64,
}

impl Default for ClusterQuery {
    fn default() -> Self {
        Self {
            min_connections: DEFAULT_MIN_CONNECTIONS,
        }
    }
}

impl ClusterQuery {
    pub fn new(min_connections: i64) -> Self {
        Self { min_connections }
    }

    pub fn validate(&self) -> Result<(), GraphServiceError> {
        if self.min_connections < 1 {
            return Err(GraphServiceError::invalid_input(
                "min_connections",
                format!("must be at least 1, got {}", self.min_connections),
            ));
        }
        Ok(())
    }
}

/// Cooperative cancellation for multi-level path searches
///
/// Checked once before each BFS level; a search in the middle of a level
/// finishes that level first.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// An entity chosen by name resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntity {
    pub id: String,
    pub name: String,
    pub category: EntityCategory,
    pub description: String,
    pub importance_score: i64,
}

/// One edge around a pivot, with the neighbour's metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub relationship_id: String,
    pub relationship_type: RelationshipType,
    pub strength: i64,
    pub confidence: f64,
    pub direction: Direction,
    pub neighbor_id: String,
    pub neighbor_name: String,
    pub neighbor_category: EntityCategory,
    pub neighbor_importance: i64,
}

/// Connections of a resolved pivot, ordered by strength then importance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub pivot: ResolvedEntity,
    pub min_strength: i64,
    pub limit: i64,
    pub connections: Vec<Connection>,
}

/// A run of connections sharing one relationship type
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionGroup<'a> {
    pub relationship_type: &'a RelationshipType,
    pub connections: Vec<&'a Connection>,
}

impl<'a> ConnectionGroup<'a> {
    /// Entries to display (at most [`GROUP_DISPLAY_LIMIT`])
    pub fn shown(&self) -> &[&'a Connection] {
        let end = self.connections.len().min(GROUP_DISPLAY_LIMIT);
        &self.connections[..end]
    }

    /// Entries beyond the display limit
    pub fn remainder(&self) -> usize {
        self.connections.len().saturating_sub(GROUP_DISPLAY_LIMIT)
    }
}

impl ConnectionReport {
    /// Group connections by relationship type
    ///
    /// Groups appear in order of first occurrence, so the group holding the
    /// strongest edge comes first. Order within a group is preserved.
    pub fn grouped(&self) -> Vec<ConnectionGroup<'_>> {
        let mut groups: Vec<ConnectionGroup<'_>> = Vec::new();
        for connection in &self.connections {
            match groups
                .iter_mut()
                .find(|g| *g.relationship_type == connection.relationship_type)
            {
                Some(group) => group.connections.push(connection),
                None => groups.push(ConnectionGroup {
                    relationship_type: &connection.relationship_type,
                    connections: vec![connection],
                }),
            }
        }
        groups
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionOutcome {
    NotFound { query: String },
    Found(ConnectionReport),
}

/// Result of a path search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    /// One or both names matched nothing; `missing` lists the fragments
    NotFound { missing: Vec<String> },
    /// Both names resolved to the same entity
    SameEntity { entity: ResolvedEntity },
    /// The two entities share an edge
    Direct {
        from: ResolvedEntity,
        to: ResolvedEntity,
        relationship_type: RelationshipType,
        strength: i64,
        direction: Direction,
    },
    /// Shortest hop path, source and target included
    Found {
        from: ResolvedEntity,
        to: ResolvedEntity,
        path: Vec<String>,
    },
    /// Target not reached within `max_depth` levels
    NoPath {
        from: ResolvedEntity,
        to: ResolvedEntity,
        max_depth: usize,
    },
}

impl PathOutcome {
    /// Number of edges on the discovered path, if any
    pub fn hops(&self) -> Option<usize> {
        match self {
            Self::Direct { .. } => Some(1),
            Self::Found { path, .. } => Some(path.len().saturating_sub(1)),
            Self::SameEntity { .. } => Some(0),
            Self::NotFound { .. } | Self::NoPath { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub id: String,
    pub name: String,
    pub category: EntityCategory,
    pub importance_score: i64,
    pub outgoing: i64,
    pub incoming: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: EntityCategory,
    pub count: i64,
    pub avg_importance: f64,
    pub max_importance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypeStats {
    pub relationship_type: RelationshipType,
    pub count: i64,
    pub avg_strength: f64,
    pub max_strength: i64,
}

/// Whole-graph structural summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReport {
    pub min_connections: i64,
    pub total_entities: i64,
    pub total_relationships: i64,
    pub hubs: Vec<Hub>,
    pub categories: Vec<CategoryStats>,
    pub relationship_types: Vec<RelationshipTypeStats>,
    pub isolated_count: i64,
}

// ============================================================================
// SQL
// ============================================================================

// SQLite's LOWER() only folds ASCII, so candidates are matched in Rust
const RESOLVE_CANDIDATES_SQL: &str = "
    SELECT id, name, category, description, importance_score
    FROM entities";

const CONNECTIONS_SQL: &str = "
    SELECT r.id, r.relationship_type, r.strength, r.confidence, r.from_entity_id,
           e.id, e.name, e.category, e.importance_score
    FROM relationships r
    JOIN entities e
      ON e.id = CASE WHEN r.from_entity_id = ? THEN r.to_entity_id ELSE r.from_entity_id END
    WHERE (r.from_entity_id = ? OR r.to_entity_id = ?)
      AND r.strength >= ?
    ORDER BY r.strength DESC, e.importance_score DESC, r.id ASC
    LIMIT ?";

const DIRECT_RELATIONSHIP_SQL: &str = "
    SELECT relationship_type, strength, from_entity_id
    FROM relationships
    WHERE (from_entity_id = ? AND to_entity_id = ?)
       OR (from_entity_id = ? AND to_entity_id = ?)
    ORDER BY strength DESC, id ASC
    LIMIT 1";

const INCIDENT_EDGES_SQL: &str = "
    SELECT from_entity_id, to_entity_id
    FROM relationships
    WHERE from_entity_id = ? OR to_entity_id = ?
    ORDER BY strength DESC, id ASC";

const HUBS_SQL: &str = "
    WITH degree AS (
        SELECT e.id, e.name, e.category, e.importance_score,
               (SELECT COUNT(*) FROM relationships r WHERE r.from_entity_id = e.id) AS outgoing,
               (SELECT COUNT(*) FROM relationships r WHERE r.to_entity_id = e.id) AS incoming,
               (SELECT COUNT(*) FROM relationships r
                 WHERE r.from_entity_id = e.id OR r.to_entity_id = e.id) AS total
        FROM entities e
    )
    SELECT id, name, category, importance_score, outgoing, incoming, total
    FROM degree
    WHERE total >= ?
    ORDER BY total DESC, importance_score DESC, name ASC
    LIMIT ?";

const CATEGORY_STATS_SQL: &str = "
    SELECT category, COUNT(*) AS count, AVG(importance_score), MAX(importance_score)
    FROM entities
    GROUP BY category
    ORDER BY count DESC, category ASC";

const RELATIONSHIP_TYPE_STATS_SQL: &str = "
    SELECT relationship_type, COUNT(*) AS count, AVG(strength), MAX(strength)
    FROM relationships
    GROUP BY relationship_type
    ORDER BY count DESC, relationship_type ASC";

const ISOLATED_COUNT_SQL: &str = "
    SELECT COUNT(*)
    FROM entities e
    WHERE NOT EXISTS (
        SELECT 1 FROM relationships r
        WHERE r.from_entity_id = e.id OR r.to_entity_id = e.id
    )";

const TOTALS_SQL: &str = "
    SELECT (SELECT COUNT(*) FROM entities), (SELECT COUNT(*) FROM relationships)";

/// Ordering key for a name candidate; the smallest key wins
///
/// Exact (case-folded) match first, then higher importance, then the shorter
/// name, then the lower id.
fn candidate_rank<'a>(
    folded_fragment: &str,
    name: &str,
    importance_score: i64,
    id: &'a str,
) -> (bool, std::cmp::Reverse<i64>, usize, &'a str) {
    (
        name.to_lowercase() != folded_fragment,
        std::cmp::Reverse(importance_score),
        name.chars().count(),
        id,
    )
}

fn parse_category(row: &QueryRow, index: usize) -> Result<EntityCategory, DatabaseError> {
    row.get_text(index)?
        .parse()
        .map_err(|e| DatabaseError::row_decode(index, format!("{}", e)))
}

// ============================================================================
// Service
// ============================================================================

/// Stateless graph query layer over a [`QueryExecutor`]
#[derive(Clone)]
pub struct GraphQueryService {
    executor: Arc<dyn QueryExecutor>,
}

impl std::fmt::Debug for GraphQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQueryService").finish_non_exhaustive()
    }
}

impl GraphQueryService {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Resolve a free-text name fragment to a single entity
    ///
    /// Returns `None` for blank fragments (without querying) and for
    /// fragments that match nothing.
    #[instrument(skip(self))]
    pub async fn resolve_entity(
        &self,
        name_fragment: &str,
    ) -> Result<Option<ResolvedEntity>, GraphServiceError> {
        let fragment = name_fragment.trim();
        if fragment.is_empty() {
            return Ok(None);
        }

        let rows = self.executor.query(RESOLVE_CANDIDATES_SQL, Vec::new()).await?;

        let folded = fragment.to_lowercase();
        let mut best: Option<(&QueryRow, String, i64, String)> = None;
        for row in &rows {
            let name = row.get_text(1)?;
            if !name.to_lowercase().contains(&folded) {
                continue;
            }
            let candidate = (row, name, row.get_i64(4)?, row.get_text(0)?);
            let wins = best.as_ref().map_or(true, |current| {
                candidate_rank(&folded, &candidate.1, candidate.2, &candidate.3)
                    < candidate_rank(&folded, &current.1, current.2, &current.3)
            });
            if wins {
                best = Some(candidate);
            }
        }

        let Some((row, name, importance_score, id)) = best else {
            debug!("No entity matches '{}'", fragment);
            return Ok(None);
        };

        Ok(Some(ResolvedEntity {
            id,
            name,
            category: parse_category(row, 2)?,
            description: row.get_opt_text(3)?.unwrap_or_default(),
            importance_score,
        }))
    }

    /// Everything connected to the entity named by `query.entity_name`
    ///
    /// # Errors
    ///
    /// `InvalidInput` for out-of-range bounds; `DatabaseError` if any query fails.
    #[instrument(skip(self), fields(entity = %query.entity_name))]
    pub async fn find_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionOutcome, GraphServiceError> {
        query.validate()?;

        let Some(pivot) = self.resolve_entity(&query.entity_name).await? else {
            return Ok(ConnectionOutcome::NotFound {
                query: query.entity_name.clone(),
            });
        };

        let rows = self
            .executor
            .query(
                CONNECTIONS_SQL,
                vec![
                    text(&pivot.id),
                    text(&pivot.id),
                    text(&pivot.id),
                    integer(query.min_strength),
                    integer(query.limit),
                ],
            )
            .await?;

        let connections = rows
            .iter()
            .map(|row| {
                let from_entity_id = row.get_text(4)?;
                Ok(Connection {
                    relationship_id: row.get_text(0)?,
                    relationship_type: RelationshipType::from(row.get_text(1)?),
                    strength: row.get_i64(2)?,
                    confidence: row.get_f64(3)?,
                    direction: Direction::relative_to(&pivot.id, &from_entity_id),
                    neighbor_id: row.get_text(5)?,
                    neighbor_name: row.get_text(6)?,
                    neighbor_category: parse_category(row, 7)?,
                    neighbor_importance: row.get_i64(8)?,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        debug!(
            "Found {} connection(s) for '{}' (min_strength={})",
            connections.len(),
            pivot.name,
            query.min_strength
        );

        Ok(ConnectionOutcome::Found(ConnectionReport {
            pivot,
            min_strength: query.min_strength,
            limit: query.limit,
            connections,
        }))
    }

    /// Shortest hop path between two named entities
    pub async fn find_path(&self, query: &PathQuery) -> Result<PathOutcome, GraphServiceError> {
        self.find_path_with_cancel(query, &CancellationFlag::new())
            .await
    }

    /// Shortest hop path, checking `cancel` before each BFS level
    ///
    /// Resolution failures, identical endpoints and direct edges short-circuit
    /// before any breadth-first expansion.
    #[instrument(skip(self, cancel), fields(from = %query.from_entity, to = %query.to_entity, max_depth = query.max_depth))]
    pub async fn find_path_with_cancel(
        &self,
        query: &PathQuery,
        cancel: &CancellationFlag,
    ) -> Result<PathOutcome, GraphServiceError> {
        query.validate()?;

        let from = self.resolve_entity(&query.from_entity).await?;
        let to = self.resolve_entity(&query.to_entity).await?;

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (from, to) => {
                let mut missing = Vec::new();
                if from.is_none() {
                    missing.push(query.from_entity.clone());
                }
                if to.is_none() {
                    missing.push(query.to_entity.clone());
                }
                return Ok(PathOutcome::NotFound { missing });
            }
        };

        if from.id == to.id {
            return Ok(PathOutcome::SameEntity { entity: from });
        }

        let direct = self
            .executor
            .query(
                DIRECT_RELATIONSHIP_SQL,
                vec![text(&from.id), text(&to.id), text(&to.id), text(&from.id)],
            )
            .await?;
        if let Some(row) = direct.first() {
            let direction = Direction::relative_to(&from.id, &row.get_text(2)?);
            return Ok(PathOutcome::Direct {
                relationship_type: RelationshipType::from(row.get_text(0)?),
                strength: row.get_i64(1)?,
                direction,
                from,
                to,
            });
        }

        let Some(path_ids) = self
            .breadth_first_search(&from.id, &to.id, query.max_depth, cancel)
            .await?
        else {
            return Ok(PathOutcome::NoPath {
                from,
                to,
                max_depth: query.max_depth,
            });
        };

        let path = self.entity_names(&path_ids).await?;
        Ok(PathOutcome::Found { from, to, path })
    }

    /// Level-by-level BFS over the undirected edge set
    ///
    /// Returns the id path from `source` to `target` inclusive, or `None` if
    /// the target is not reached within `max_depth` levels.
    async fn breadth_first_search(
        &self,
        source: &str,
        target: &str,
        max_depth: usize,
        cancel: &CancellationFlag,
    ) -> Result<Option<Vec<String>>, GraphServiceError> {
        let mut visited: HashSet<String> = HashSet::from([source.to_string()]);
        let mut predecessor: HashMap<String, String> = HashMap::new();
        let mut frontier: Vec<String> = vec![source.to_string()];

        for depth in 1..=max_depth {
            if cancel.is_cancelled() {
                return Err(GraphServiceError::Cancelled { depth });
            }

            let mut next_frontier = Vec::new();
            for node in &frontier {
                let rows = self
                    .executor
                    .query(INCIDENT_EDGES_SQL, vec![text(node), text(node)])
                    .await?;

                for row in &rows {
                    let from_id = row.get_text(0)?;
                    let to_id = row.get_text(1)?;
                    let neighbor = if &from_id == node { to_id } else { from_id };

                    if !visited.insert(neighbor.clone()) {
                        continue;
                    }
                    predecessor.insert(neighbor.clone(), node.clone());

                    if neighbor == target {
                        debug!("Reached target at depth {}", depth);
                        return Ok(Some(reconstruct_path(&predecessor, source, target)));
                    }
                    next_frontier.push(neighbor);
                }
            }

            debug!(
                "BFS depth {}: {} node(s) in next frontier",
                depth,
                next_frontier.len()
            );
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }

        Ok(None)
    }

    /// Look up display names for `ids`, preserving order
    async fn entity_names(&self, ids: &[String]) -> Result<Vec<String>, GraphServiceError> {
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name FROM entities WHERE id IN ({})",
            placeholders
        );
        let rows = self
            .executor
            .query(&sql, ids.iter().map(text).collect())
            .await?;

        let mut names = HashMap::with_capacity(rows.len());
        for row in &rows {
            names.insert(row.get_text(0)?, row.get_text(1)?);
        }

        // An id deleted mid-search falls back to itself
        Ok(ids
            .iter()
            .map(|id| names.get(id).cloned().unwrap_or_else(|| id.clone()))
            .collect())
    }

    /// Hubs, category and relationship-type distributions, isolated count
    #[instrument(skip(self))]
    pub async fn analyze_clusters(
        &self,
        query: &ClusterQuery,
    ) -> Result<ClusterReport, GraphServiceError> {
        query.validate()?;

        let hubs = self
            .executor
            .query(
                HUBS_SQL,
                vec![integer(query.min_connections), integer(HUB_LIMIT)],
            )
            .await?
            .iter()
            .map(|row| {
                Ok(Hub {
                    id: row.get_text(0)?,
                    name: row.get_text(1)?,
                    category: parse_category(row, 2)?,
                    importance_score: row.get_i64(3)?,
                    outgoing: row.get_i64(4)?,
                    incoming: row.get_i64(5)?,
                    total: row.get_i64(6)?,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let categories = self
            .executor
            .query(CATEGORY_STATS_SQL, Vec::new())
            .await?
            .iter()
            .map(|row| {
                Ok(CategoryStats {
                    category: parse_category(row, 0)?,
                    count: row.get_i64(1)?,
                    avg_importance: row.get_f64(2)?,
                    max_importance: row.get_i64(3)?,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let relationship_types = self
            .executor
            .query(RELATIONSHIP_TYPE_STATS_SQL, Vec::new())
            .await?
            .iter()
            .map(|row| {
                Ok(RelationshipTypeStats {
                    relationship_type: RelationshipType::from(row.get_text(0)?),
                    count: row.get_i64(1)?,
                    avg_strength: row.get_f64(2)?,
                    max_strength: row.get_i64(3)?,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let isolated_count = self.scalar(ISOLATED_COUNT_SQL).await?;

        let totals = self.executor.query(TOTALS_SQL, Vec::new()).await?;
        let (total_entities, total_relationships) = match totals.first() {
            Some(row) => (row.get_i64(0)?, row.get_i64(1)?),
            None => (0, 0),
        };

        debug!(
            "Cluster analysis: {} hub(s), {} isolated of {} entities",
            hubs.len(),
            isolated_count,
            total_entities
        );

        Ok(ClusterReport {
            min_connections: query.min_connections,
            total_entities,
            total_relationships,
            hubs,
            categories,
            relationship_types,
            isolated_count,
        })
    }

    async fn scalar(&self, sql: &str) -> Result<i64, GraphServiceError> {
        let rows = self.executor.query(sql, Vec::new()).await?;
        match rows.first() {
            Some(row) => Ok(row.get_i64(0)?),
            None => Ok(0),
        }
    }
}

/// Walk the predecessor map back from `target` and reverse
fn reconstruct_path(
    predecessor: &HashMap<String, String>,
    source: &str,
    target: &str,
) -> Vec<String> {
    let mut path = vec![target.to_string()];
    let mut current = target;
    while current != source {
        match predecessor.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
#[path = "graph_service_test.rs"]
mod graph_service_test;
