//! Tests for GraphQueryService
//!
//! Tests cover:
//! - Name resolution and its tie-break policy
//! - Connection lookup filtering, ordering, direction labels and grouping
//! - Path finding short-circuits, BFS shortest paths and depth bounds
//! - Cluster analysis ordering, caps and isolated counts
//! - Which queries are (and are not) issued, via a recording executor

use super::*;
use crate::db::DatabaseService;
use crate::models::{Entity, Relationship};
use async_trait::async_trait;
use libsql::Value;
use std::sync::Mutex;
use tempfile::TempDir;

/// Wraps the real database and records every SQL statement issued
struct RecordingExecutor {
    inner: DatabaseService,
    statements: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    fn relationship_queries(&self) -> usize {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .filter(|sql| sql.contains("relationships"))
            .count()
    }

    fn incident_edge_queries(&self) -> usize {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .filter(|sql| sql.as_str() == INCIDENT_EDGES_SQL)
            .count()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<QueryRow>, DatabaseError> {
        self.statements.lock().unwrap().push(sql.to_string());
        self.inner.query(sql, params).await
    }
}

/// Executor whose every query fails
struct FailingExecutor;

#[async_trait]
impl QueryExecutor for FailingExecutor {
    async fn query(&self, _sql: &str, _params: Vec<Value>) -> Result<Vec<QueryRow>, DatabaseError> {
        Err(DatabaseError::sql_execution("disk I/O error"))
    }
}

struct Fixture {
    db: DatabaseService,
    recorder: Arc<RecordingExecutor>,
    service: GraphQueryService,
    _temp_dir: TempDir,
}

impl Fixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db = DatabaseService::new(temp_dir.path().join("graph.db"))
            .await
            .unwrap();
        let recorder = Arc::new(RecordingExecutor {
            inner: db.clone(),
            statements: Mutex::new(Vec::new()),
        });
        let service = GraphQueryService::new(recorder.clone());
        Self {
            db,
            recorder,
            service,
            _temp_dir: temp_dir,
        }
    }

    async fn entity(&self, id: &str, name: &str, category: EntityCategory, importance: i64) {
        self.db
            .insert_entity(
                &Entity::new(name, category)
                    .with_id(id)
                    .with_importance(importance),
            )
            .await
            .unwrap();
    }

    async fn edge(&self, from: &str, to: &str, relationship_type: &str, strength: i64) {
        self.db
            .insert_relationship(
                &Relationship::new(from, to, relationship_type)
                    .with_id(format!("{}-{}-{}", from, relationship_type, to))
                    .with_strength(strength),
            )
            .await
            .unwrap();
    }

    /// A–B (5, related_to), B–C (3, depends_on)
    async fn abc() -> Self {
        let f = Self::new().await;
        f.entity("a", "Alpha", EntityCategory::Fact, 50).await;
        f.entity("b", "Bravo", EntityCategory::Skill, 60).await;
        f.entity("c", "Charlie", EntityCategory::Goal, 70).await;
        f.edge("a", "b", "related_to", 5).await;
        f.edge("b", "c", "depends_on", 3).await;
        f
    }

    /// Chain n0 - n1 - ... - n{len-1}
    async fn chain(len: usize) -> Self {
        let f = Self::new().await;
        for i in 0..len {
            f.entity(&format!("n{}", i), &format!("Node {}", i), EntityCategory::Fact, 50)
                .await;
        }
        for i in 1..len {
            f.edge(&format!("n{}", i - 1), &format!("n{}", i), "precedes", 5)
                .await;
        }
        f
    }
}

fn expect_found(outcome: ConnectionOutcome) -> ConnectionReport {
    match outcome {
        ConnectionOutcome::Found(report) => report,
        other => panic!("expected connections, got {:?}", other),
    }
}

// =========================================================================
// Name resolution
// =========================================================================

#[tokio::test]
async fn test_resolve_is_case_insensitive_substring() {
    let f = Fixture::abc().await;
    let resolved = f.service.resolve_entity("RAV").await.unwrap().unwrap();
    assert_eq!(resolved.id, "b");
    assert_eq!(resolved.name, "Bravo");
    assert_eq!(resolved.category, EntityCategory::Skill);
}

#[tokio::test]
async fn test_resolve_unknown_returns_none() {
    let f = Fixture::abc().await;
    assert!(f.service.resolve_entity("Zulu").await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_blank_issues_no_query() {
    let f = Fixture::abc().await;
    assert!(f.service.resolve_entity("   ").await.unwrap().is_none());
    assert!(f.recorder.statements.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_prefers_exact_match() {
    let f = Fixture::new().await;
    f.entity("x1", "Rust Conference", EntityCategory::Context, 99).await;
    f.entity("x2", "Rust", EntityCategory::Skill, 10).await;

    let resolved = f.service.resolve_entity("rust").await.unwrap().unwrap();
    assert_eq!(resolved.id, "x2");
}

#[tokio::test]
async fn test_resolve_tie_breaks_by_importance_then_id() {
    let f = Fixture::new().await;
    f.entity("m2", "Meeting notes", EntityCategory::Fact, 40).await;
    f.entity("m1", "Meeting agenda", EntityCategory::Fact, 40).await;
    f.entity("m3", "Meeting minutes", EntityCategory::Fact, 80).await;

    let resolved = f.service.resolve_entity("meeting").await.unwrap().unwrap();
    assert_eq!(resolved.id, "m3");

    f.db.delete_entity("m3").await.unwrap();
    let resolved = f.service.resolve_entity("meeting").await.unwrap().unwrap();
    // Equal importance; "Meeting notes" is shorter than "Meeting agenda"
    assert_eq!(resolved.id, "m2");
}

#[tokio::test]
async fn test_resolve_treats_wildcards_literally() {
    let f = Fixture::abc().await;
    assert!(f.service.resolve_entity("%").await.unwrap().is_none());
    assert!(f.service.resolve_entity("_").await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_equal_names_fall_back_to_lowest_id() {
    let f = Fixture::new().await;
    f.entity("z9", "Standup", EntityCategory::Context, 50).await;
    f.entity("k2", "Standup", EntityCategory::Context, 50).await;

    let resolved = f.service.resolve_entity("standup").await.unwrap().unwrap();
    assert_eq!(resolved.id, "k2");
}

#[tokio::test]
async fn test_resolve_folds_non_ascii_case() {
    let f = Fixture::new().await;
    f.entity("e1", "Élodie Dupont", EntityCategory::Person, 50).await;
    f.entity("s1", "Straße Project", EntityCategory::Goal, 50).await;

    for fragment in ["élodie", "ÉLODIE", "Élodie", "éLoDiE dUpOnT"] {
        let resolved = f.service.resolve_entity(fragment).await.unwrap();
        assert_eq!(
            resolved.map(|r| r.id),
            Some("e1".to_string()),
            "fragment {:?}",
            fragment
        );
    }
    let resolved = f.service.resolve_entity("STRASSE").await.unwrap();
    // to_lowercase does not expand ß, so only the exact spelling folds
    assert!(resolved.is_none());
    let resolved = f.service.resolve_entity("STRAßE").await.unwrap().unwrap();
    assert_eq!(resolved.id, "s1");
}

#[tokio::test]
async fn test_resolve_non_ascii_exact_match_wins() {
    let f = Fixture::new().await;
    f.entity("n1", "Ñoño Team Offsite", EntityCategory::Context, 95).await;
    f.entity("n2", "Ñoño", EntityCategory::Person, 5).await;

    let resolved = f.service.resolve_entity("ñOÑO").await.unwrap().unwrap();
    assert_eq!(resolved.id, "n2");
}

#[tokio::test]
async fn test_non_ascii_names_drive_connections_and_paths() {
    let f = Fixture::new().await;
    f.entity("e1", "Élodie Dupont", EntityCategory::Person, 50).await;
    f.entity("n2", "Ñoño", EntityCategory::Person, 40).await;
    f.entity("g1", "Øresund Bridge", EntityCategory::Goal, 30).await;
    f.edge("e1", "n2", "works_with", 7).await;
    f.edge("n2", "g1", "owns", 6).await;

    let report = expect_found(
        f.service
            .find_connections(&ConnectionQuery::new("ÉLODIE"))
            .await
            .unwrap(),
    );
    assert_eq!(report.pivot.id, "e1");
    assert_eq!(report.connections.len(), 1);
    assert_eq!(report.connections[0].neighbor_name, "Ñoño");

    let outcome = f
        .service
        .find_path(&PathQuery::new("élodie", "ØRESUND"))
        .await
        .unwrap();
    match outcome {
        PathOutcome::Found { path, .. } => {
            assert_eq!(path, vec!["Élodie Dupont", "Ñoño", "Øresund Bridge"])
        }
        other => panic!("expected path, got {:?}", other),
    }
}

// =========================================================================
// Connection lookup
// =========================================================================

#[tokio::test]
async fn test_connections_filters_by_min_strength() {
    let f = Fixture::abc().await;

    let report = expect_found(
        f.service
            .find_connections(&ConnectionQuery::new("Bravo").with_min_strength(4))
            .await
            .unwrap(),
    );

    assert_eq!(report.connections.len(), 1);
    let only = &report.connections[0];
    assert_eq!(only.neighbor_name, "Alpha");
    assert_eq!(only.relationship_type, RelationshipType::RelatedTo);
    assert_eq!(only.strength, 5);
}

#[tokio::test]
async fn test_connections_labels_direction_relative_to_pivot() {
    let f = Fixture::abc().await;

    let report = expect_found(
        f.service
            .find_connections(&ConnectionQuery::new("Bravo"))
            .await
            .unwrap(),
    );

    assert_eq!(report.pivot.id, "b");
    assert_eq!(report.connections.len(), 2);
    // Ordered by strength: a-b (5) then b-c (3)
    assert_eq!(report.connections[0].neighbor_id, "a");
    assert_eq!(report.connections[0].direction, Direction::Incoming);
    assert_eq!(report.connections[1].neighbor_id, "c");
    assert_eq!(report.connections[1].direction, Direction::Outgoing);
}

#[tokio::test]
async fn test_connections_order_and_limit() {
    let f = Fixture::new().await;
    f.entity("hub", "Hub", EntityCategory::Project, 50).await;
    for i in 0..8 {
        f.entity(&format!("s{}", i), &format!("Spoke {}", i), EntityCategory::Person, i * 10)
            .await;
        f.edge("hub", &format!("s{}", i), "knows", 1 + (i % 3)).await;
    }

    let report = expect_found(
        f.service
            .find_connections(&ConnectionQuery::new("Hub").with_limit(5))
            .await
            .unwrap(),
    );

    assert_eq!(report.connections.len(), 5);
    for pair in report.connections.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.strength > b.strength
                || (a.strength == b.strength && a.neighbor_importance >= b.neighbor_importance)
        );
    }
    assert!(report.connections.iter().all(|c| c.strength >= 1));
}

#[tokio::test]
async fn test_connections_grouped_with_remainder() {
    let f = Fixture::new().await;
    f.entity("hub", "Hub", EntityCategory::Project, 50).await;
    for i in 0..7 {
        f.entity(&format!("k{}", i), &format!("Known {}", i), EntityCategory::Person, 50)
            .await;
        f.edge("hub", &format!("k{}", i), "knows", 9).await;
    }
    f.entity("dep", "Dependency", EntityCategory::Skill, 50).await;
    f.edge("hub", "dep", "depends_on", 2).await;

    let report = expect_found(
        f.service
            .find_connections(&ConnectionQuery::new("Hub"))
            .await
            .unwrap(),
    );
    let groups = report.grouped();

    assert_eq!(groups.len(), 2);
    assert_eq!(*groups[0].relationship_type, RelationshipType::Knows);
    assert_eq!(groups[0].connections.len(), 7);
    assert_eq!(groups[0].shown().len(), GROUP_DISPLAY_LIMIT);
    assert_eq!(groups[0].remainder(), 2);
    assert_eq!(*groups[1].relationship_type, RelationshipType::DependsOn);
    assert_eq!(groups[1].remainder(), 0);
}

#[tokio::test]
async fn test_connections_not_found_issues_no_relationship_query() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_connections(&ConnectionQuery::new("Nobody"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ConnectionOutcome::NotFound {
            query: "Nobody".to_string()
        }
    );
    assert_eq!(f.recorder.relationship_queries(), 0);
}

#[tokio::test]
async fn test_connections_rejects_out_of_range_bounds() {
    let f = Fixture::abc().await;

    let err = f
        .service
        .find_connections(&ConnectionQuery::new("Alpha").with_min_strength(11))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());

    let err = f
        .service
        .find_connections(&ConnectionQuery::new("Alpha").with_limit(0))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());

    let err = f
        .service
        .find_connections(&ConnectionQuery::new("Alpha").with_limit(101))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}

// =========================================================================
// Path finding
// =========================================================================

#[tokio::test]
async fn test_path_two_hops_found() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Alpha", "Charlie").with_max_depth(2))
        .await
        .unwrap();

    match &outcome {
        PathOutcome::Found { path, .. } => {
            assert_eq!(path, &vec!["Alpha", "Bravo", "Charlie"]);
        }
        other => panic!("expected path, got {:?}", other),
    }
    assert_eq!(outcome.hops(), Some(2));
}

#[tokio::test]
async fn test_path_respects_max_depth() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Alpha", "Charlie").with_max_depth(1))
        .await
        .unwrap();

    assert!(matches!(outcome, PathOutcome::NoPath { max_depth: 1, .. }));
    assert_eq!(outcome.hops(), None);
}

#[tokio::test]
async fn test_path_traverses_edges_in_either_direction() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Charlie", "Alpha"))
        .await
        .unwrap();

    match outcome {
        PathOutcome::Found { path, .. } => assert_eq!(path, vec!["Charlie", "Bravo", "Alpha"]),
        other => panic!("expected path, got {:?}", other),
    }
}

#[tokio::test]
async fn test_path_direct_relationship_skips_bfs() {
    let f = Fixture::abc().await;

    for max_depth in 1..=MAX_PATH_DEPTH {
        let outcome = f
            .service
            .find_path(&PathQuery::new("Bravo", "Alpha").with_max_depth(max_depth))
            .await
            .unwrap();

        match outcome {
            PathOutcome::Direct {
                relationship_type,
                strength,
                direction,
                ..
            } => {
                assert_eq!(relationship_type, RelationshipType::RelatedTo);
                assert_eq!(strength, 5);
                assert_eq!(direction, Direction::Incoming);
            }
            other => panic!("expected direct, got {:?}", other),
        }
    }
    assert_eq!(f.recorder.incident_edge_queries(), 0);
}

#[tokio::test]
async fn test_path_same_entity_issues_no_relationship_query() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("alpha", "ALPHA"))
        .await
        .unwrap();

    assert!(matches!(outcome, PathOutcome::SameEntity { ref entity } if entity.id == "a"));
    assert_eq!(f.recorder.relationship_queries(), 0);
}

#[tokio::test]
async fn test_path_not_found_lists_missing_names() {
    let f = Fixture::abc().await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Ghost", "Phantom"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        PathOutcome::NotFound {
            missing: vec!["Ghost".to_string(), "Phantom".to_string()]
        }
    );

    let outcome = f
        .service
        .find_path(&PathQuery::new("Alpha", "Phantom"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        PathOutcome::NotFound {
            missing: vec!["Phantom".to_string()]
        }
    );
    assert_eq!(f.recorder.relationship_queries(), 0);
}

#[tokio::test]
async fn test_path_found_at_exact_depth_bound() {
    let f = Fixture::chain(6).await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Node 0", "Node 5").with_max_depth(5))
        .await
        .unwrap();
    assert_eq!(outcome.hops(), Some(5));

    let outcome = f
        .service
        .find_path(&PathQuery::new("Node 0", "Node 5").with_max_depth(4))
        .await
        .unwrap();
    assert!(matches!(outcome, PathOutcome::NoPath { .. }));
}

#[tokio::test]
async fn test_path_is_shortest_when_longer_route_exists() {
    let f = Fixture::chain(5).await;
    // Shortcut n0 - x - n4 beside the four-hop chain
    f.entity("x", "Shortcut", EntityCategory::Fact, 50).await;
    f.edge("n0", "x", "related_to", 1).await;
    f.edge("x", "n4", "related_to", 1).await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Node 0", "Node 4").with_max_depth(5))
        .await
        .unwrap();

    match outcome {
        PathOutcome::Found { path, .. } => assert_eq!(path, vec!["Node 0", "Shortcut", "Node 4"]),
        other => panic!("expected path, got {:?}", other),
    }
}

#[tokio::test]
async fn test_path_disconnected_components() {
    let f = Fixture::abc().await;
    f.entity("z", "Zeta", EntityCategory::Rule, 10).await;

    let outcome = f
        .service
        .find_path(&PathQuery::new("Alpha", "Zeta").with_max_depth(5))
        .await
        .unwrap();
    assert!(matches!(outcome, PathOutcome::NoPath { max_depth: 5, .. }));
}

#[tokio::test]
async fn test_path_cancelled_before_first_level() {
    let f = Fixture::abc().await;
    let cancel = CancellationFlag::new();
    cancel.cancel();

    let err = f
        .service
        .find_path_with_cancel(&PathQuery::new("Alpha", "Charlie"), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphServiceError::Cancelled { depth: 1 }));
}

#[tokio::test]
async fn test_path_rejects_out_of_range_depth() {
    let f = Fixture::abc().await;
    for depth in [0, MAX_PATH_DEPTH + 1] {
        let err = f
            .service
            .find_path(&PathQuery::new("Alpha", "Charlie").with_max_depth(depth))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}

// =========================================================================
// Cluster analysis
// =========================================================================

#[tokio::test]
async fn test_clusters_hub_ordering_and_counts() {
    let f = Fixture::new().await;
    f.entity("h1", "Hub One", EntityCategory::Project, 40).await;
    f.entity("h2", "Hub Two", EntityCategory::Project, 90).await;
    f.entity("h3", "Hub Three", EntityCategory::Person, 10).await;
    for i in 0..4 {
        f.entity(&format!("l{}", i), &format!("Leaf {}", i), EntityCategory::Fact, 5)
            .await;
    }
    f.entity("lonely", "Lonely", EntityCategory::Goal, 1).await;
    // h1: 3 out + 1 in, h2: 4 out, h3: 2 out
    f.edge("h1", "l0", "knows", 5).await;
    f.edge("h1", "l1", "knows", 5).await;
    f.edge("h1", "l2", "knows", 5).await;
    f.edge("h3", "h1", "part_of", 8).await;
    for i in 0..4 {
        f.edge("h2", &format!("l{}", i), "related_to", 2).await;
    }
    f.edge("h3", "l3", "causes", 10).await;

    let report = f
        .service
        .analyze_clusters(&ClusterQuery::new(2))
        .await
        .unwrap();

    let names: Vec<&str> = report.hubs.iter().map(|h| h.name.as_str()).collect();
    // h1 and h2 tie on 4; h2 wins on importance
    assert_eq!(names[..2], ["Hub Two", "Hub One"]);
    let h1 = report.hubs.iter().find(|h| h.id == "h1").unwrap();
    assert_eq!((h1.outgoing, h1.incoming, h1.total), (3, 1, 4));
    assert!(report.hubs.iter().all(|h| h.total >= 2));
    for pair in report.hubs.windows(2) {
        assert!(
            pair[0].total > pair[1].total
                || (pair[0].total == pair[1].total
                    && pair[0].importance_score >= pair[1].importance_score)
        );
    }

    assert_eq!(report.isolated_count, 1);
    assert_eq!(report.total_entities, 8);
    assert_eq!(report.total_relationships, 9);

    assert_eq!(report.categories[0].category, EntityCategory::Fact);
    assert_eq!(report.categories[0].count, 4);
    assert_eq!(report.categories[0].max_importance, 5);

    let related = &report.relationship_types[0];
    assert_eq!(related.relationship_type, RelationshipType::RelatedTo);
    assert_eq!(related.count, 4);
    assert_eq!(related.avg_strength, 2.0);
}

#[tokio::test]
async fn test_clusters_hub_list_capped_at_ten() {
    let f = Fixture::new().await;
    f.entity("center", "Center", EntityCategory::Project, 50).await;
    for i in 0..15 {
        f.entity(&format!("p{}", i), &format!("Peer {}", i), EntityCategory::Person, 50)
            .await;
        f.edge("center", &format!("p{}", i), "knows", 5).await;
    }

    let report = f
        .service
        .analyze_clusters(&ClusterQuery::new(1))
        .await
        .unwrap();

    assert_eq!(report.hubs.len(), HUB_LIMIT as usize);
    assert_eq!(report.hubs[0].id, "center");
    assert_eq!(report.hubs[0].total, 15);
    assert_eq!(report.isolated_count, 0);
}

#[tokio::test]
async fn test_clusters_counts_self_loop_once() {
    let f = Fixture::new().await;
    f.entity("a", "Alpha", EntityCategory::Fact, 50).await;
    f.entity("b", "Bravo", EntityCategory::Fact, 50).await;
    f.edge("a", "b", "related_to", 5).await;
    // Relationship::validate rejects self-loops, but the table accepts them
    f.db.connect_with_timeout()
        .await
        .unwrap()
        .execute(
            "INSERT INTO relationships (id, from_entity_id, to_entity_id, relationship_type, strength)
             VALUES ('loop', 'a', 'a', 'related_to', 5)",
            (),
        )
        .await
        .unwrap();

    let report = f
        .service
        .analyze_clusters(&ClusterQuery::new(1))
        .await
        .unwrap();

    let a = report.hubs.iter().find(|h| h.id == "a").unwrap();
    assert_eq!((a.outgoing, a.incoming, a.total), (2, 1, 2));
    assert_eq!(report.hubs[0].id, "a");
    assert_eq!(report.total_relationships, 2);

    // a has two edges, so a threshold of three excludes it
    let report = f
        .service
        .analyze_clusters(&ClusterQuery::new(3))
        .await
        .unwrap();
    assert!(report.hubs.is_empty());
}

#[tokio::test]
async fn test_clusters_on_empty_graph() {
    let f = Fixture::new().await;
    let report = f
        .service
        .analyze_clusters(&ClusterQuery::default())
        .await
        .unwrap();

    assert!(report.hubs.is_empty());
    assert!(report.categories.is_empty());
    assert!(report.relationship_types.is_empty());
    assert_eq!(report.isolated_count, 0);
    assert_eq!(report.total_entities, 0);
}

#[tokio::test]
async fn test_clusters_rejects_zero_threshold() {
    let f = Fixture::new().await;
    let err = f
        .service
        .analyze_clusters(&ClusterQuery::new(0))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}

// =========================================================================
// Store failures
// =========================================================================

#[tokio::test]
async fn test_store_failure_propagates() {
    let service = GraphQueryService::new(Arc::new(FailingExecutor));

    let err = service
        .find_connections(&ConnectionQuery::new("Alpha"))
        .await
        .unwrap_err();
    assert!(matches!(err, GraphServiceError::DatabaseError(_)));

    let err = service
        .find_path(&PathQuery::new("Alpha", "Bravo"))
        .await
        .unwrap_err();
    assert!(matches!(err, GraphServiceError::DatabaseError(_)));

    let err = service
        .analyze_clusters(&ClusterQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphServiceError::DatabaseError(_)));
}

#[test]
fn test_reconstruct_path_walks_predecessors() {
    let predecessor = HashMap::from([
        ("b".to_string(), "a".to_string()),
        ("c".to_string(), "b".to_string()),
        ("x".to_string(), "a".to_string()),
    ]);
    assert_eq!(reconstruct_path(&predecessor, "a", "c"), vec!["a", "b", "c"]);
    assert_eq!(reconstruct_path(&predecessor, "a", "a"), vec!["a"]);
}
