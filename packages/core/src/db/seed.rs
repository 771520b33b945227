//! Demo Knowledge Graph
//!
//! Seeds a small, connected knowledge graph so the tools have something to
//! answer against on first launch. Seeding only happens when the `entities`
//! table is empty.

use crate::db::{DatabaseError, DatabaseService};
use crate::models::{Entity, EntityCategory, Relationship};
use tracing::info;

/// (id, name, category, importance, description)
const DEMO_ENTITIES: &[(&str, &str, EntityCategory, i64, &str)] = &[
    ("demo-alice", "Alice Chen", EntityCategory::Person, 90, "Staff engineer leading the platform team"),
    ("demo-bob", "Bob Martinez", EntityCategory::Person, 70, "Frontend developer"),
    ("demo-carol", "Carol Singh", EntityCategory::Person, 65, "Data scientist"),
    ("demo-platform", "Platform Rewrite", EntityCategory::Project, 85, "Migrating the API tier to Rust"),
    ("demo-dashboard", "Analytics Dashboard", EntityCategory::Project, 60, "Internal metrics dashboard"),
    ("demo-rust", "Rust", EntityCategory::Skill, 80, "Systems programming language"),
    ("demo-typescript", "TypeScript", EntityCategory::Skill, 70, "Typed JavaScript"),
    ("demo-sql", "SQL", EntityCategory::Skill, 75, "Relational query language"),
    ("demo-ship-q3", "Ship v2 by Q3", EntityCategory::Goal, 95, "Release the rewritten platform"),
    ("demo-dark-mode", "Prefers dark mode", EntityCategory::Preference, 20, "UI theme preference"),
    ("demo-code-review", "Two reviewers per PR", EntityCategory::Rule, 55, "Team review policy"),
    ("demo-remote", "Remote-first team", EntityCategory::Context, 40, "Distributed across three time zones"),
    ("demo-wal", "SQLite WAL mode", EntityCategory::Fact, 30, "Write-ahead logging allows concurrent readers"),
];

/// (from, to, type, strength, confidence)
const DEMO_RELATIONSHIPS: &[(&str, &str, &str, i64, f64)] = &[
    ("demo-alice", "demo-bob", "knows", 8, 1.0),
    ("demo-alice", "demo-carol", "knows", 6, 1.0),
    ("demo-alice", "demo-platform", "part_of", 10, 1.0),
    ("demo-alice", "demo-rust", "related_to", 9, 1.0),
    ("demo-bob", "demo-dashboard", "part_of", 7, 1.0),
    ("demo-bob", "demo-typescript", "related_to", 8, 1.0),
    ("demo-bob", "demo-dark-mode", "related_to", 3, 0.6),
    ("demo-carol", "demo-dashboard", "part_of", 6, 1.0),
    ("demo-carol", "demo-sql", "related_to", 9, 1.0),
    ("demo-platform", "demo-rust", "depends_on", 10, 1.0),
    ("demo-platform", "demo-ship-q3", "causes", 9, 1.0),
    ("demo-dashboard", "demo-sql", "depends_on", 7, 1.0),
    ("demo-dashboard", "demo-typescript", "depends_on", 6, 1.0),
    ("demo-code-review", "demo-platform", "related_to", 5, 1.0),
    ("demo-remote", "demo-code-review", "causes", 4, 0.7),
    ("demo-rust", "demo-typescript", "similar_to", 2, 0.5),
];

/// Seed the demo graph if the database has no entities yet
///
/// Returns the number of entities inserted (0 when the store was not empty).
pub async fn seed_demo_graph(db: &DatabaseService) -> Result<usize, DatabaseError> {
    if db.count_entities().await? > 0 {
        return Ok(0);
    }

    for (id, name, category, importance, description) in DEMO_ENTITIES {
        let entity = Entity::new(*name, *category)
            .with_id(*id)
            .with_importance(*importance)
            .with_description(*description);
        db.insert_entity(&entity).await?;
    }

    for (from, to, relationship_type, strength, confidence) in DEMO_RELATIONSHIPS {
        let relationship = Relationship::new(*from, *to, *relationship_type)
            .with_id(format!("{}--{}--{}", from, relationship_type, to))
            .with_strength(*strength)
            .with_confidence(*confidence);
        db.insert_relationship(&relationship).await?;
    }

    info!(
        "🌱 Seeded demo graph: {} entities, {} relationships",
        DEMO_ENTITIES.len(),
        DEMO_RELATIONSHIPS.len()
    );
    Ok(DEMO_ENTITIES.len())
}
