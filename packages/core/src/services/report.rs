//! Text Reports
//!
//! Human-readable rendering of graph query outcomes. These strings are what
//! an agent sees in a tool result, so they favour short lines and explicit
//! numbers over decoration.

use crate::services::graph_service::{
    ClusterReport, ConnectionOutcome, ConnectionReport, PathOutcome, ResolvedEntity,
};
use std::fmt::{self, Display, Formatter};

fn write_entity_header(f: &mut Formatter<'_>, entity: &ResolvedEntity) -> fmt::Result {
    writeln!(
        f,
        "{} [{}] importance {}/100",
        entity.name, entity.category, entity.importance_score
    )?;
    if !entity.description.is_empty() {
        writeln!(f, "{}", entity.description)?;
    }
    Ok(())
}

impl Display for ConnectionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Connections for ")?;
        write_entity_header(f, &self.pivot)?;

        if self.connections.is_empty() {
            return write!(
                f,
                "\nNo connections found with strength >= {}.",
                self.min_strength
            );
        }

        writeln!(
            f,
            "\n{} connection(s) with strength >= {} (limit {}):",
            self.connections.len(),
            self.min_strength,
            self.limit
        )?;

        for group in self.grouped() {
            writeln!(
                f,
                "\n{} ({}):",
                group.relationship_type,
                group.connections.len()
            )?;
            for connection in group.shown() {
                writeln!(
                    f,
                    "  {} {} [{}] strength {}/10, importance {} ({})",
                    connection.direction.arrow(),
                    connection.neighbor_name,
                    connection.neighbor_category,
                    connection.strength,
                    connection.neighbor_importance,
                    connection.direction
                )?;
            }
            if group.remainder() > 0 {
                writeln!(f, "  ... and {} more", group.remainder())?;
            }
        }
        Ok(())
    }
}

impl Display for ConnectionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { query } => write!(f, "Entity \"{}\" not found.", query),
            Self::Found(report) => Display::fmt(report, f),
        }
    }
}

impl Display for PathOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { missing } => {
                let names: Vec<String> = missing.iter().map(|m| format!("\"{}\"", m)).collect();
                write!(f, "Entity not found: {}.", names.join(", "))
            }
            Self::SameEntity { entity } => write!(
                f,
                "Both names refer to the same entity: {} [{}].",
                entity.name, entity.category
            ),
            Self::Direct {
                from,
                to,
                relationship_type,
                strength,
                direction,
            } => write!(
                f,
                "Direct connection: {} {} {} ({}, strength {}/10).",
                from.name,
                direction.arrow(),
                to.name,
                relationship_type,
                strength
            ),
            Self::Found { from, to, path } => write!(
                f,
                "Path from {} to {} ({} steps):\n{}",
                from.name,
                to.name,
                self.hops().unwrap_or_default(),
                path.join(" → ")
            ),
            Self::NoPath {
                from,
                to,
                max_depth,
            } => write!(
                f,
                "No path found between {} and {} within {} steps.",
                from.name, to.name, max_depth
            ),
        }
    }
}

impl Display for ClusterReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph analysis: {} entities, {} relationships",
            self.total_entities, self.total_relationships
        )?;

        writeln!(f, "\nHubs (>= {} connections):", self.min_connections)?;
        if self.hubs.is_empty() {
            writeln!(f, "  none")?;
        }
        for (rank, hub) in self.hubs.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} [{}] {} connections ({} out, {} in), importance {}",
                rank + 1,
                hub.name,
                hub.category,
                hub.total,
                hub.outgoing,
                hub.incoming,
                hub.importance_score
            )?;
        }

        writeln!(f, "\nCategories:")?;
        if self.categories.is_empty() {
            writeln!(f, "  none")?;
        }
        for stats in &self.categories {
            writeln!(
                f,
                "  {}: {} entities, avg importance {:.1}, max {}",
                stats.category, stats.count, stats.avg_importance, stats.max_importance
            )?;
        }

        writeln!(f, "\nRelationship types:")?;
        if self.relationship_types.is_empty() {
            writeln!(f, "  none")?;
        }
        for stats in &self.relationship_types {
            writeln!(
                f,
                "  {}: {} relationships, avg strength {:.1}, max {}",
                stats.relationship_type, stats.count, stats.avg_strength, stats.max_strength
            )?;
        }

        write!(f, "\nIsolated entities: {}", self.isolated_count)
    }
}
