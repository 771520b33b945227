//! Database Connection Management
//!
//! This module provides the core database connection and initialization
//! functionality using libsql for the knowledge graph store.
//!
//! # Architecture
//!
//! - **Path-agnostic**: Accepts any valid PathBuf
//! - **Two tables**: `entities` (vertices) and `relationships` (edges)
//! - **WAL mode**: Write-Ahead Logging for better concurrency
//! - **Foreign keys**: Enabled per connection so edge endpoints cascade
//!
//! # Database Connection Patterns
//!
//! **ALWAYS use `connect_with_timeout()` in async functions**. It sets the
//! busy timeout and foreign key enforcement for the new connection.
//!
//! ```no_run
//! # use webmcp_graph_core::db::DatabaseService;
//! # use std::path::PathBuf;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db_service = DatabaseService::new(PathBuf::from("./data/graph.db")).await?;
//! let conn = db_service.connect_with_timeout().await?;
//! # Ok(())
//! # }
//! ```

use crate::db::error::DatabaseError;
use crate::db::executor::{integer, text, QueryExecutor, QueryRow};
use crate::models::{Entity, Relationship};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::params::Params;
use libsql::{Builder, Database, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

/// Timestamp format written to `created_at` / `updated_at` columns
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Database service for managing the libsql connection and schema
///
/// # Examples
///
/// ```no_run
/// use webmcp_graph_core::db::DatabaseService;
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db_service = DatabaseService::new(PathBuf::from("/path/to/graph.db")).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (wrapped in Arc for sharing)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

impl DatabaseService {
    /// Create a new DatabaseService with the specified database path
    ///
    /// This will:
    /// 1. Ensure the parent directory exists (create if needed)
    /// 2. Open/create the database file
    /// 3. Initialize the schema (CREATE TABLE IF NOT EXISTS)
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the parent directory cannot be created,
    /// the connection fails, or schema initialization fails.
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        let is_new_database = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        DatabaseError::permission_denied(db_path.clone())
                    } else {
                        DatabaseError::DirectoryCreationFailed(e)
                    }
                })?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema(is_new_database).await?;

        debug!("Opened graph database at {}", service.db_path.display());
        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so we must use query() instead of execute().
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), DatabaseError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Initialize database schema and configuration
    ///
    /// Idempotent: every statement uses `IF NOT EXISTS`.
    ///
    /// # Schema
    ///
    /// - `entities`: knowledge nodes with category and importance
    /// - `relationships`: typed edges with strength and confidence
    /// - Indexes on entity name/category and on both edge endpoints
    async fn initialize_schema(&self, is_new_database: bool) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS entities (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                importance_score INTEGER NOT NULL DEFAULT 50
                    CHECK (importance_score BETWEEN 0 AND 100),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!("Failed to create entities table: {}", e))
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS relationships (
                id TEXT PRIMARY KEY,
                from_entity_id TEXT NOT NULL,
                to_entity_id TEXT NOT NULL,
                relationship_type TEXT NOT NULL,
                strength INTEGER NOT NULL DEFAULT 5
                    CHECK (strength BETWEEN 1 AND 10),
                confidence REAL NOT NULL DEFAULT 1.0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                -- Deleting an entity removes every edge that touches it
                FOREIGN KEY (from_entity_id) REFERENCES entities(id) ON DELETE CASCADE,
                FOREIGN KEY (to_entity_id) REFERENCES entities(id) ON DELETE CASCADE
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!(
                "Failed to create relationships table: {}",
                e
            ))
        })?;

        self.create_core_indexes(&conn).await?;

        // Flush schema for new files so a second connection sees the tables
        if is_new_database {
            self.execute_pragma(&conn, "PRAGMA wal_checkpoint(TRUNCATE)")
                .await?;
        }

        Ok(())
    }

    /// Create indexes used by name resolution and edge lookups
    async fn create_core_indexes(&self, conn: &libsql::Connection) -> Result<(), DatabaseError> {
        const INDEXES: &[(&str, &str)] = &[
            (
                "idx_entities_name",
                "CREATE INDEX IF NOT EXISTS idx_entities_name ON entities(name)",
            ),
            (
                "idx_entities_category",
                "CREATE INDEX IF NOT EXISTS idx_entities_category ON entities(category)",
            ),
            (
                "idx_relationships_from",
                "CREATE INDEX IF NOT EXISTS idx_relationships_from ON relationships(from_entity_id)",
            ),
            (
                "idx_relationships_to",
                "CREATE INDEX IF NOT EXISTS idx_relationships_to ON relationships(to_entity_id)",
            ),
            (
                "idx_relationships_type",
                "CREATE INDEX IF NOT EXISTS idx_relationships_type ON relationships(relationship_type)",
            ),
        ];

        for (name, sql) in INDEXES {
            conn.execute(sql, ()).await.map_err(|e| {
                DatabaseError::initialization_failed(format!(
                    "Failed to create index '{}': {}",
                    name, e
                ))
            })?;
        }

        Ok(())
    }

    /// Get a synchronous connection handle
    ///
    /// Prefer [`connect_with_timeout`](Self::connect_with_timeout) in async code.
    pub fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        self.db.connect().map_err(DatabaseError::LibsqlError)
    }

    /// Get an async connection with busy timeout and foreign keys configured
    ///
    /// `foreign_keys` is a per-connection setting in SQLite, so it is applied
    /// here rather than once at schema initialization.
    pub async fn connect_with_timeout(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self.connect()?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;
        self.execute_pragma(&conn, "PRAGMA foreign_keys = ON")
            .await?;

        Ok(conn)
    }

    //
    // STORE-SIDE WRITERS
    // The graph query layer never calls these; they exist for seeding,
    // tests and embedding applications that own the CRUD surface.
    //

    /// Insert an entity
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidRecord` if the entity fails validation,
    /// or a SQL error (e.g. duplicate id).
    pub async fn insert_entity(&self, entity: &Entity) -> Result<(), DatabaseError> {
        entity.validate()?;
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO entities (id, name, category, description, importance_score, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            Params::Positional(vec![
                text(&entity.id),
                text(&entity.name),
                text(entity.category.as_str()),
                text(&entity.description),
                integer(entity.importance_score),
                text(format_timestamp(&entity.created_at)),
                text(format_timestamp(&entity.updated_at)),
            ]),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to insert entity '{}': {}", entity.id, e))
        })?;

        trace!("Inserted entity {} ({})", entity.id, entity.name);
        Ok(())
    }

    /// Insert a relationship
    ///
    /// Both endpoints must already exist; the foreign keys reject dangling edges.
    pub async fn insert_relationship(
        &self,
        relationship: &Relationship,
    ) -> Result<(), DatabaseError> {
        relationship.validate()?;
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO relationships (id, from_entity_id, to_entity_id, relationship_type, strength, confidence, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            Params::Positional(vec![
                text(&relationship.id),
                text(&relationship.from_entity_id),
                text(&relationship.to_entity_id),
                text(relationship.relationship_type.as_str()),
                integer(relationship.strength),
                Value::Real(relationship.confidence),
                text(format_timestamp(&relationship.created_at)),
            ]),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!(
                "Failed to insert relationship '{}': {}",
                relationship.id, e
            ))
        })?;

        trace!(
            "Inserted relationship {} ({} -[{}]-> {})",
            relationship.id,
            relationship.from_entity_id,
            relationship.relationship_type,
            relationship.to_entity_id
        );
        Ok(())
    }

    /// Delete an entity and, through the cascade, every edge touching it
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_entity(&self, id: &str) -> Result<bool, DatabaseError> {
        let conn = self.connect_with_timeout().await?;
        let affected = conn
            .execute(
                "DELETE FROM entities WHERE id = ?",
                Params::Positional(vec![text(id)]),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to delete entity '{}': {}", id, e))
            })?;
        Ok(affected > 0)
    }

    /// Number of stored entities
    pub async fn count_entities(&self) -> Result<i64, DatabaseError> {
        let rows = self
            .query("SELECT COUNT(*) FROM entities", Vec::new())
            .await?;
        match rows.first() {
            Some(row) => row.get_i64(0),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl QueryExecutor for DatabaseService {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<QueryRow>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut rows = conn
            .query(sql, Params::Positional(params))
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Query failed: {}", e)))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to fetch row: {}", e)))?
        {
            out.push(QueryRow::from_libsql(&row)?);
        }

        Ok(out)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(SQLITE_TIMESTAMP_FORMAT).to_string()
}
