//! Database Layer
//!
//! This module handles all database interactions using libsql:
//!
//! - Database initialization and connection management
//! - The `entities` / `relationships` schema
//! - The [`QueryExecutor`] seam the graph query layer runs on
//! - Store-side writers and demo seed data
//!
//! # Architecture
//!
//! The graph query layer owns no storage. It composes parameterized SQL and
//! hands it to a [`QueryExecutor`]; [`DatabaseService`] is the production
//! implementation backed by an embedded libsql file.

mod database;
mod error;
mod executor;
pub mod seed;

pub use database::DatabaseService;
pub use error::DatabaseError;
pub use executor::{integer, text, QueryExecutor, QueryRow};
pub use seed::seed_demo_graph;
