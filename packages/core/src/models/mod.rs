//! Data Models
//!
//! This module contains the data structures read by the graph query layer:
//!
//! - `Entity` - A knowledge node (person, project, skill, ...)
//! - `Relationship` - A typed, strength-weighted edge between two entities
//! - `Direction` - View label for an edge relative to a pivot entity
//!
//! The query layer never writes these; they are created by the store-side
//! writers in [`crate::db`] and by seed data.

mod entity;
mod relationship;

pub use entity::{
    Entity, EntityCategory, ValidationError, DEFAULT_IMPORTANCE, MAX_IMPORTANCE,
};
pub use relationship::{
    Direction, Relationship, RelationshipType, DEFAULT_STRENGTH, MAX_STRENGTH, MIN_STRENGTH,
};
