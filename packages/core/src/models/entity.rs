//! Knowledge Entity Model
//!
//! An entity is a stored knowledge node: a person, a project, a preference,
//! a rule and so on. Entities are the vertices of the relationship graph.
//!
//! # Examples
//!
//! ```rust
//! use webmcp_graph_core::models::{Entity, EntityCategory};
//!
//! let entity = Entity::new("Rust", EntityCategory::Skill)
//!     .with_description("Systems programming language")
//!     .with_importance(80);
//!
//! assert_eq!(entity.category, EntityCategory::Skill);
//! assert!(entity.validate().is_ok());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Default importance for entities created without an explicit score
pub const DEFAULT_IMPORTANCE: i64 = 50;

/// Upper bound (inclusive) for `importance_score`
pub const MAX_IMPORTANCE: i64 = 100;

/// Validation errors for entity and relationship models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid entity category: {0}")]
    InvalidCategory(String),

    #[error("Importance score {0} is outside 0..=100")]
    ImportanceOutOfRange(i64),

    #[error("Relationship strength {0} is outside 1..=10")]
    StrengthOutOfRange(i64),

    #[error("Confidence {0} is outside 0.0..=1.0")]
    ConfidenceOutOfRange(f64),

    #[error("Relationship cannot connect an entity to itself: {0}")]
    SelfReference(String),
}

/// Category of a knowledge entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Fact,
    Preference,
    Skill,
    Rule,
    Context,
    Person,
    Project,
    Goal,
}

impl EntityCategory {
    /// All categories, in declaration order
    pub const ALL: [EntityCategory; 8] = [
        Self::Fact,
        Self::Preference,
        Self::Skill,
        Self::Rule,
        Self::Context,
        Self::Person,
        Self::Project,
        Self::Goal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Preference => "preference",
            Self::Skill => "skill",
            Self::Rule => "rule",
            Self::Context => "context",
            Self::Person => "person",
            Self::Project => "project",
            Self::Goal => "goal",
        }
    }
}

impl FromStr for EntityCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored knowledge node
///
/// # Fields
///
/// - `id`: Unique identifier (UUID v4 unless supplied by the caller)
/// - `name`: Display name, the target of fuzzy name resolution
/// - `category`: One of [`EntityCategory`]
/// - `description`: Free text, may be empty
/// - `importance_score`: 0 to 100, used as a ranking tie-break
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub category: EntityCategory,
    pub description: String,
    pub importance_score: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    /// Create a new entity with a generated id and default importance
    pub fn new(name: impl Into<String>, category: EntityCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            description: String::new(),
            importance_score: DEFAULT_IMPORTANCE,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the generated id (used by seed data and tests)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_importance(mut self, importance_score: i64) -> Self {
        self.importance_score = importance_score;
        self
    }

    /// Check field invariants before the entity is written
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `id` or `name` is blank, or the
    /// importance score falls outside `0..=100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if !(0..=MAX_IMPORTANCE).contains(&self.importance_score) {
            return Err(ValidationError::ImportanceOutOfRange(
                self.importance_score,
            ));
        }
        Ok(())
    }
}
