//! Relationship Model
//!
//! A relationship is a typed, strength-weighted edge between two entities.
//! Edges are stored with a from/to pair, but traversal treats the graph as
//! undirected. [`Direction`] is only a view label relative to a pivot entity.

use crate::models::entity::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Lower bound (inclusive) for relationship strength
pub const MIN_STRENGTH: i64 = 1;

/// Upper bound (inclusive) for relationship strength
pub const MAX_STRENGTH: i64 = 10;

/// Default strength for relationships created without an explicit value
pub const DEFAULT_STRENGTH: i64 = 5;

/// Relationship type
///
/// The well-known types get their own variants. Any other string stored in
/// the `relationship_type` column is preserved as [`RelationshipType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RelationshipType {
    Knows,
    RelatedTo,
    DependsOn,
    SimilarTo,
    PartOf,
    Causes,
    Precedes,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Knows => "knows",
            Self::RelatedTo => "related_to",
            Self::DependsOn => "depends_on",
            Self::SimilarTo => "similar_to",
            Self::PartOf => "part_of",
            Self::Causes => "causes",
            Self::Precedes => "precedes",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "knows" => Self::Knows,
            "related_to" => Self::RelatedTo,
            "depends_on" => Self::DependsOn,
            "similar_to" => Self::SimilarTo,
            "part_of" => Self::PartOf,
            "causes" => Self::Causes,
            "precedes" => Self::Precedes,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        match t {
            RelationshipType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RelationshipType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an edge as seen from a pivot entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The pivot is the `from` endpoint
    Outgoing,
    /// The pivot is the `to` endpoint
    Incoming,
}

impl Direction {
    /// Label an edge relative to `pivot_id`
    pub fn relative_to(pivot_id: &str, from_entity_id: &str) -> Self {
        if pivot_id == from_entity_id {
            Self::Outgoing
        } else {
            Self::Incoming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
        }
    }

    /// Arrow used in text reports
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Outgoing => "→",
            Self::Incoming => "←",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored edge between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub from_entity_id: String,
    pub to_entity_id: String,
    pub relationship_type: RelationshipType,
    pub strength: i64,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a new relationship with default strength and full confidence
    pub fn new(
        from_entity_id: impl Into<String>,
        to_entity_id: impl Into<String>,
        relationship_type: impl Into<RelationshipType>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_entity_id: from_entity_id.into(),
            to_entity_id: to_entity_id.into(),
            relationship_type: relationship_type.into(),
            strength: DEFAULT_STRENGTH,
            confidence: 1.0,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_strength(mut self, strength: i64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Check field invariants before the relationship is written
    ///
    /// Endpoint existence is not checked here; the store's foreign keys
    /// enforce it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }
        if self.from_entity_id.is_empty() {
            return Err(ValidationError::MissingField("from_entity_id".to_string()));
        }
        if self.to_entity_id.is_empty() {
            return Err(ValidationError::MissingField("to_entity_id".to_string()));
        }
        if self.relationship_type.as_str().trim().is_empty() {
            return Err(ValidationError::MissingField(
                "relationship_type".to_string(),
            ));
        }
        if self.from_entity_id == self.to_entity_id {
            return Err(ValidationError::SelfReference(self.from_entity_id.clone()));
        }
        if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&self.strength) {
            return Err(ValidationError::StrengthOutOfRange(self.strength));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}
