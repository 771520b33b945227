//! Parameterized Query Seam
//!
//! The graph query layer talks to the store through exactly one interface:
//! a query template plus positional parameters in, rows out. Keeping the
//! seam this narrow lets tests wrap the real database and observe every
//! statement the layer issues.

use crate::db::DatabaseError;
use async_trait::async_trait;
use libsql::Value;

/// A fully materialized result row
///
/// Rows are decoded eagerly so no connection or cursor outlives the
/// `query` call that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRow {
    values: Vec<Value>,
}

impl QueryRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Decode a libsql row by reading every column
    pub fn from_libsql(row: &libsql::Row) -> Result<Self, DatabaseError> {
        let count = row.column_count();
        let mut values = Vec::with_capacity(count.max(0) as usize);
        for idx in 0..count {
            values.push(row.get_value(idx)?);
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn value(&self, index: usize) -> Result<&Value, DatabaseError> {
        self.values
            .get(index)
            .ok_or_else(|| DatabaseError::row_decode(index, "column index out of range"))
    }

    pub fn get_text(&self, index: usize) -> Result<String, DatabaseError> {
        match self.value(index)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(DatabaseError::row_decode(
                index,
                format!("expected text, found {:?}", other),
            )),
        }
    }

    pub fn get_opt_text(&self, index: usize) -> Result<Option<String>, DatabaseError> {
        match self.value(index)? {
            Value::Null => Ok(None),
            _ => self.get_text(index).map(Some),
        }
    }

    pub fn get_i64(&self, index: usize) -> Result<i64, DatabaseError> {
        match self.value(index)? {
            Value::Integer(i) => Ok(*i),
            Value::Real(r) => Ok(*r as i64),
            other => Err(DatabaseError::row_decode(
                index,
                format!("expected integer, found {:?}", other),
            )),
        }
    }

    pub fn get_f64(&self, index: usize) -> Result<f64, DatabaseError> {
        match self.value(index)? {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            // AVG over an empty group
            Value::Null => Ok(0.0),
            other => Err(DatabaseError::row_decode(
                index,
                format!("expected real, found {:?}", other),
            )),
        }
    }
}

/// Parameterized query execution
///
/// Implementations run `sql` with positional `?` parameters and return all
/// rows. A failure is returned as-is; callers never retry.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<QueryRow>, DatabaseError>;
}

/// Build a text parameter
pub fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

/// Build an integer parameter
pub fn integer(value: i64) -> Value {
    Value::Integer(value)
}
