//! Prepared statements, bound values, and result rows.

use crate::error::{DbError, DbResult};

/// A value bound to a statement parameter or read from a result column
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// SQL text plus positional (`?`) parameters
///
/// Statements are plain values; the backend prepares them when they run,
/// which lets a caller assemble several into one atomic
/// [`batch`](crate::Database::batch).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Prepare `sql` with no parameters bound yet
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// One result row, columns in select-list order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Read an integer column
    pub fn get_i64(&self, index: usize) -> DbResult<i64> {
        match self.values.get(index) {
            Some(Value::Integer(v)) => Ok(*v),
            _ => Err(DbError::Decode {
                index,
                expected: "integer",
            }),
        }
    }

    /// Read a non-null text column
    pub fn get_str(&self, index: usize) -> DbResult<&str> {
        match self.get_opt_str(index)? {
            Some(s) => Ok(s),
            None => Err(DbError::Decode {
                index,
                expected: "text",
            }),
        }
    }

    /// Read a nullable text column
    pub fn get_opt_str(&self, index: usize) -> DbResult<Option<&str>> {
        match self.values.get(index) {
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(Value::Null) => Ok(None),
            _ => Err(DbError::Decode {
                index,
                expected: "text",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_appends_in_order() {
        let stmt = Statement::new("INSERT INTO t VALUES (?, ?, ?)")
            .bind(7_u32)
            .bind("seven")
            .bind(None::<&str>);
        assert_eq!(stmt.sql(), "INSERT INTO t VALUES (?, ?, ?)");
        assert_eq!(
            stmt.params(),
            &[
                Value::Integer(7),
                Value::Text("seven".to_string()),
                Value::Null
            ]
        );
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::new(vec![
            Value::Integer(1),
            Value::Text("init".to_string()),
            Value::Null,
        ]);
        assert_eq!(row.len(), 3);
        assert_eq!(row.get_i64(0).unwrap(), 1);
        assert_eq!(row.get_str(1).unwrap(), "init");
        assert_eq!(row.get_opt_str(2).unwrap(), None);
        assert!(matches!(row.get_str(2), Err(DbError::Decode { index: 2, .. })));
        assert!(matches!(row.get_i64(1), Err(DbError::Decode { index: 1, .. })));
        assert!(row.get(3).is_none());
    }
}
