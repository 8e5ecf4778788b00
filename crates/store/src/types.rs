//! Relational adapter type definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from table name to its column names in declared order.
///
/// Built fresh at request time by [`crate::SqlTool::schema`]; never cached,
/// so it always reflects the store's structure at the moment of the call.
pub type SchemaMap = BTreeMap<String, Vec<String>>;

/// Outcome of executing one query.
///
/// Exactly one side is meaningful: on success `columns`/`rows` are
/// populated and `error` is `None`; on failure `error` carries the message
/// and `columns`/`rows` are empty. Use the constructors to uphold that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub success: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    pub row_count: usize,
    pub error: Option<String>,
}

impl QueryResult {
    /// Successful result from columns and rows.
    pub fn ok(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        let row_count = rows.len();
        Self {
            success: true,
            columns,
            rows,
            row_count,
            error: None,
        }
    }

    /// Failed result carrying the execution error.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            error: Some(message.into()),
        }
    }

    /// Render the rows as a compact single-line summary for synthesis.
    pub fn rows_text(&self) -> String {
        if !self.success {
            return String::new();
        }
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_counts_rows() {
        let result = QueryResult::ok(
            vec!["product".to_string()],
            vec![vec![json!("Chai")], vec![json!("Chang")]],
        );
        assert!(result.success);
        assert_eq!(result.row_count, 2);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_err_is_empty() {
        let result = QueryResult::err("no such table: nowhere");
        assert!(!result.success);
        assert!(result.columns.is_empty());
        assert!(result.rows.is_empty());
        assert_eq!(result.row_count, 0);
        assert_eq!(result.error.as_deref(), Some("no such table: nowhere"));
    }

    #[test]
    fn test_rows_text() {
        let result = QueryResult::ok(
            vec!["product".to_string(), "revenue".to_string()],
            vec![vec![json!("Chai"), json!(120.5)]],
        );
        assert_eq!(result.rows_text(), "\"Chai\", 120.5");
        assert_eq!(QueryResult::err("boom").rows_text(), "");
    }
}
