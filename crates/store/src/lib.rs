//! Read-only SQLite adapter for the retail analytics store.
//!
//! [`SqlTool`] introspects the fixed Northwind-style schema and executes
//! ad-hoc analytic queries. Every operation opens its own connection and
//! releases it before returning; there is no pooling and no statement
//! parameterization — queries run verbatim under a read-only analytic
//! assumption.

pub mod bootstrap;
pub mod types;

pub use bootstrap::bootstrap_views;
pub use types::{QueryResult, SchemaMap};

use copilot_core::{AppError, AppResult};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Ad-hoc query tool over a file-backed SQLite database.
#[derive(Debug, Clone)]
pub struct SqlTool {
    db_path: PathBuf,
}

impl SqlTool {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> AppResult<Connection> {
        Connection::open(&self.db_path)
            .map_err(|e| AppError::Store(format!("Failed to open database {:?}: {}", self.db_path, e)))
    }

    /// Introspect the current schema: every table mapped to its column
    /// names in declared order.
    ///
    /// Built fresh on every call. A table whose columns cannot be read is
    /// surfaced as an empty column list with a warning, not a failure.
    pub fn schema(&self) -> AppResult<SchemaMap> {
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .map_err(|e| AppError::Store(format!("Failed to list tables: {}", e)))?;

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| AppError::Store(format!("Failed to list tables: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        let mut schema = SchemaMap::new();
        for table in tables {
            match table_columns(&conn, &table) {
                Ok(columns) => {
                    schema.insert(table, columns);
                }
                Err(e) => {
                    tracing::warn!("Could not read columns for table '{}': {}", table, e);
                    schema.insert(table, Vec::new());
                }
            }
        }

        Ok(schema)
    }

    /// List the names of all views in the store.
    pub fn views(&self) -> AppResult<Vec<String>> {
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='view'")
            .map_err(|e| AppError::Store(format!("Failed to list views: {}", e)))?;

        let views = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| AppError::Store(format!("Failed to list views: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(views)
    }

    /// Execute one query string verbatim.
    ///
    /// Total: any failure — unreachable database, malformed SQL, runtime
    /// error — is captured into a failed [`QueryResult`] and never
    /// propagates. The connection is released on every path.
    pub fn run(&self, query: &str) -> QueryResult {
        let conn = match self.connect() {
            Ok(conn) => conn,
            Err(e) => return QueryResult::err(e.to_string()),
        };

        match execute_query(&conn, query) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("Query failed: {}", e);
                QueryResult::err(e.to_string())
            }
        }
    }

    /// Bounded `SELECT *` preview of a table.
    pub fn sample(&self, table: &str, limit: usize) -> QueryResult {
        let query = format!("SELECT * FROM {} LIMIT {}", quote_ident(table), limit);
        self.run(&query)
    }
}

/// Quote a table name when it contains a space or hyphen.
pub fn quote_ident(name: &str) -> String {
    if name.contains(' ') || name.contains('-') {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
}

fn execute_query(conn: &Connection, query: &str) -> rusqlite::Result<QueryResult> {
    let mut stmt = conn.prepare(query)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(value_to_json(row.get_ref(idx)?));
            }
            Ok(values)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(QueryResult::ok(columns, rows))
}

/// Map a SQLite value to JSON: NULL→null, INTEGER/REAL→number, TEXT→string,
/// BLOB→lossy string.
fn value_to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Value::from(f),
        ValueRef::Text(t) => serde_json::Value::from(String::from_utf8_lossy(t).to_string()),
        ValueRef::Blob(b) => serde_json::Value::from(String::from_utf8_lossy(b).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded_db() -> (tempfile::TempDir, SqlTool) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("retail.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE Products (
                ProductID INTEGER PRIMARY KEY,
                ProductName TEXT NOT NULL,
                UnitPrice REAL
            );
            CREATE TABLE "Order Details" (
                OrderID INTEGER,
                ProductID INTEGER,
                Quantity INTEGER
            );
            INSERT INTO Products VALUES (1, 'Chai', 18.0);
            INSERT INTO Products VALUES (2, 'Chang', 19.0);
            INSERT INTO "Order Details" VALUES (10248, 1, 12);
            "#,
        )
        .unwrap();

        (dir, SqlTool::new(db_path))
    }

    #[test]
    fn test_schema_lists_columns_in_declared_order() {
        let (_dir, tool) = seeded_db();
        let schema = tool.schema().unwrap();

        assert_eq!(
            schema.get("Products").unwrap(),
            &vec![
                "ProductID".to_string(),
                "ProductName".to_string(),
                "UnitPrice".to_string()
            ]
        );
        // Table with a space in its name is introspected via quoting
        assert_eq!(schema.get("Order Details").unwrap().len(), 3);
    }

    #[test]
    fn test_schema_partial_on_unreadable_table() {
        let (_dir, tool) = seeded_db();
        // A keyword-named table has no space or hyphen, so it is passed to
        // PRAGMA table_info unquoted and the column read fails to parse.
        let conn = Connection::open(tool.db_path()).unwrap();
        conn.execute_batch(r#"CREATE TABLE "order" (OrderID INTEGER);"#)
            .unwrap();

        let schema = tool.schema().unwrap();

        // The unreadable table degrades to an empty column list
        assert_eq!(schema.get("order").unwrap(), &Vec::<String>::new());
        // and the rest of the schema survives
        assert_eq!(schema.get("Products").unwrap().len(), 3);
        assert_eq!(schema.get("Order Details").unwrap().len(), 3);
    }

    #[test]
    fn test_run_success() {
        let (_dir, tool) = seeded_db();
        let result = tool.run("SELECT ProductName, UnitPrice FROM Products ORDER BY ProductID");

        assert!(result.success);
        assert_eq!(result.columns, vec!["ProductName", "UnitPrice"]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows[0], vec![json!("Chai"), json!(18.0)]);
    }

    #[test]
    fn test_run_malformed_query_never_raises() {
        let (_dir, tool) = seeded_db();
        let result = tool.run("SELEKT * FORM nothing");

        assert!(!result.success);
        assert_eq!(result.row_count, 0);
        assert!(result.rows.is_empty());
        assert!(!result.error.as_deref().unwrap_or("").is_empty());
    }

    #[test]
    fn test_run_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        // Opening creates an empty database; querying a missing table fails
        let tool = SqlTool::new(dir.path().join("absent.db"));
        let result = tool.run("SELECT * FROM products");

        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_run_null_values() {
        let (_dir, tool) = seeded_db();
        tool.run("INSERT INTO Products VALUES (3, 'Aniseed Syrup', NULL)");
        let result = tool.run("SELECT UnitPrice FROM Products WHERE ProductID = 3");

        assert!(result.success);
        assert_eq!(result.rows[0][0], serde_json::Value::Null);
    }

    #[test]
    fn test_sample_quotes_and_limits() {
        let (_dir, tool) = seeded_db();

        let result = tool.sample("Order Details", 5);
        assert!(result.success);
        assert_eq!(result.row_count, 1);

        let result = tool.sample("Products", 1);
        assert_eq!(result.row_count, 1);
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("products"), "products");
        assert_eq!(quote_ident("Order Details"), "\"Order Details\"");
        assert_eq!(quote_ident("odd-name"), "\"odd-name\"");
    }

    #[test]
    fn test_views_lists_bootstrap_views() {
        let (_dir, tool) = seeded_db();
        let conn = Connection::open(tool.db_path()).unwrap();
        conn.execute_batch("CREATE VIEW products AS SELECT * FROM Products;")
            .unwrap();

        let views = tool.views().unwrap();
        assert_eq!(views, vec!["products".to_string()]);
    }
}
