//! Convenience-view bootstrap.
//!
//! The query templates assume simple view names; the underlying Northwind
//! tables include names with spaces ("Order Details"). This one-time step
//! creates the aliases the templates rely on.

use copilot_core::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

/// View name / backing table pairs expected by the query templates.
pub const CONVENIENCE_VIEWS: &[(&str, &str)] = &[
    ("orders", "Orders"),
    ("order_items", "\"Order Details\""),
    ("products", "Products"),
    ("customers", "Customers"),
    ("categories", "Categories"),
    ("suppliers", "Suppliers"),
];

/// Create the convenience views if they do not already exist.
///
/// Idempotent; returns the number of views in place afterwards.
pub fn bootstrap_views(db_path: &Path) -> AppResult<usize> {
    if !db_path.exists() {
        return Err(AppError::Store(format!(
            "Database file not found: {:?}",
            db_path
        )));
    }

    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Store(format!("Failed to open database {:?}: {}", db_path, e)))?;

    for (view, table) in CONVENIENCE_VIEWS {
        conn.execute_batch(&format!(
            "CREATE VIEW IF NOT EXISTS {} AS SELECT * FROM {};",
            view, table
        ))
        .map_err(|e| AppError::Store(format!("Failed to create view '{}': {}", view, e)))?;

        tracing::debug!("View '{}' in place over {}", view, table);
    }

    tracing::info!("Bootstrapped {} convenience views", CONVENIENCE_VIEWS.len());

    Ok(CONVENIENCE_VIEWS.len())
}
