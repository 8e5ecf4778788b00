//! Init command handler.
//!
//! Bootstraps the convenience views the query templates expect. The
//! underlying Northwind tables include names with spaces; the views give
//! them plain names.

use clap::Args;
use copilot_core::{config::AppConfig, AppResult};
use copilot_store::bootstrap_views;

/// Bootstrap the convenience views in the database
#[derive(Args, Debug)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let created = bootstrap_views(&config.db_path)?;
        println!(
            "{} convenience views in place in {:?}",
            created, config.db_path
        );
        Ok(())
    }
}
