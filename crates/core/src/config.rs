//! Configuration management for the Retail Analytics Copilot.
//!
//! This module handles loading and merging configuration from multiple
//! sources, later sources winning:
//! - Built-in defaults
//! - Config file (`copilot.yaml`)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default number of document chunks returned by a search.
pub const DEFAULT_TOP_K: usize = 3;

/// Main application configuration.
///
/// This struct holds all global options that affect CLI behavior across
/// commands: where the document corpus lives, where the SQLite database
/// lives, and how much the pipeline logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory containing the document corpus
    pub docs_dir: PathBuf,

    /// Path to the SQLite database file
    pub db_path: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Number of chunks returned per document search
    pub top_k: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    corpus: Option<CorpusConfig>,
    store: Option<StoreConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorpusConfig {
    docs_dir: Option<String>,
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreConfig {
    db_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("Docs"),
            db_path: PathBuf::from("Data/northwind.sqlite.db"),
            config_file: None,
            top_k: DEFAULT_TOP_K,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `COPILOT_DOCS`: Document corpus directory
    /// - `COPILOT_DB`: SQLite database path
    /// - `COPILOT_CONFIG`: Path to config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("COPILOT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("copilot.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(docs_dir) = std::env::var("COPILOT_DOCS") {
            config.docs_dir = PathBuf::from(docs_dir);
        }

        if let Ok(db_path) = std::env::var("COPILOT_DB") {
            config.db_path = PathBuf::from(db_path);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(corpus) = config_file.corpus {
            if let Some(docs_dir) = corpus.docs_dir {
                result.docs_dir = PathBuf::from(docs_dir);
            }
            if let Some(top_k) = corpus.top_k {
                result.top_k = top_k;
            }
        }

        if let Some(store) = config_file.store {
            if let Some(db_path) = store.db_path {
                result.db_path = PathBuf::from(db_path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        docs_dir: Option<PathBuf>,
        db_path: Option<PathBuf>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(docs_dir) = docs_dir {
            self.docs_dir = docs_dir;
        }

        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }
}
