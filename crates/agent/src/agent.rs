//! The hybrid question-answering orchestrator.
//!
//! Sequences routing, retrieval, query synthesis, execution, and answer
//! synthesis for a single question as an explicit enum-driven state
//! machine, and always emits a response envelope — empty intermediate
//! results are valid outcomes, not errors.

use crate::router::{self, Route};
use crate::sqlgen;
use crate::state::{AgentOutcome, AgentState};
use crate::synthesize;
use copilot_core::AppConfig;
use copilot_retrieval::Retriever;
use copilot_store::SqlTool;

/// Confidence when a relational query executed successfully.
pub const CONFIDENCE_EXECUTED: f64 = 0.9;

/// Confidence when a relational query executed and failed.
pub const CONFIDENCE_FAILED: f64 = 0.3;

/// Pipeline stages for one question.
///
/// The reachable path depends on the route: `rag` skips the relational
/// stages, `sql` skips retrieval, `hybrid` visits both, and an empty
/// generated query skips execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Route,
    Retrieve,
    Generate,
    Execute,
    Synthesize,
    Done,
}

impl Stage {
    /// The transition table: next stage given the decided route and
    /// whether a non-empty query was generated.
    pub fn next(self, route: Route, has_sql: bool) -> Stage {
        match self {
            Stage::Route => match route {
                Route::Rag | Route::Hybrid => Stage::Retrieve,
                Route::Sql => Stage::Generate,
            },
            Stage::Retrieve => match route {
                Route::Rag => Stage::Synthesize,
                _ => Stage::Generate,
            },
            Stage::Generate => {
                if has_sql {
                    Stage::Execute
                } else {
                    Stage::Synthesize
                }
            }
            Stage::Execute => Stage::Synthesize,
            Stage::Synthesize => Stage::Done,
            Stage::Done => Stage::Done,
        }
    }
}

/// Hybrid agent over a document corpus and a relational store.
///
/// Single-threaded and synchronous: one question at a time, no shared
/// state across questions beyond the loaded corpus chunks.
pub struct Agent {
    retriever: Retriever,
    sql_tool: SqlTool,
    top_k: usize,
}

impl Agent {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            retriever: Retriever::new(config.docs_dir.clone()),
            sql_tool: SqlTool::new(config.db_path.clone()),
            top_k: config.top_k,
        }
    }

    /// Build an agent from explicit parts (used by tests).
    pub fn from_parts(retriever: Retriever, sql_tool: SqlTool, top_k: usize) -> Self {
        Self {
            retriever,
            sql_tool,
            top_k,
        }
    }

    /// Process one question to completion.
    ///
    /// Never fails: every component degrades to a valid (possibly empty)
    /// result, and the terminal stage always yields an envelope.
    pub fn run(&mut self, question: &str, format_hint: &str) -> AgentOutcome {
        let mut state = AgentState::new(question);
        let mut stage = Stage::Route;

        while stage != Stage::Done {
            match stage {
                Stage::Route => {
                    state.route = router::classify(question);
                    tracing::info!("Routed question as '{}'", state.route.as_str());
                }
                Stage::Retrieve => {
                    state.document_results = self.retriever.search(question, self.top_k);
                    tracing::info!("Retrieved {} chunks", state.document_results.len());
                }
                Stage::Generate => {
                    let schema = match self.sql_tool.schema() {
                        Ok(schema) => schema,
                        Err(e) => {
                            // Degrade to an empty schema; templates embed
                            // their own joins so generation still runs.
                            tracing::warn!("Schema introspection failed: {}", e);
                            Default::default()
                        }
                    };
                    let generated = sqlgen::generate(question, &schema);
                    tracing::info!("Query synthesis: {}", generated.explanation);
                    state.sql_query = generated.sql;
                }
                Stage::Execute => {
                    let result = self.sql_tool.run(&state.sql_query);
                    if result.success {
                        tracing::info!("Query returned {} rows", result.row_count);
                        state.confidence = CONFIDENCE_EXECUTED;
                    } else {
                        tracing::warn!(
                            "Query failed: {}",
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                        state.confidence = CONFIDENCE_FAILED;
                    }
                    state.sql_results = Some(result);
                }
                Stage::Synthesize => {
                    let query_results = state
                        .sql_results
                        .as_ref()
                        .map(|r| r.rows_text())
                        .unwrap_or_default();
                    let document_context = document_context_text(&state);

                    let synthesis = synthesize::synthesize(
                        question,
                        &query_results,
                        &document_context,
                        format_hint,
                    );
                    state.final_answer = synthesis.answer;
                    state.explanation = synthesis.explanation;
                    state.citations = synthesis.citations;
                }
                Stage::Done => unreachable!("loop exits before Done is dispatched"),
            }

            stage = stage.next(state.route, !state.sql_query.is_empty());
        }

        state.into()
    }
}

/// Flatten retrieved chunks into the context string handed to synthesis.
fn document_context_text(state: &AgentState) -> String {
    state
        .document_results
        .iter()
        .map(|scored| format!("[{}] {}", scored.chunk.chunk_id, scored.chunk.content))
        .collect::<Vec<_>>()
        .join("\n")
}
