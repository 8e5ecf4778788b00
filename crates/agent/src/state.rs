//! Per-question pipeline state and the response envelope.

use crate::router::Route;
use copilot_retrieval::ScoredChunk;
use copilot_store::QueryResult;
use serde::{Deserialize, Serialize};

/// Ephemeral aggregate for one question's trip through the pipeline.
///
/// Created when processing starts, mutated stage by stage, and discarded
/// once the envelope is emitted. Never shared across questions.
#[derive(Debug)]
pub struct AgentState {
    pub question: String,
    pub route: Route,
    pub document_results: Vec<ScoredChunk>,
    pub sql_query: String,
    pub sql_results: Option<QueryResult>,
    pub final_answer: String,
    pub explanation: String,
    pub citations: Vec<String>,
    pub confidence: f64,
}

impl AgentState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            route: Route::Hybrid,
            document_results: Vec::new(),
            sql_query: String::new(),
            sql_results: None,
            final_answer: String::new(),
            explanation: String::new(),
            citations: Vec::new(),
            confidence: 0.0,
        }
    }
}

/// The response envelope emitted for every question, error or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub question: String,
    pub final_answer: String,
    pub sql: String,
    pub confidence: f64,
    pub explanation: String,
    pub citations: Vec<String>,
}

impl From<AgentState> for AgentOutcome {
    fn from(state: AgentState) -> Self {
        Self {
            question: state.question,
            final_answer: state.final_answer,
            sql: state.sql_query,
            confidence: state.confidence,
            explanation: state.explanation,
            citations: state.citations,
        }
    }
}
