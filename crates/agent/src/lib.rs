//! Hybrid question-answering pipeline.
//!
//! Decides per question whether to consult the document corpus, the
//! relational store, or both, then merges what it finds into a single
//! answer with provenance:
//! - [`router`] — rule-based route classification
//! - [`sqlgen`] — pattern-to-template relational query synthesis
//! - [`synthesize`] — pattern-to-answer synthesis with citations
//! - [`agent`] — the per-question orchestrator state machine

pub mod agent;
pub mod router;
pub mod sqlgen;
pub mod state;
pub mod synthesize;

// Re-export commonly used types
pub use agent::{Agent, Stage, CONFIDENCE_EXECUTED, CONFIDENCE_FAILED};
pub use router::{classify, Route};
pub use sqlgen::{generate, GeneratedQuery};
pub use state::{AgentOutcome, AgentState};
pub use synthesize::{synthesize, Synthesis};
