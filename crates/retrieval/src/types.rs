//! Corpus index type definitions.

use serde::{Deserialize, Serialize};

/// A contiguous, non-empty unit of document text; the smallest retrievable
/// span. Immutable once created and owned by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Source document name (file stem, e.g. "product_policy")
    pub source: String,

    /// Stable identifier: `<source>::chunk<n>`, n 0-based per source file
    pub chunk_id: String,

    /// Trimmed chunk text
    pub content: String,
}

/// A chunk paired with its lexical match score. Created per search call
/// and discarded by the caller; score is always ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: DocumentChunk,

    /// Count of distinct query tokens (length > 2) found in the chunk
    pub score: u32,
}

/// Statistics from a corpus load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadStats {
    /// Number of files read
    pub files_count: u32,

    /// Number of chunks appended to the index
    pub chunks_count: u32,
}
