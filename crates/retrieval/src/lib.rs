//! Lexical document retrieval over a chunked text corpus.
//!
//! The [`Retriever`] loads a directory of plain-text/markdown documents,
//! splits them into addressable chunks, and answers keyword searches with
//! scored chunks. There is no embedding or learned ranking here: scoring is
//! substring containment of query tokens, chosen for predictability and
//! citation traceability.

pub mod chunker;
pub mod types;

pub use types::{DocumentChunk, LoadStats, ScoredChunk};

use copilot_core::config::DEFAULT_TOP_K;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Query tokens of this length or shorter never contribute to a match.
const MAX_IGNORED_TOKEN_LEN: usize = 2;

/// Lexical corpus index over a directory of documents.
///
/// Chunks are owned by the index and live for its lifetime. `load` appends:
/// calling it twice without `reset` duplicates every chunk. That append
/// behavior is a deliberate, tested contract — callers that want a fresh
/// index call [`Retriever::reset`] first.
#[derive(Debug)]
pub struct Retriever {
    docs_dir: PathBuf,
    chunks: Vec<DocumentChunk>,
}

impl Retriever {
    /// Create an index over `docs_dir`. No documents are read until
    /// [`Retriever::load`] runs (explicitly or implicitly via search).
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            chunks: Vec::new(),
        }
    }

    /// Number of chunks currently loaded.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The loaded chunks, in load order.
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    /// Clear all loaded chunks.
    pub fn reset(&mut self) {
        self.chunks.clear();
    }

    /// Load and chunk every eligible document under the docs directory.
    ///
    /// A missing directory is not fatal: it logs a warning and leaves the
    /// index with zero documents, so the rest of the pipeline can proceed.
    /// Unreadable files are likewise skipped with a warning. Chunks are
    /// appended to whatever is already loaded.
    pub fn load(&mut self) -> LoadStats {
        if !self.docs_dir.exists() {
            tracing::warn!(
                "Corpus unavailable: docs directory not found: {:?}",
                self.docs_dir
            );
            return LoadStats::default();
        }

        let mut stats = LoadStats::default();

        for entry in WalkDir::new(&self.docs_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_document(path) {
                continue;
            }

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping unreadable document {:?}: {}", path, e);
                    continue;
                }
            };

            let source = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            for (ordinal, chunk) in chunker::split_into_chunks(&content).iter().enumerate() {
                self.chunks.push(DocumentChunk {
                    source: source.clone(),
                    chunk_id: format!("{}::chunk{}", source, ordinal),
                    content: chunk.clone(),
                });
                stats.chunks_count += 1;
            }

            stats.files_count += 1;
        }

        tracing::info!(
            "Loaded {} chunks from {} files in {:?}",
            stats.chunks_count,
            stats.files_count,
            self.docs_dir
        );

        stats
    }

    /// Search the corpus for chunks matching `query`.
    ///
    /// If the index is empty this triggers a single implicit `load`. The
    /// query is whitespace-tokenized and lowercased; a chunk scores one
    /// point per distinct token (length > 2) contained in it. Zero-score
    /// chunks are excluded; results are sorted by descending score with
    /// ties keeping load order, then truncated to `top_k`.
    pub fn search(&mut self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        if self.chunks.is_empty() {
            self.load();
        }

        let query_lower = query.to_lowercase();
        let mut tokens: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|token| token.len() > MAX_IGNORED_TOKEN_LEN)
            .collect();
        tokens.sort_unstable();
        tokens.dedup();

        let mut results: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let content_lower = chunk.content.to_lowercase();
                let score = tokens
                    .iter()
                    .filter(|token| content_lower.contains(**token))
                    .count() as u32;

                (score > 0).then(|| ScoredChunk {
                    chunk: chunk.clone(),
                    score,
                })
            })
            .collect();

        // Vec::sort_by is stable, so ties retain original load order.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(top_k);

        tracing::debug!("Search '{}' matched {} chunks", query, results.len());

        results
    }

    /// Search with the default result count.
    pub fn search_default(&mut self, query: &str) -> Vec<ScoredChunk> {
        self.search(query, DEFAULT_TOP_K)
    }
}

/// Eligible corpus files: markdown and plain text directly in the docs dir.
fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md") | Some("txt")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Retriever) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let retriever = Retriever::new(dir.path());
        (dir, retriever)
    }

    #[test]
    fn test_load_assigns_chunk_ids_per_file() {
        let (_dir, mut retriever) = corpus_with(&[
            ("product_policy.md", "Returns.\n\nUnopened beverages: 14 days."),
            ("kpi_definitions.txt", "AOV definition."),
        ]);

        let stats = retriever.load();
        assert_eq!(stats.files_count, 2);
        assert_eq!(stats.chunks_count, 3);

        let ids: Vec<&str> = retriever
            .chunks()
            .iter()
            .map(|c| c.chunk_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "kpi_definitions::chunk0",
                "product_policy::chunk0",
                "product_policy::chunk1",
            ]
        );
    }

    #[test]
    fn test_load_missing_dir_degrades_to_empty() {
        let mut retriever = Retriever::new("/nonexistent/docs/dir");
        let stats = retriever.load();
        assert_eq!(stats.files_count, 0);
        assert!(retriever.is_empty());
    }

    #[test]
    fn test_load_skips_non_documents() {
        let (_dir, mut retriever) = corpus_with(&[
            ("notes.md", "markdown notes"),
            ("data.csv", "a,b,c"),
        ]);
        retriever.load();
        assert_eq!(retriever.len(), 1);
    }

    #[test]
    fn test_double_load_doubles_chunks() {
        let (_dir, mut retriever) =
            corpus_with(&[("doc.txt", "alpha paragraph\n\nbeta paragraph")]);

        retriever.load();
        let first = retriever.len();
        retriever.load();
        assert_eq!(retriever.len(), first * 2);

        retriever.reset();
        assert!(retriever.is_empty());
        retriever.load();
        assert_eq!(retriever.len(), first);
    }

    #[test]
    fn test_search_scores_and_orders() {
        let (_dir, mut retriever) = corpus_with(&[(
            "doc.txt",
            "beverages return policy\n\nbeverages only\n\nunrelated text",
        )]);

        let results = retriever.search("beverages return policy", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, 3);
        assert_eq!(results[0].chunk.chunk_id, "doc::chunk0");
        assert_eq!(results[1].score, 1);
    }

    #[test]
    fn test_search_respects_top_k() {
        let (_dir, mut retriever) = corpus_with(&[(
            "doc.txt",
            "beverages one\n\nbeverages two\n\nbeverages three\n\nbeverages four",
        )]);

        let results = retriever.search("beverages", 3);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score >= 1));
    }

    #[test]
    fn test_search_ties_keep_load_order() {
        let (_dir, mut retriever) = corpus_with(&[(
            "doc.txt",
            "beverages first\n\nbeverages second\n\nbeverages third",
        )]);

        let results = retriever.search("beverages", 10);
        let ids: Vec<&str> = results.iter().map(|r| r.chunk.chunk_id.as_str()).collect();
        assert_eq!(ids, vec!["doc::chunk0", "doc::chunk1", "doc::chunk2"]);
    }

    #[test]
    fn test_short_tokens_never_match() {
        let (_dir, mut retriever) =
            corpus_with(&[("doc.txt", "to be or not to be is the question")]);

        let results = retriever.search("to be or no it", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_duplicate_query_tokens_count_once() {
        let (_dir, mut retriever) = corpus_with(&[("doc.txt", "beverages policy")]);

        let results = retriever.search("beverages beverages beverages", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 1);
    }

    #[test]
    fn test_search_triggers_implicit_load() {
        let (_dir, mut retriever) = corpus_with(&[("doc.txt", "implicit loading works")]);

        assert!(retriever.is_empty());
        let results = retriever.search("implicit", 3);
        assert_eq!(results.len(), 1);
        assert!(!retriever.is_empty());
    }

    #[test]
    fn test_search_case_insensitive() {
        let (_dir, mut retriever) = corpus_with(&[("doc.txt", "BEVERAGES Policy")]);

        let results = retriever.search("beverages POLICY", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 2);
    }
}
