//! Document chunking on paragraph and heading boundaries.

use regex::Regex;
use std::sync::OnceLock;

/// Boundary pattern: blank lines or `#`-heading markers.
const SPLIT_PATTERN: &str = r"\n\s*\n|#+ ";

fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SPLIT_PATTERN).expect("valid boundary pattern"))
}

/// Split document text into chunks.
///
/// Splits on blank-line boundaries and on heading markers, trims each
/// piece, and discards pieces that are empty after trimming. The returned
/// order is document order, which downstream search relies on for stable
/// tie-breaking.
pub fn split_into_chunks(text: &str) -> Vec<String> {
    boundary_regex()
        .split(text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let text = "first paragraph\n\nsecond paragraph\n\n\nthird";
        let chunks = split_into_chunks(text);
        assert_eq!(chunks, vec!["first paragraph", "second paragraph", "third"]);
    }

    #[test]
    fn test_split_on_headings() {
        let text = "# Title\nintro text\n## Section\nbody text";
        let chunks = split_into_chunks(text);
        assert_eq!(chunks, vec!["Title\nintro text", "Section\nbody text"]);
    }

    #[test]
    fn test_discards_empty_chunks() {
        let text = "\n\n  \n\ncontent\n\n   \n\n";
        let chunks = split_into_chunks(text);
        assert_eq!(chunks, vec!["content"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_into_chunks("").is_empty());
    }

    #[test]
    fn test_whitespace_padded_blank_line() {
        let text = "one\n   \ntwo";
        let chunks = split_into_chunks(text);
        assert_eq!(chunks, vec!["one", "two"]);
    }
}
