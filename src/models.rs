//! Core data records shared across the crate.
//!
//! Everything here is plain data with serde derives so hosting layers (CLI,
//! HTTP) can render results without reaching into engine internals.

use serde::{Deserialize, Serialize};

/// One Qur'an verse. Immutable after corpus load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// 1-based document id, `1..=6236` for the full corpus.
    pub doc_id: u32,
    pub chapter_no: u32,
    pub chapter_name: String,
    pub verse_no: u32,
    pub arabic: String,
    pub translation: String,
}

/// One ranked document in a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHit {
    pub doc_id: u32,
    pub score: f64,
    pub matched_tokens_count: u32,
    /// The longest in-order chain of matched positions, when positional
    /// scoring is on. Presenters use it for highlighting.
    pub lis_positions: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<Verse>,
}

/// A completed search: the query as seen, how it was phoneticized, and the
/// ranked, filtered hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub phonetic_code: String,
    /// Distinct trigram tokens in the query.
    pub trigram_count: usize,
    pub found_docs: usize,
    pub filter_threshold: f64,
    pub min_score: f64,
    pub docs: Vec<DocumentHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_serializes() {
        let result = SearchResult {
            query: "bismillah".into(),
            phonetic_code: "BISMILAH".into(),
            trigram_count: 6,
            found_docs: 1,
            filter_threshold: 0.75,
            min_score: 4.5,
            docs: vec![DocumentHit {
                doc_id: 1,
                score: 6.0,
                matched_tokens_count: 6,
                lis_positions: vec![1, 2, 3, 4, 5, 6],
                verse: None,
            }],
        };
        let json = serde_json::to_string(&result).expect("serializes");
        assert!(json.contains("\"phonetic_code\":\"BISMILAH\""));
        assert!(!json.contains("\"verse\""), "absent verse is omitted");
        let back: SearchResult = serde_json::from_str(&json).expect("round trips");
        assert_eq!(back, result);
    }
}
