//! Search engine: query phoneticization, trigram matching, LIS ranking and
//! relative-score filtering.
//!
//! A search encodes the query with the configured Latin encoder, looks up
//! each distinct trigram's postings in the chosen index pair, accumulates
//! matched positions per document, then scores by longest-increasing-
//! subsequence length weighted by contiguity. Documents scoring at or below
//! `filter_threshold × trigram_count` are cut.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::Quran;
use crate::mapping::LetterMapping;
use crate::models::{DocumentHit, SearchResult};
use crate::phonetic::{LatinEncoder, PhoneticEncoder};
use crate::sequence;
use crate::store::{IndexStore, StoreError};
use crate::trigram;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("index error: {0}")]
    Store(#[from] StoreError),
}

/// Which Latin encoder the engine phoneticizes queries with.
pub enum QueryEncoder {
    /// Mapping-driven encoder over a learned table.
    Automatic(LetterMapping),
    /// The built-in hand-written Indonesian table.
    Manual,
}

impl QueryEncoder {
    fn build(self) -> LatinEncoder {
        match self {
            QueryEncoder::Automatic(mapping) => LatinEncoder::new(&mapping),
            QueryEncoder::Manual => LatinEncoder::manual(),
        }
    }
}

/// Tunable search behavior. Mutated only at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Positional LIS scoring when true, raw matched-token count when false.
    pub score_order: bool,
    /// Cutoff ratio of the query trigram count, within `[0, 1]`.
    pub filter_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            score_order: true,
            filter_threshold: 0.75,
        }
    }
}

/// Per-document accumulator, alive for one search.
struct DocAccum {
    matched_tokens: u32,
    positions: Vec<u32>,
}

/// The read-only search engine. Safe to share across request threads.
pub struct SearchEngine {
    store: IndexStore,
    encoder: Box<dyn PhoneticEncoder>,
    quran: Option<Quran>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(store: IndexStore, encoder: QueryEncoder) -> Self {
        SearchEngine {
            store,
            encoder: Box::new(encoder.build()),
            quran: None,
            config: SearchConfig::default(),
        }
    }

    /// Engine with a custom phonetic encoder (tests use a passthrough).
    pub fn with_encoder(store: IndexStore, encoder: Box<dyn PhoneticEncoder>) -> Self {
        SearchEngine {
            store,
            encoder,
            quran: None,
            config: SearchConfig::default(),
        }
    }

    /// Attach a verse corpus; hits will carry their verse records.
    pub fn with_corpus(mut self, quran: Quran) -> Self {
        self.quran = Some(quran);
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = SearchConfig {
            score_order: config.score_order,
            filter_threshold: config.filter_threshold.clamp(0.0, 1.0),
        };
        self
    }

    pub fn set_score_order(&mut self, score_order: bool) {
        self.config.score_order = score_order;
    }

    pub fn set_filter_threshold(&mut self, threshold: f64) {
        self.config.filter_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Run a search against the vowel or vowel-stripped index.
    pub fn search(&self, query: &[u8], vowel: bool) -> Result<SearchResult, SearchError> {
        #[cfg(feature = "perf-log")]
        let t0 = std::time::Instant::now();

        let phonetic = self.encoder.encode(query, vowel);
        let tokens = trigram::extract(&phonetic);
        let n = tokens.len();
        log::debug!(
            "query {:?} -> code {:?} ({} trigrams, vowel={})",
            String::from_utf8_lossy(query),
            phonetic,
            n,
            vowel
        );

        if n == 0 {
            return Ok(self.empty_result(query, phonetic));
        }

        // match trigrams against the chosen pair
        let pair = self.store.pair(vowel);
        let mut accum: HashMap<u32, DocAccum> = HashMap::new();
        for token in &tokens {
            let query_freq = token.positions.len();
            for posting in pair.postings(&token.token)? {
                match accum.entry(posting.doc_id) {
                    Entry::Occupied(mut entry) => {
                        let doc = entry.get_mut();
                        doc.matched_tokens += query_freq.min(posting.positions.len()) as u32;
                        doc.positions.extend_from_slice(&posting.positions);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(DocAccum {
                            matched_tokens: 1,
                            positions: posting.positions,
                        });
                    }
                }
            }
        }

        #[cfg(feature = "perf-log")]
        let t1 = std::time::Instant::now();

        // rank
        let mut hits: Vec<DocumentHit> = accum
            .into_iter()
            .map(|(doc_id, doc)| {
                let (score, lis_positions) = if self.config.score_order {
                    let lis = sequence::longest_increasing_subsequence(&doc.positions);
                    (sequence::positional_score(&lis), lis)
                } else {
                    (f64::from(doc.matched_tokens), Vec::new())
                };
                DocumentHit {
                    doc_id,
                    score,
                    matched_tokens_count: doc.matched_tokens,
                    lis_positions,
                    verse: None,
                }
            })
            .collect();
        hits.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });

        // cut everything at or below the relative threshold
        let min_score = self.config.filter_threshold * n as f64;
        let keep = hits.partition_point(|hit| hit.score > min_score);
        hits.truncate(keep);

        if let Some(quran) = &self.quran {
            for hit in &mut hits {
                hit.verse = quran.verse(hit.doc_id).cloned();
            }
        }

        #[cfg(feature = "perf-log")]
        eprintln!(
            "[perf] match={:.1}ms rank={:.1}ms hits={}",
            (t1 - t0).as_secs_f64() * 1000.0,
            t1.elapsed().as_secs_f64() * 1000.0,
            hits.len(),
        );

        Ok(SearchResult {
            query: String::from_utf8_lossy(query).into_owned(),
            phonetic_code: phonetic,
            trigram_count: n,
            found_docs: hits.len(),
            filter_threshold: self.config.filter_threshold,
            min_score,
            docs: hits,
        })
    }

    fn empty_result(&self, query: &[u8], phonetic: String) -> SearchResult {
        SearchResult {
            query: String::from_utf8_lossy(query).into_owned(),
            phonetic_code: phonetic,
            trigram_count: 0,
            found_docs: 0,
            filter_threshold: self.config.filter_threshold,
            min_score: 0.0,
            docs: Vec::new(),
        }
    }
}
