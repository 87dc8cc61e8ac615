//! Offline index builder.
//!
//! Accumulates an inverted trigram map in memory, then serializes it to the
//! term-dictionary/posting-list format the [`store`](crate::store) loads.
//! Also hosts corpus phoneticization: verses fan out across a rayon pool,
//! one Arabic encoding each, before indexing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::models::Verse;
use crate::phonetic::{ArabicEncoder, LettersMode, PhoneticEncoder};
use crate::store::Posting;
use crate::trigram;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus file {path} line {line}: expected DOCID|PHONETIC_CODE")]
    MalformedCorpus { path: PathBuf, line: usize },
}

pub type BuildResult<T> = Result<T, BuildError>;

/// In-memory inverted map, written out once all documents are added.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    // BTreeMap keeps terms in the lexicographic order the dictionary needs
    inverted: BTreeMap<String, Vec<Posting>>,
    doc_count: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one document's phonetic code.
    pub fn add_document(&mut self, doc_id: u32, code: &str) {
        for token in trigram::extract(code) {
            self.inverted
                .entry(token.token)
                .or_default()
                .push(Posting {
                    doc_id,
                    positions: token.positions,
                });
        }
        self.doc_count += 1;
    }

    /// Read a phoneticized corpus (`DOCID|PHONETIC_CODE` lines) and index
    /// every document. Returns the number of documents added.
    pub fn add_corpus(&mut self, reader: impl BufRead, origin: &Path) -> BuildResult<usize> {
        let mut added = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let malformed = || BuildError::MalformedCorpus {
                path: origin.to_path_buf(),
                line: i + 1,
            };
            let (doc_id, code) = line.split_once('|').ok_or_else(malformed)?;
            let doc_id: u32 = doc_id.parse().map_err(|_| malformed())?;
            self.add_document(doc_id, code);
            added += 1;
        }
        Ok(added)
    }

    pub fn term_count(&self) -> usize {
        self.inverted.len()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Write the term dictionary and posting list. The emitted files satisfy
    /// the store's load contract: terms ascending, offsets strictly
    /// increasing, doc ids ascending within each posting line.
    pub fn write_to(&self, termlist: &Path, postlist: &Path) -> BuildResult<()> {
        let mut term_out = BufWriter::new(File::create(termlist)?);
        let mut post_out = BufWriter::new(File::create(postlist)?);

        let mut offset: u64 = 0;
        for (token, postings) in &self.inverted {
            let mut postings: Vec<&Posting> = postings.iter().collect();
            postings.sort_by_key(|p| p.doc_id);

            let mut line = String::new();
            for (i, posting) in postings.iter().enumerate() {
                if i > 0 {
                    line.push(';');
                }
                line.push_str(&posting.doc_id.to_string());
                line.push(':');
                for (j, pos) in posting.positions.iter().enumerate() {
                    if j > 0 {
                        line.push(',');
                    }
                    line.push_str(&pos.to_string());
                }
            }

            writeln!(term_out, "{}|{}", token, offset)?;
            writeln!(post_out, "{}", line)?;
            offset += line.len() as u64 + 1;
        }

        term_out.flush()?;
        post_out.flush()?;
        log::info!(
            "wrote index {:?}: {} terms over {} documents",
            termlist,
            self.inverted.len(),
            self.doc_count
        );
        Ok(())
    }
}

/// Phoneticize a verse corpus, one `(doc_id, code)` per verse, in parallel.
pub fn phoneticize(
    verses: &[Verse],
    letters_mode: LettersMode,
    keep_vowels: bool,
) -> Vec<(u32, String)> {
    let encoder = ArabicEncoder::new(letters_mode);
    verses
        .par_iter()
        .map(|v| (v.doc_id, encoder.encode(v.arabic.as_bytes(), keep_vowels)))
        .collect()
}

/// Write a phoneticized corpus as `DOCID|PHONETIC_CODE` lines.
pub fn write_corpus(entries: &[(u32, String)], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (doc_id, code) in entries {
        writeln!(out, "{}|{}", doc_id, code)?;
    }
    out.flush()
}
