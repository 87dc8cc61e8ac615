//! On-disk index store.
//!
//! Two text files per index: a term dictionary (`TOKEN|OFFSET` per line,
//! tokens ascending) and a posting list (one `DOCID:POS,POS;DOCID:POS...`
//! line per term, same order). The dictionary is scanned once into memory;
//! posting blocks are then read by byte range on demand, so the resident
//! footprint stays at one `(token → span)` map per index.
//!
//! A span's length is `next_offset − offset − 1` (the LF stays on disk); the
//! last term reads to end of file and the decoder strips the trailing LF.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

/// Standard file names inside an index directory.
pub const TERMLIST_VOWEL: &str = "termlist_vowel.txt";
pub const POSTLIST_VOWEL: &str = "postlist_vowel.txt";
pub const TERMLIST: &str = "termlist.txt";
pub const POSTLIST: &str = "postlist.txt";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed term dictionary {path} line {line}: {reason}")]
    MalformedTermlist {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("malformed posting block for token {token:?}: {reason}")]
    MalformedPosting { token: String, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Byte range of one term's posting block.
#[derive(Debug, Clone, Copy)]
struct TermSpan {
    offset: u64,
    len: u64,
}

/// Decoded posting: one document and the positions the term occurs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: u32,
    pub positions: Vec<u32>,
}

/// One `(term dictionary, posting file)` pair, loaded read-only.
#[derive(Debug)]
pub struct IndexPair {
    terms: HashMap<String, TermSpan>,
    // postings reads seek + read under the lock; the file is never written
    postings: Mutex<File>,
}

impl IndexPair {
    pub fn open(termlist: &Path, postlist: &Path) -> StoreResult<Self> {
        let postings = File::open(postlist)?;
        let postlist_size = postings.metadata()?.len();
        let terms = parse_termlist(termlist, postlist_size)?;
        log::info!(
            "opened index pair {:?}: {} terms, {} posting bytes",
            termlist,
            terms.len(),
            postlist_size
        );
        Ok(IndexPair {
            terms,
            postings: Mutex::new(postings),
        })
    }

    /// Decoded postings for `token`; a miss is an empty list, not an error.
    pub fn postings(&self, token: &str) -> StoreResult<Vec<Posting>> {
        let Some(&span) = self.terms.get(token) else {
            return Ok(Vec::new());
        };
        let mut buf = vec![0u8; span.len as usize];
        {
            let mut file = self.postings.lock();
            file.seek(SeekFrom::Start(span.offset))?;
            file.read_exact(&mut buf)?;
        }
        decode_postings(token, &buf)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains_key(token)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// Both index pairs: vowel-retaining and vowel-stripped, selected per query.
pub struct IndexStore {
    vowel: IndexPair,
    plain: IndexPair,
}

impl IndexStore {
    pub fn new(vowel: IndexPair, plain: IndexPair) -> Self {
        IndexStore { vowel, plain }
    }

    /// Open both pairs from one directory using the standard file names.
    pub fn open_dir(dir: &Path) -> StoreResult<Self> {
        Ok(IndexStore {
            vowel: IndexPair::open(&dir.join(TERMLIST_VOWEL), &dir.join(POSTLIST_VOWEL))?,
            plain: IndexPair::open(&dir.join(TERMLIST), &dir.join(POSTLIST))?,
        })
    }

    pub fn pair(&self, vowel: bool) -> &IndexPair {
        if vowel {
            &self.vowel
        } else {
            &self.plain
        }
    }
}

fn parse_termlist(path: &Path, postlist_size: u64) -> StoreResult<HashMap<String, TermSpan>> {
    let reader = BufReader::new(File::open(path)?);
    let mut terms = HashMap::new();
    let mut prev: Option<(String, u64)> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let malformed = |reason: &str| StoreError::MalformedTermlist {
            path: path.to_path_buf(),
            line: i + 1,
            reason: reason.to_string(),
        };
        let (token, offset) = line.split_once('|').ok_or_else(|| malformed("missing '|'"))?;
        let offset: u64 = offset
            .parse()
            .map_err(|_| malformed("offset is not an integer"))?;

        if let Some((prev_token, prev_offset)) = prev.take() {
            if offset <= prev_offset {
                return Err(malformed("offsets are not strictly increasing"));
            }
            terms.insert(
                prev_token,
                TermSpan {
                    offset: prev_offset,
                    len: offset - prev_offset - 1,
                },
            );
        }
        prev = Some((token.to_string(), offset));
    }

    if let Some((token, offset)) = prev {
        if offset > postlist_size {
            return Err(StoreError::MalformedTermlist {
                path: path.to_path_buf(),
                line: 0,
                reason: "last offset is past the end of the posting file".to_string(),
            });
        }
        terms.insert(
            token,
            TermSpan {
                offset,
                len: postlist_size - offset,
            },
        );
    }

    Ok(terms)
}

fn decode_postings(token: &str, buf: &[u8]) -> StoreResult<Vec<Posting>> {
    let malformed = |reason: String| StoreError::MalformedPosting {
        token: token.to_string(),
        reason,
    };
    let text = std::str::from_utf8(buf).map_err(|e| malformed(e.to_string()))?;
    let text = text.trim_end_matches(['\n', '\r']);

    let mut postings = Vec::new();
    for record in text.split(';') {
        let (doc_id, positions) = record
            .split_once(':')
            .ok_or_else(|| malformed(format!("record {:?} is missing ':'", record)))?;
        let doc_id: u32 = doc_id
            .parse()
            .map_err(|_| malformed(format!("doc id {:?} is not an integer", doc_id)))?;
        let positions = positions
            .split(',')
            .map(|p| {
                p.parse()
                    .map_err(|_| malformed(format!("position {:?} is not an integer", p)))
            })
            .collect::<StoreResult<Vec<u32>>>()?;
        postings.push(Posting { doc_id, positions });
    }
    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(content.as_bytes()).expect("write");
        f
    }

    // three terms; offsets track the postlist byte layout below
    // line lengths incl. LF: 10, 8, 5
    const TERMLIST_FIXTURE: &str = "ABC|0\nBCD|10\nCDE|18\n";
    const POSTLIST_FIXTURE: &str = "1:1,4;3:2\n2:5,6,7\n9:11\n";

    fn open_fixture() -> (IndexPair, tempfile::NamedTempFile, tempfile::NamedTempFile) {
        let termlist = write_temp(TERMLIST_FIXTURE);
        let postlist = write_temp(POSTLIST_FIXTURE);
        let pair = IndexPair::open(termlist.path(), postlist.path()).expect("opens");
        (pair, termlist, postlist)
    }

    #[test]
    fn test_open_and_lookup() {
        let (pair, _t, _p) = open_fixture();
        assert_eq!(pair.term_count(), 3);
        assert!(pair.contains("ABC"));
        assert!(!pair.contains("ZZZ"));
    }

    #[test]
    fn test_postings_decode() {
        let (pair, _t, _p) = open_fixture();
        let posts = pair.postings("ABC").expect("reads");
        assert_eq!(
            posts,
            vec![
                Posting { doc_id: 1, positions: vec![1, 4] },
                Posting { doc_id: 3, positions: vec![2] },
            ]
        );
        assert_eq!(
            pair.postings("BCD").expect("reads"),
            vec![Posting { doc_id: 2, positions: vec![5, 6, 7] }]
        );
    }

    #[test]
    fn test_postings_last_term_reads_to_eof() {
        let (pair, _t, _p) = open_fixture();
        assert_eq!(
            pair.postings("CDE").expect("reads"),
            vec![Posting { doc_id: 9, positions: vec![11] }]
        );
    }

    #[test]
    fn test_postings_miss_is_empty() {
        let (pair, _t, _p) = open_fixture();
        assert_eq!(pair.postings("ZZZ").expect("reads"), Vec::new());
    }

    #[test]
    fn test_non_monotonic_offsets_rejected() {
        let termlist = write_temp("ABC|0\nBCD|10\nCDE|10\n");
        let postlist = write_temp(POSTLIST_FIXTURE);
        let err = IndexPair::open(termlist.path(), postlist.path()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTermlist { line: 3, .. }));
    }

    #[test]
    fn test_non_integer_offset_rejected() {
        let termlist = write_temp("ABC|zero\n");
        let postlist = write_temp(POSTLIST_FIXTURE);
        let err = IndexPair::open(termlist.path(), postlist.path()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTermlist { line: 1, .. }));
    }

    #[test]
    fn test_offset_past_eof_rejected() {
        let termlist = write_temp("ABC|4096\n");
        let postlist = write_temp(POSTLIST_FIXTURE);
        assert!(IndexPair::open(termlist.path(), postlist.path()).is_err());
    }

    #[test]
    fn test_malformed_posting_surfaces() {
        let termlist = write_temp("ABC|0\n");
        let postlist = write_temp("1:one,two\n");
        let pair = IndexPair::open(termlist.path(), postlist.path()).expect("opens");
        let err = pair.postings("ABC").unwrap_err();
        assert!(matches!(err, StoreError::MalformedPosting { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            IndexPair::open(Path::new("/nonexistent/termlist"), Path::new("/nonexistent/post"))
                .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
