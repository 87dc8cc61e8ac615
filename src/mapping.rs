//! Arabic-letter → Latin-digraph mapping tables.
//!
//! A table tells the Latin encoder how a transliteration scheme spells each
//! Arabic consonant (`Khah → "KH"`, `Sheen → "SY"` in Indonesian). Tables are
//! learned offline and shipped as `CODEPOINT|DIGRAPH` lines; a built-in
//! Indonesian table backs the manual encoder when no learned table is given.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::alphabet::*;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed mapping table {path} line {line}: expected CODEPOINT|DIGRAPH")]
    Malformed { path: PathBuf, line: usize },
}

/// Immutable per-letter digraph table. Missing letters are permitted: the
/// encoder stages they would feed simply contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct LetterMapping {
    table: HashMap<char, String>,
}

impl LetterMapping {
    pub fn new(table: HashMap<char, String>) -> Self {
        LetterMapping { table }
    }

    /// Parse `CODEPOINT|DIGRAPH` lines. Blank lines are skipped; digraphs are
    /// upper-cased so tables hand-edited in lowercase still match.
    pub fn from_reader(reader: impl BufRead, origin: &Path) -> Result<Self, MappingError> {
        let mut table = HashMap::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (letter, digraph) = line.split_once('|').ok_or(MappingError::Malformed {
                path: origin.to_path_buf(),
                line: i + 1,
            })?;
            let Some(letter) = letter.chars().next() else {
                return Err(MappingError::Malformed {
                    path: origin.to_path_buf(),
                    line: i + 1,
                });
            };
            table.insert(letter, digraph.trim().to_uppercase());
        }
        log::debug!("loaded mapping table {:?}: {} letters", origin, table.len());
        Ok(LetterMapping { table })
    }

    pub fn from_path(path: &Path) -> Result<Self, MappingError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Digraph for `letter`, if the table has one and it is non-empty.
    pub fn get(&self, letter: char) -> Option<&str> {
        self.table.get(&letter).map(String::as_str).filter(|d| !d.is_empty())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every digraph of two or more characters (the repeat-collapse stage
    /// needs them explicitly; single letters are collapsed generically).
    pub fn digraphs(&self) -> Vec<&str> {
        self.table
            .values()
            .map(String::as_str)
            .filter(|d| d.len() >= 2)
            .collect()
    }

    /// The hand-written Indonesian transliteration table, used as the manual
    /// fallback when no learned table is available.
    pub fn indonesian() -> Self {
        let pairs: [(char, &str); 28] = [
            (HAMZA, "'"),
            (BEH, "B"),
            (TEH, "T"),
            (THEH, "TS"),
            (JEEM, "J"),
            (HAH, "H"),
            (KHAH, "KH"),
            (DAL, "D"),
            (THAL, "DZ"),
            (REH, "R"),
            (ZAIN, "Z"),
            (SEEN, "S"),
            (SHEEN, "SY"),
            (SAD, "SH"),
            (DAD, "DH"),
            (TAH, "TH"),
            (ZAH, "ZH"),
            (AIN, "'"),
            (GHAIN, "GH"),
            (FEH, "F"),
            (QAF, "Q"),
            (KAF, "K"),
            (LAM, "L"),
            (MEEM, "M"),
            (NOON, "N"),
            (HEH, "H"),
            (WAW, "W"),
            (YEH, "Y"),
        ];
        LetterMapping {
            table: pairs.iter().map(|&(c, d)| (c, d.to_string())).collect(),
        }
    }
}
