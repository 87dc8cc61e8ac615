//! Verse corpus loading.
//!
//! The verse source file carries `CHAPTER_NO|CHAPTER_NAME|VERSE_NO|ARABIC`
//! lines, the translation file `CHAPTER_NO|VERSE_NO|TRANSLATION` lines in the
//! same order. Both are read once into immutable [`Verse`] records; document
//! ids are the 1-based line numbers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Verse;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus file {path} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// The loaded verse corpus, addressable by document id.
#[derive(Debug, Clone, Default)]
pub struct Quran {
    verses: Vec<Verse>,
}

impl Quran {
    /// Load verses, and translations when a translation file is given.
    pub fn load(verses_path: &Path, translation_path: Option<&Path>) -> Result<Self, CorpusError> {
        let reader = BufReader::new(File::open(verses_path)?);
        let mut verses = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let mut fields = line.splitn(4, '|');
            let (Some(chapter_no), Some(chapter_name), Some(verse_no), Some(arabic)) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed(verses_path, i, "expected 4 |-separated fields"));
            };
            let chapter_no = chapter_no
                .parse()
                .map_err(|_| malformed(verses_path, i, "chapter number is not an integer"))?;
            let verse_no = verse_no
                .parse()
                .map_err(|_| malformed(verses_path, i, "verse number is not an integer"))?;
            verses.push(Verse {
                doc_id: verses.len() as u32 + 1,
                chapter_no,
                chapter_name: chapter_name.to_string(),
                verse_no,
                arabic: arabic.to_string(),
                translation: String::new(),
            });
        }

        if let Some(path) = translation_path {
            let reader = BufReader::new(File::open(path)?);
            for (i, line) in reader.lines().enumerate() {
                let line = line?;
                if line.is_empty() {
                    continue;
                }
                let Some(verse) = verses.get_mut(i) else {
                    log::warn!("translation {:?} has more lines than the corpus", path);
                    break;
                };
                let mut fields = line.splitn(3, '|');
                let (Some(_), Some(_), Some(text)) = (fields.next(), fields.next(), fields.next())
                else {
                    return Err(malformed(path, i, "expected 3 |-separated fields"));
                };
                verse.translation = text.to_string();
            }
        }

        log::info!("loaded corpus {:?}: {} verses", verses_path, verses.len());
        Ok(Quran { verses })
    }

    pub fn from_verses(verses: Vec<Verse>) -> Self {
        Quran { verses }
    }

    /// Verse by 1-based document id.
    pub fn verse(&self, doc_id: u32) -> Option<&Verse> {
        if doc_id == 0 {
            return None;
        }
        self.verses.get(doc_id as usize - 1)
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

fn malformed(path: &Path, line_index: usize, reason: &str) -> CorpusError {
    CorpusError::Malformed {
        path: path.to_path_buf(),
        line: line_index + 1,
        reason: reason.to_string(),
    }
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

    #[test]
    fn test_load_verses_and_translations() {
        let verses = write_temp("1|Al-Fatihah|1|بِسْمِ ٱللَّهِ\n1|Al-Fatihah|2|ٱلْحَمْدُ لِلَّهِ\n");
        let trans = write_temp("1|1|In the name of Allah\n1|2|All praise is due to Allah\n");
        let quran = Quran::load(verses.path(), Some(trans.path())).expect("loads");

        assert_eq!(quran.len(), 2);
        let v1 = quran.verse(1).expect("verse 1");
        assert_eq!(v1.chapter_no, 1);
        assert_eq!(v1.chapter_name, "Al-Fatihah");
        assert_eq!(v1.verse_no, 1);
        assert_eq!(v1.translation, "In the name of Allah");
        assert_eq!(quran.verse(2).expect("verse 2").verse_no, 2);
        assert!(quran.verse(0).is_none());
        assert!(quran.verse(3).is_none());
    }

    #[test]
    fn test_load_without_translation() {
        let verses = write_temp("114|An-Nas|1|قُلْ أَعُوذُ\n");
        let quran = Quran::load(verses.path(), None).expect("loads");
        assert_eq!(quran.verse(1).expect("verse").translation, "");
    }

    #[test]
    fn test_load_rejects_short_lines() {
        let verses = write_temp("1|Al-Fatihah|1\n");
        let err = Quran::load(verses.path(), None).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_load_rejects_non_numeric_chapter() {
        let verses = write_temp("one|Al-Fatihah|1|text\n");
        assert!(Quran::load(verses.path(), None).is_err());
    }
}
