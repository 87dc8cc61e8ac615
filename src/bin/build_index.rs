//! Offline index builder CLI.
//!
//! `phoneticize` turns a verse source file into a phoneticized corpus;
//! `build` turns a phoneticized corpus into a term dictionary and posting
//! list; `all` runs the whole pipeline for both vowel modes into one index
//! directory, which is the layout `IndexStore::open_dir` expects.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use qari::indexer::{self, IndexBuilder};
use qari::phonetic::LettersMode;
use qari::store;
use qari::Quran;

#[derive(Parser)]
#[command(name = "build-index", about = "Build the phonetic trigram index")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a verse source file into a DOCID|CODE corpus
    Phoneticize {
        /// Verse source file (CHAPTER_NO|CHAPTER_NAME|VERSE_NO|ARABIC_TEXT)
        #[arg(long)]
        quran: PathBuf,
        /// Output corpus file
        #[arg(long)]
        out: PathBuf,
        /// Keep the short vowels in the code
        #[arg(long)]
        vowel: bool,
        /// Treat the input as plain (non-Uthmani) orthography
        #[arg(long)]
        simple: bool,
    },
    /// Build a term dictionary and posting list from a phoneticized corpus
    Build {
        /// Phoneticized corpus file (DOCID|PHONETIC_CODE)
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        termlist: PathBuf,
        #[arg(long)]
        postlist: PathBuf,
    },
    /// Phoneticize and index both vowel modes into one directory
    All {
        /// Verse source file (CHAPTER_NO|CHAPTER_NAME|VERSE_NO|ARABIC_TEXT)
        #[arg(long)]
        quran: PathBuf,
        /// Index output directory
        #[arg(long)]
        out_dir: PathBuf,
        /// Treat the input as plain (non-Uthmani) orthography
        #[arg(long)]
        simple: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let started = Instant::now();

    match Cli::parse().command {
        Command::Phoneticize {
            quran,
            out,
            vowel,
            simple,
        } => {
            let corpus = Quran::load(&quran, None)
                .with_context(|| format!("loading verses from {:?}", quran))?;
            let coded = indexer::phoneticize(corpus.verses(), letters_mode(simple), vowel);
            indexer::write_corpus(&coded, &out)
                .with_context(|| format!("writing corpus to {:?}", out))?;
            println!("phoneticized {} verses -> {:?}", coded.len(), out);
        }
        Command::Build {
            corpus,
            termlist,
            postlist,
        } => {
            let mut builder = IndexBuilder::new();
            let reader = BufReader::new(
                File::open(&corpus).with_context(|| format!("opening corpus {:?}", corpus))?,
            );
            let docs = builder.add_corpus(reader, &corpus)?;
            builder.write_to(&termlist, &postlist)?;
            println!(
                "indexed {} documents: {} terms -> {:?}",
                docs,
                builder.term_count(),
                termlist
            );
        }
        Command::All {
            quran,
            out_dir,
            simple,
        } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {:?}", out_dir))?;
            let corpus = Quran::load(&quran, None)
                .with_context(|| format!("loading verses from {:?}", quran))?;
            let mode = letters_mode(simple);

            for (vowel, corpus_name, termlist, postlist) in [
                (true, "phonetic_vowel.txt", store::TERMLIST_VOWEL, store::POSTLIST_VOWEL),
                (false, "phonetic.txt", store::TERMLIST, store::POSTLIST),
            ] {
                let coded = indexer::phoneticize(corpus.verses(), mode, vowel);
                indexer::write_corpus(&coded, &out_dir.join(corpus_name))?;

                let mut builder = IndexBuilder::new();
                for (doc_id, code) in &coded {
                    builder.add_document(*doc_id, code);
                }
                builder.write_to(&out_dir.join(termlist), &out_dir.join(postlist))?;
                println!(
                    "{}: {} documents, {} terms",
                    termlist,
                    coded.len(),
                    builder.term_count()
                );
            }
        }
    }

    println!("done in {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn letters_mode(simple: bool) -> LettersMode {
    if simple {
        LettersMode::Simple
    } else {
        LettersMode::Uthmani
    }
}
