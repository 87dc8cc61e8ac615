//! End-to-end pipeline tests: Arabic verses -> phonetic corpus -> on-disk
//! index -> engine -> ranked hits, all through the real file formats.

use std::path::Path;

use qari::indexer::{self, IndexBuilder};
use qari::models::Verse;
use qari::phonetic::{LettersMode, PhoneticEncoder};
use qari::search::{QueryEncoder, SearchEngine};
use qari::store::{self, IndexStore};
use qari::Quran;

const AL_FATIHAH: [&str; 7] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِين",
    "ٱلرَّحْمَـٰنِ ٱلرَّحِيم",
    "مَـٰلِكِ يَوْمِ ٱلدِّين",
    "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
    "ٱهْدِنَا ٱلصِّرَٰطَ ٱلْمُسْتَقِيمَ",
    "صِرَٰطَ ٱلَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ ٱلْمَغْضُوبِ عَلَيْهِمْ وَلَا ٱلضَّآلِّينَ",
];

fn fixture_verses() -> Vec<Verse> {
    AL_FATIHAH
        .iter()
        .enumerate()
        .map(|(i, arabic)| Verse {
            doc_id: i as u32 + 1,
            chapter_no: 1,
            chapter_name: "Al-Fatihah".to_string(),
            verse_no: i as u32 + 1,
            arabic: arabic.to_string(),
            translation: String::new(),
        })
        .collect()
}

/// Build both index pairs on disk the way the `build-index all` command does
/// and return the opened store plus the phoneticized corpora.
fn build_index(dir: &Path) -> (IndexStore, Vec<(u32, String)>, Vec<(u32, String)>) {
    let verses = fixture_verses();
    let vowel_corpus = indexer::phoneticize(&verses, LettersMode::Uthmani, true);
    let plain_corpus = indexer::phoneticize(&verses, LettersMode::Uthmani, false);

    for (corpus, termlist, postlist) in [
        (&vowel_corpus, store::TERMLIST_VOWEL, store::POSTLIST_VOWEL),
        (&plain_corpus, store::TERMLIST, store::POSTLIST),
    ] {
        let mut builder = IndexBuilder::new();
        for (doc_id, code) in corpus.iter() {
            builder.add_document(*doc_id, code);
        }
        builder
            .write_to(&dir.join(termlist), &dir.join(postlist))
            .expect("index written");
    }

    let store = IndexStore::open_dir(dir).expect("index reopens from disk");
    (store, vowel_corpus, plain_corpus)
}

/// Feeds phonetic codes through the engine unchanged.
struct Passthrough;

impl PhoneticEncoder for Passthrough {
    fn encode(&self, input: &[u8], keep_vowels: bool) -> String {
        let mut s = String::from_utf8_lossy(input).to_uppercase();
        if !keep_vowels {
            s.retain(|c| !matches!(c, 'A' | 'I' | 'U'));
        }
        s
    }
}

#[test]
fn transliterated_query_finds_its_verse() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, _, _) = build_index(dir.path());
    let engine = SearchEngine::new(store, QueryEncoder::Manual)
        .with_corpus(Quran::from_verses(fixture_verses()));

    let result = engine
        .search(b"bismillahirrohmanirrohim", true)
        .expect("search runs");
    assert_eq!(result.phonetic_code, "BISMILAHIRAHMANIRAHIM");
    assert!(result.found_docs >= 1);
    assert_eq!(result.docs[0].doc_id, 1);
    let verse = result.docs[0].verse.as_ref().expect("verse attached");
    assert_eq!(verse.chapter_no, 1);
    assert_eq!(verse.verse_no, 1);

    // same query against the vowel-stripped index
    let result = engine
        .search(b"bismillahirrohmanirrohim", false)
        .expect("search runs");
    assert_eq!(result.phonetic_code, "BSMLHRHMNRHM");
    assert_eq!(result.docs[0].doc_id, 1);
}

#[test]
fn every_verse_retrieves_itself_top_ranked() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, vowel_corpus, plain_corpus) = build_index(dir.path());
    let engine = SearchEngine::with_encoder(store, Box::new(Passthrough));

    for (corpus, vowel) in [(&vowel_corpus, true), (&plain_corpus, false)] {
        for (doc_id, code) in corpus.iter() {
            let result = engine.search(code.as_bytes(), vowel).expect("search runs");
            assert!(
                result.found_docs >= 1,
                "verse {} (vowel={}) should retrieve something",
                doc_id,
                vowel
            );
            assert_eq!(
                result.docs[0].doc_id, *doc_id,
                "verse {} (vowel={}) should rank itself first",
                doc_id, vowel
            );
        }
    }
}

#[test]
fn scores_stay_within_the_trigram_budget() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, vowel_corpus, _) = build_index(dir.path());
    let engine = SearchEngine::with_encoder(store, Box::new(Passthrough));

    for (_, code) in vowel_corpus.iter() {
        let result = engine.search(code.as_bytes(), true).expect("search runs");
        for doc in &result.docs {
            assert!(
                doc.score <= result.trigram_count as f64 + 1e-9,
                "score {} exceeds trigram count {}",
                doc.score,
                result.trigram_count
            );
            assert!(doc.score > result.min_score);
        }
    }
}

#[test]
fn partial_phrase_still_finds_the_verse() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (store, _, _) = build_index(dir.path());
    let mut engine = SearchEngine::new(store, QueryEncoder::Manual);
    engine.set_filter_threshold(0.5);

    // "maliki yaumiddin" covers most of verse 4
    let result = engine.search(b"maliki yaumiddin", true).expect("search runs");
    assert!(result.found_docs >= 1);
    assert_eq!(result.docs[0].doc_id, 4);
}

#[test]
fn index_files_round_trip_through_the_documented_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, vowel_corpus, _) = build_index(dir.path());

    // corpus file format: DOCID|CODE, 1-based ascending
    let corpus_path = dir.path().join("phonetic_vowel.txt");
    indexer::write_corpus(&vowel_corpus, &corpus_path).expect("corpus written");
    let text = std::fs::read_to_string(&corpus_path).expect("corpus reads");
    for (i, line) in text.lines().enumerate() {
        let (doc_id, code) = line.split_once('|').expect("DOCID|CODE shape");
        assert_eq!(doc_id.parse::<usize>().expect("integer id"), i + 1);
        assert!(code.chars().all(|c| "AIUBDFGHKLMNRSTWYZX".contains(c)));
    }

    // termlist format: TOKEN|OFFSET ascending, offsets strictly increasing
    let termlist = std::fs::read_to_string(dir.path().join(store::TERMLIST_VOWEL))
        .expect("termlist reads");
    let postlist =
        std::fs::read_to_string(dir.path().join(store::POSTLIST_VOWEL)).expect("postlist reads");
    assert_eq!(termlist.lines().count(), postlist.lines().count());

    let mut offsets = Vec::new();
    for line in termlist.lines() {
        let (_, offset) = line.split_once('|').expect("TOKEN|OFFSET shape");
        offsets.push(offset.parse::<u64>().expect("integer offset"));
    }
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));

    // every posting line decodes as DOCID:POS[,POS]*(;...)* with ascending ids
    for line in postlist.lines() {
        let mut prev_id = 0u32;
        for record in line.split(';') {
            let (doc_id, positions) = record.split_once(':').expect("DOCID:POS shape");
            let doc_id: u32 = doc_id.parse().expect("integer doc id");
            assert!(doc_id > prev_id, "doc ids ascend within a posting line");
            prev_id = doc_id;
            let positions: Vec<u32> = positions
                .split(',')
                .map(|p| p.parse().expect("integer position"))
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
