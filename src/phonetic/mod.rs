//! Phonetic encoders: Arabic orthography and Latin transliteration are both
//! rewritten into one canonical code over the alphabet
//! `{A,I,U, B,D,F,G,H,K,L,M,N,R,S,T,W,Y,Z,X}`, so a query typed in a Latin
//! transliteration can be matched against Arabic verses byte for byte.

mod arabic;
mod latin;

pub use arabic::ArabicEncoder;
pub use latin::LatinEncoder;

use serde::{Deserialize, Serialize};

/// Which Arabic orthography the encoder input uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LettersMode {
    /// Plain Arabic letters and harakat only.
    #[default]
    Simple,
    /// Qur'anic Uthmani script with its small annotation marks.
    Uthmani,
}

/// Anything that can turn raw input bytes into a phonetic code.
///
/// Implementations are pure: the same input and vowel flag always produce the
/// same code. Unknown bytes are normalized away, never an error.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, input: &[u8], keep_vowels: bool) -> String;
}
