//! Arabic phonetic encoder.
//!
//! Rewrites Qur'anic orthography into the canonical phonetic code through a
//! fixed cascade of stages: Uthmani normalization, gemination join, boundary
//! repair, tanwin expansion, madd removal, unread-consonant removal, then the
//! Tajwid assimilation rules (iqlab, idgham) and the final letter map. Every
//! stage is a small scan over the code-point buffer; nothing is re-parsed.

use crate::alphabet::*;
use crate::phonetic::{LettersMode, PhoneticEncoder};

/// Encoder from Arabic text to phonetic code.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicEncoder {
    letters_mode: LettersMode,
}

impl ArabicEncoder {
    pub fn new(letters_mode: LettersMode) -> Self {
        ArabicEncoder { letters_mode }
    }

    /// Encoder for plain Arabic letters.
    pub fn simple() -> Self {
        Self::new(LettersMode::Simple)
    }

    /// Encoder for Qur'anic Uthmani script.
    pub fn uthmani() -> Self {
        Self::new(LettersMode::Uthmani)
    }
}

impl PhoneticEncoder for ArabicEncoder {
    fn encode(&self, input: &[u8], keep_vowels: bool) -> String {
        let text = String::from_utf8_lossy(input);
        let mut chars: Vec<char> = text.chars().collect();
        if self.letters_mode == LettersMode::Uthmani {
            chars = normalize_uthmani(chars);
        }
        chars = remove_whitespace(chars);
        chars = remove_shadda(chars);
        chars = join_consonant(chars);
        chars = fix_boundary(chars);
        chars = tanwin_sub(chars);
        chars = remove_madda(chars);
        chars = remove_unread_consonant(chars);
        chars = iqlab_sub(chars);
        chars = idgham_sub(chars);
        if !keep_vowels {
            chars = remove_harakat(chars);
        }
        letter_map(&chars)
    }
}

fn is_harakat(c: char) -> bool {
    matches!(c, FATHA | KASRA | DAMMA)
}

fn is_tanwin(c: char) -> bool {
    matches!(c, FATHATAN | KASRATAN | DAMMATAN)
}

/// Harakat, tanwin, shadda and sukun: everything that rides on a consonant.
fn is_vowel_mark(c: char) -> bool {
    is_harakat(c) || is_tanwin(c) || c == SHADDA || c == SUKUN
}

/// Replace every occurrence of `from` with `to`, left to right.
fn replace_seq(chars: Vec<char>, from: &[char], to: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i..].starts_with(from) {
            out.extend_from_slice(to);
            i += from.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Strip the Uthmani annotation layer down to plain letters and harakat.
fn normalize_uthmani(chars: Vec<char>) -> Vec<char> {
    let mut out: Vec<char> = chars
        .into_iter()
        .map(|c| match c {
            ALEF_WASLA => ALEF,
            HAMZA_ABOVE => HAMZA,
            EMPTY_CENTRE_LOW_STOP => KASRA,
            other => other,
        })
        .collect();

    out = replace_seq(out, &[SMALL_HIGH_YEH, KASRA], &[YEH, KASRA]);
    out = replace_seq(out, &[SMALL_HIGH_YEH, SHADDA], &[YEH, KASRA]);
    out = replace_seq(out, &[SMALL_YEH, FATHA], &[YEH, FATHA]);
    out = replace_seq(out, &[SMALL_HIGH_NOON], &[NOON, SUKUN]);
    out = replace_seq(out, &[YEH, SMALL_HIGH_ROUNDED_ZERO], &[]);
    out = replace_seq(out, &[THEH, ' '], &[THEH, SUKUN]);

    out.retain(|&c| {
        !matches!(
            c,
            MADDAH_ABOVE
                | ALEF_ABOVE
                | SMALL_HIGH_LIGATURE_SAD
                | SMALL_HIGH_LIGATURE_QAF
                | SMALL_HIGH_MEEM_INITIAL
                | SMALL_HIGH_LAM_ALEF
                | SMALL_HIGH_JEEM
                | SMALL_HIGH_THREE_DOTS
                | SMALL_HIGH_SEEN
                | RUB_EL_HIZB
                | SMALL_HIGH_UPRIGHT_RECT_ZERO
                | SMALL_WAW
                | SMALL_HIGH_MEEM_ISOLATED
                | SMALL_LOW_SEEN
                | SAJDAH
                | EMPTY_CENTRE_HIGH_STOP
                | ROUNDED_HIGH_STOP_FILLED_CENTRE
                | SMALL_LOW_MEEM
                | TATWEEL
                | SMALL_HIGH_ROUNDED_ZERO
        )
    });

    // Verse-initial bare alef in iqtaraba/iqra is pronounced with a hamza;
    // the plain orthography spells it out.
    const IQTARABA: [char; 9] = [ALEF, QAF, SUKUN, TEH, FATHA, REH, FATHA, BEH, FATHA];
    const IQRA: [char; 5] = [ALEF, QAF, SUKUN, REH, FATHA];
    if out.starts_with(&IQTARABA) || out.starts_with(&IQRA) {
        out[0] = ALEF_HAMZA_BELOW;
        out.insert(1, KASRA);
    }

    out
}

fn remove_whitespace(mut chars: Vec<char>) -> Vec<char> {
    chars.retain(|c| !c.is_whitespace());
    chars
}

fn remove_shadda(mut chars: Vec<char>) -> Vec<char> {
    chars.retain(|&c| c != SHADDA);
    chars
}

/// Merge geminated consonants: `c sukun c` and `c c` both read as one `c`.
fn join_consonant(chars: Vec<char>) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let curr = chars[i];
        let next1 = chars.get(i + 1).copied();
        let next2 = chars.get(i + 2).copied();
        out.push(curr);
        if next1 == Some(SUKUN) && next2 == Some(curr) {
            i += 3;
        } else if next1 == Some(curr) {
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Repair the verse boundary: silence the final harakat, read a final teh
/// marbuta as heh, voice a bare leading alef.
fn fix_boundary(mut chars: Vec<char>) -> Vec<char> {
    match chars.last() {
        Some(&c) if c == ALEF || c == ALEF_MAKSURA => {
            chars.pop();
        }
        Some(&c) if is_harakat(c) || is_tanwin(c) => {
            let i = chars.len() - 1;
            chars[i] = SUKUN;
        }
        _ => {}
    }

    if let Some(last) = chars.last_mut() {
        if *last == FATHATAN {
            *last = FATHA;
        }
    }

    let n = chars.len();
    if n >= 2 && chars[n - 2] == TEH_MARBUTA {
        chars[n - 2] = HEH;
    }

    if chars.first() == Some(&ALEF) {
        chars.splice(0..0, [ALEF_HAMZA_ABOVE, FATHA]);
    }

    chars
}

/// Expand nunation: each tanwin reads as its short vowel plus a silent noon.
fn tanwin_sub(chars: Vec<char>) -> Vec<char> {
    let chars = replace_seq(chars, &[FATHATAN], &[FATHA, NOON, SUKUN]);
    let chars = replace_seq(chars, &[KASRATAN], &[KASRA, NOON, SUKUN]);
    replace_seq(chars, &[DAMMATAN], &[DAMMA, NOON, SUKUN])
}

/// Drop lengthening letters: a weak consonant carrying no harakat of its own
/// after its matching short vowel only stretches the vowel.
fn remove_madda(chars: Vec<char>) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let curr = chars[i];
        if let (Some(&n1), Some(&n2)) = (chars.get(i + 1), chars.get(i + 2)) {
            let long = (curr == FATHA && (n1 == ALEF || n1 == ALEF_MAKSURA))
                || (curr == KASRA && n1 == YEH)
                || (curr == DAMMA && n1 == WAW);
            if long && !is_harakat(n2) && n2 != SHADDA {
                out.push(curr);
                out.push(n2);
                i += 3;
                continue;
            }
        }
        out.push(curr);
        i += 1;
    }
    replace_seq(out, &[ALEF_MADDA], &[ALEF_HAMZA_ABOVE, FATHA])
}

/// Drop consonants that carry no vowel and precede another consonant, except
/// noon, meem and dal which stay readable in Uthmani spelling.
fn remove_unread_consonant(chars: Vec<char>) -> Vec<char> {
    // twice: removal can expose a new unread pair
    unread_pass(unread_pass(chars))
}

fn unread_pass(chars: Vec<char>) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let curr = chars[i];
        if let Some(&next) = chars.get(i + 1) {
            if !is_vowel_mark(curr)
                && !is_vowel_mark(next)
                && !matches!(curr, NOON | MEEM | DAL)
            {
                out.push(next);
                i += 2;
                continue;
            }
        }
        out.push(curr);
        i += 1;
    }
    out
}

/// Iqlab: a silent noon before beh is voiced as meem.
fn iqlab_sub(chars: Vec<char>) -> Vec<char> {
    let chars = replace_seq(chars, &[NOON, SUKUN, BEH], &[MEEM, SUKUN, BEH]);
    // Uthmani texts leave the sukun implicit
    replace_seq(chars, &[NOON, BEH], &[MEEM, SUKUN, BEH])
}

const DUNYA: &[char] = &[DAL, DAMMA, NOON, SUKUN, YEH];
const BUNYAN: &[char] = &[BEH, DAMMA, NOON, SUKUN, YEH, FATHA, NOON];
const SINWAN: &[char] = &[SAD, KASRA, NOON, SUKUN, WAW, FATHA, NOON];
const QINWAN: &[char] = &[QAF, KASRA, NOON, SUKUN, WAW, FATHA, NOON];
const NUNWALQALAM: &[char] = &[
    NOON, DAMMA, NOON, SUKUN, WAW, FATHA, LAM, SUKUN, QAF, FATHA, LAM, FATHA, MEEM,
];

/// The five lexical exceptions where idgham does not apply, paired with an
/// opaque sentinel that survives the rewrite untouched.
const IDGHAM_EXCEPTIONS: [(&[char], &[char]); 5] = [
    (DUNYA, &['D', 'U', 'N', 'Y', 'A']),
    (BUNYAN, &['B', 'U', 'N', 'Y', 'A', 'N']),
    (SINWAN, &['S', 'I', 'N', 'W', 'A', 'N']),
    (QINWAN, &['Q', 'I', 'N', 'W', 'A', 'N']),
    (NUNWALQALAM, &['N', 'U', 'N', 'W', 'A', 'L', 'Q', 'A', 'L', 'A', 'M']),
];

/// Idgham: a silent noon assimilates into a following noon, meem, lam, reh,
/// yeh or waw. Both sukun-explicit and Uthmani implicit spellings.
const IDGHAM_RULES: [(&[char], &[char]); 12] = [
    (&[NOON, SUKUN, NOON], &[NOON]),
    (&[NOON, SUKUN, MEEM], &[MEEM]),
    (&[NOON, SUKUN, LAM], &[LAM]),
    (&[NOON, SUKUN, REH], &[REH]),
    (&[NOON, NOON], &[NOON]),
    (&[NOON, MEEM], &[MEEM]),
    (&[NOON, LAM], &[LAM]),
    (&[NOON, REH], &[REH]),
    (&[NOON, SUKUN, YEH], &[YEH]),
    (&[NOON, SUKUN, WAW], &[WAW]),
    (&[NOON, YEH], &[YEH]),
    (&[NOON, WAW], &[WAW]),
];

fn idgham_sub(mut chars: Vec<char>) -> Vec<char> {
    for (seq, sentinel) in IDGHAM_EXCEPTIONS {
        chars = replace_seq(chars, seq, sentinel);
    }
    for (from, to) in IDGHAM_RULES {
        chars = replace_seq(chars, from, to);
    }
    for (seq, sentinel) in IDGHAM_EXCEPTIONS {
        chars = replace_seq(chars, sentinel, seq);
    }
    chars
}

fn remove_harakat(mut chars: Vec<char>) -> Vec<char> {
    chars.retain(|&c| !matches!(c, FATHA | KASRA | DAMMA | SUKUN));
    chars
}

/// Final single-pass map to the phonetic alphabet. Anything unmapped —
/// stray marks, sukun in vowel mode, foreign code points — is dropped.
fn letter_map(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    for &c in chars {
        let mapped = match c {
            JEEM | ZAIN | ZAH | THAL => 'Z',
            HEH | KHAH | HAH => 'H',
            HAMZA | ALEF_HAMZA_ABOVE | ALEF_HAMZA_BELOW | YEH_HAMZA_ABOVE | WAW_HAMZA_ABOVE
            | ALEF | AIN => 'X',
            SAD | THEH | SHEEN | SEEN => 'S',
            DAD | DAL => 'D',
            TEH_MARBUTA | TEH | TAH => 'T',
            QAF | KAF => 'K',
            YEH | ALEF_MAKSURA => 'Y',
            GHAIN => 'G',
            FEH => 'F',
            MEEM => 'M',
            NOON => 'N',
            LAM => 'L',
            BEH => 'B',
            WAW => 'W',
            REH => 'R',
            FATHA => 'A',
            KASRA => 'I',
            DAMMA => 'U',
            _ => continue,
        };
        out.push(mapped);
    }
    out
}
