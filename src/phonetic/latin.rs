//! Latin phonetic encoder.
//!
//! Rewrites a Latin-script transliteration into the same canonical code the
//! Arabic encoder emits, driven by a per-language letter mapping. The stages
//! mirror the Arabic side where the orthographies overlap: vowel folding,
//! gemination collapse, hamza marking, then ikhfa/iqlab/idgham and the final
//! letter map.
//!
//! Alternation stages compile to `regex` patterns built from the mapping at
//! construction time; the repeat-collapse stages need back-references, which
//! the regex crate deliberately lacks, so they are small hand-rolled scanners
//! over the (post-preprocess, pure ASCII) buffer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::alphabet::*;
use crate::mapping::LetterMapping;
use crate::phonetic::PhoneticEncoder;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static OUTSIDE_CHARSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z`'\s]").unwrap());
static HAMZA_AT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<h>A|I|U)").unwrap());
static HAMZA_AFTER_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s(?P<h>A|I|U)").unwrap());
static HAMZA_AFTER_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"I(?P<h>A|U)").unwrap());
static HAMZA_AFTER_U: Lazy<Regex> = Lazy::new(|| Regex::new(r"U(?P<h>A|I)").unwrap());
static APOSTROPHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"'|`").unwrap());

/// The fifteen letters a silent noon conceals into.
const IKHFA_LETTERS: [char; 15] = [
    TEH, THEH, JEEM, DAL, THAL, ZAIN, SEEN, SHEEN, SAD, DAD, TAH, ZAH, FEH, QAF, KAF,
];

/// The letters a silent noon assimilates into.
const IDGHAM_LETTERS: [char; 6] = [NOON, MEEM, LAM, REH, YEH, WAW];

/// Equivalence classes of the letter map, in substitution order. Multi-letter
/// digraphs are rewritten by the early classes, so the later single-letter
/// rules never see their substrings.
const CLASS_Z: [char; 4] = [THAL, ZAH, ZAIN, JEEM];
const CLASS_H: [char; 3] = [HEH, KHAH, HAH];
const CLASS_S: [char; 4] = [THEH, SHEEN, SEEN, SAD];
const CLASS_D: [char; 2] = [DAD, DAL];
const CLASS_T: [char; 2] = [TEH, TAH];
const CLASS_K: [char; 2] = [QAF, KAF];
const SINGLES: [(char, &str); 9] = [
    (GHAIN, "G"),
    (FEH, "F"),
    (MEEM, "M"),
    (NOON, "N"),
    (LAM, "L"),
    (BEH, "B"),
    (YEH, "Y"),
    (WAW, "W"),
    (REH, "R"),
];

/// Encoder from Latin transliteration to phonetic code.
pub struct LatinEncoder {
    digraphs: Vec<String>,
    ikhfa: Option<(Regex, String)>,
    iqlab: Option<(Regex, String)>,
    idgham: Option<Regex>,
    letter_rules: Vec<(Regex, &'static str)>,
}

impl LatinEncoder {
    /// Build an encoder from a learned mapping table. Letters the table
    /// lacks simply contribute nothing to the rules that need them.
    pub fn new(mapping: &LetterMapping) -> Self {
        let digraphs: Vec<String> = mapping.digraphs().iter().map(|d| d.to_string()).collect();

        let ikhfa = mapping.get(NOON).and_then(|noon| {
            let alts = alternation(mapping, &IKHFA_LETTERS, None)?;
            let pattern = format!("(?P<vowel>A|I|U){}G\\s?(?P<ikhfa>{})", regex::escape(noon), alts);
            let replace = format!("${{vowel}}{}${{ikhfa}}", noon);
            Some((compile(&pattern), replace))
        });

        let iqlab = match (mapping.get(NOON), mapping.get(BEH), mapping.get(MEEM)) {
            (Some(noon), Some(beh), Some(meem)) => {
                let pattern = format!("{}\\s?{}", regex::escape(noon), regex::escape(beh));
                Some((compile(&pattern), format!("{}{}", meem, beh)))
            }
            _ => None,
        };

        let idgham = mapping.get(NOON).and_then(|noon| {
            let alts = alternation(mapping, &IDGHAM_LETTERS, None)?;
            let pattern = format!("{}\\s?(?P<idgham>{})", regex::escape(noon), alts);
            Some(compile(&pattern))
        });

        let mut letter_rules: Vec<(Regex, &'static str)> = Vec::new();
        letter_rules.extend(class_rule(mapping, &CLASS_Z, "Z"));
        letter_rules.extend(class_rule(mapping, &CLASS_H, "H"));
        letter_rules.push((APOSTROPHES.clone(), "X"));
        letter_rules.extend(class_rule(mapping, &CLASS_S, "S"));
        letter_rules.extend(class_rule(mapping, &CLASS_D, "D"));
        letter_rules.extend(class_rule(mapping, &CLASS_T, "T"));
        letter_rules.extend(class_rule(mapping, &CLASS_K, "K"));
        for (letter, repl) in SINGLES {
            letter_rules.extend(class_rule(mapping, &[letter], repl));
        }

        LatinEncoder {
            digraphs,
            ikhfa,
            iqlab,
            idgham,
            letter_rules,
        }
    }

    /// The manual fallback: same pipeline over the built-in Indonesian table.
    pub fn manual() -> Self {
        Self::new(&LetterMapping::indonesian())
    }
}

impl PhoneticEncoder for LatinEncoder {
    fn encode(&self, input: &[u8], keep_vowels: bool) -> String {
        let text = String::from_utf8_lossy(input);
        let mut s = preprocess(&text);
        s = fold_vowels(&s);
        s = collapse_single_consonants(&s);
        for d in &self.digraphs {
            s = collapse_unit_repeats(&s, d);
        }
        s = collapse_vowel_repeats(&s);
        s = s.replace("AI", "AY").replace("AU", "AW");
        s = mark_hamza(&s);
        if let Some((re, replace)) = &self.ikhfa {
            s = re.replace_all(&s, replace.as_str()).into_owned();
        }
        if let Some((re, replace)) = &self.iqlab {
            s = re.replace_all(&s, replace.as_str()).into_owned();
        }
        s = self.sub_idgham(s);
        for (re, replace) in &self.letter_rules {
            s = re.replace_all(&s, *replace).into_owned();
        }
        s.retain(|c| c != ' ');
        if !keep_vowels {
            s.retain(|c| !matches!(c, 'A' | 'I' | 'U'));
        }
        s
    }
}

impl LatinEncoder {
    fn sub_idgham(&self, s: String) -> String {
        let Some(re) = &self.idgham else { return s };

        // protect the lexical exceptions before the general rule runs
        let s = s
            .replace("DUNYA", "DUN_YA")
            .replace("BUNYAN", "BUN_YAN")
            .replace("QINWAN", "KIN_WAN")
            .replace("KINWAN", "KIN_WAN")
            .replace("SINWAN", "SIN_WAN")
            .replace("SHINWAN", "SIN_WAN")
            .replace("NUNWALQALAM", "NUN_WALQALAM");

        let s = re.replace_all(&s, "${idgham}").into_owned();

        s.replace("DUN_YA", "DUNYA")
            .replace("BUN_YAN", "BUNYAN")
            .replace("KIN_WAN", "KINWAN")
            .replace("SIN_WAN", "SINWAN")
            .replace("NUN_WALQALAM", "NUNWALQALAM")
    }
}

fn compile(pattern: &str) -> Regex {
    // patterns are assembled from escaped digraphs and fixed syntax
    Regex::new(pattern).expect("mapping-derived pattern is valid")
}

/// One letter-map substitution rule: rewrite every digraph of `letters` to
/// the class code `repl`. `None` when the mapping gives the rule nothing.
fn class_rule(
    mapping: &LetterMapping,
    letters: &[char],
    repl: &'static str,
) -> Option<(Regex, &'static str)> {
    alternation(mapping, letters, Some(repl)).map(|alts| (compile(&alts), repl))
}

/// `D1|D2|...` over the digraphs of `letters`, escaped. Digraphs equal to
/// the replacement are omitted (rewriting them would be a no-op); if nothing
/// remains there is no rule.
fn alternation(mapping: &LetterMapping, letters: &[char], skip: Option<&str>) -> Option<String> {
    let alts: Vec<String> = letters
        .iter()
        .filter_map(|&c| mapping.get(c))
        .filter(|d| skip != Some(*d))
        .map(regex::escape)
        .collect();
    if alts.is_empty() {
        None
    } else {
        Some(alts.join("|"))
    }
}

/// Upper-case, hyphens to spaces, whitespace runs to single spaces, then
/// strip everything outside `[A-Z` + backtick + `'` + space`]`.
fn preprocess(text: &str) -> String {
    let upper = text.to_uppercase().replace('-', " ");
    let collapsed = WHITESPACE_RUN.replace_all(upper.trim(), " ");
    OUTSIDE_CHARSET.replace_all(&collapsed, "").into_owned()
}

/// Fold the five-vowel Latin system onto the three Arabic vowels.
fn fold_vowels(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'O' => 'A',
            'E' => 'I',
            c => c,
        })
        .collect()
}

fn is_single_consonant(b: u8) -> bool {
    b.is_ascii_uppercase() && !matches!(b, b'A' | b'E' | b'I' | b'O' | b'U')
}

/// Collapse repeats of a single consonant, optionally separated by one
/// space: `LL` and `L L` both read as one `L`.
fn collapse_single_consonants(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        out.push(b);
        i += 1;
        if !is_single_consonant(b) {
            continue;
        }
        loop {
            if bytes.get(i) == Some(&b) {
                i += 1;
            } else if bytes.get(i) == Some(&b' ') && bytes.get(i + 1) == Some(&b) {
                i += 2;
            } else {
                break;
            }
        }
    }
    String::from_utf8(out).expect("ascii in, ascii out")
}

/// Collapse repeats of a multi-letter digraph, optionally separated by one
/// space: `KH KH` reads as one `KH`.
fn collapse_unit_repeats(s: &str, unit: &str) -> String {
    let bytes = s.as_bytes();
    let ub = unit.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(ub) {
            out.extend_from_slice(ub);
            i += ub.len();
            loop {
                if bytes[i..].starts_with(ub) {
                    i += ub.len();
                } else if bytes.get(i) == Some(&b' ') && bytes[i + 1..].starts_with(ub) {
                    i += 1 + ub.len();
                } else {
                    break;
                }
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).expect("ascii in, ascii out")
}

/// Collapse immediately repeated vowels (`AA` → `A`).
fn collapse_vowel_repeats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if matches!(c, 'A' | 'E' | 'I' | 'O' | 'U') && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Insert the glottal stop the transliteration leaves implicit: before a
/// vowel that starts a word, and at vowel-vowel hiatus after I or U.
fn mark_hamza(s: &str) -> String {
    let s = HAMZA_AT_START.replace_all(s, "X${h}");
    let s = HAMZA_AFTER_SPACE.replace_all(&s, " X${h}");
    let s = HAMZA_AFTER_I.replace_all(&s, "IX${h}");
    let s = HAMZA_AFTER_U.replace_all(&s, "UX${h}");
    s.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> LatinEncoder {
        LatinEncoder::manual()
    }

    #[test]
    fn test_preprocess() {
        assert_eq!(preprocess("  asy-syamsu  42! "), "ASY SYAMSU ");
        assert_eq!(preprocess("qul a'udzu"), "QUL A'UDZU");
    }

    #[test]
    fn test_fold_vowels() {
        assert_eq!(fold_vowels("ROBBI MEN"), "RABBI MIN");
    }

    #[test]
    fn test_collapse_single_consonants() {
        assert_eq!(collapse_single_consonants("ALLAH"), "ALAH");
        assert_eq!(collapse_single_consonants("QUL LAHU"), "QULAHU");
        assert_eq!(collapse_single_consonants("ABBBA"), "ABA");
        assert_eq!(collapse_single_consonants("AA"), "AA", "vowels are left alone");
    }

    #[test]
    fn test_collapse_unit_repeats() {
        assert_eq!(collapse_unit_repeats("ASY SYAMSU", "SY"), "ASYAMSU");
        assert_eq!(collapse_unit_repeats("MAKHKHA", "KH"), "MAKHA");
        assert_eq!(collapse_unit_repeats("KHAIR", "KH"), "KHAIR");
    }

    #[test]
    fn test_mark_hamza() {
        assert_eq!(mark_hamza("ALHAMDU LILAHI"), "XALHAMDU LILAHI");
        assert_eq!(mark_hamza("QURXANI AZIM"), "QURXANI XAZIM");
        assert_eq!(mark_hamza("DUA"), "DUXA");
        assert_eq!(mark_hamza("MIA"), "MIXA");
    }

    #[test]
    fn test_encode_basmalah_matches_arabic_encoding() {
        let enc = manual();
        assert_eq!(
            enc.encode(b"bismillahirrohmanirrohim", true),
            "BISMILAHIRAHMANIRAHIM"
        );
        assert_eq!(enc.encode(b"bismillahirrohmanirrohim", false), "BSMLHRHMNRHM");
    }

    #[test]
    fn test_encode_marks_initial_hamza() {
        assert_eq!(manual().encode(b"alhamdu lillahi", true), "XALHAMDULILAHI");
    }

    #[test]
    fn test_encode_digraph_classes() {
        // KH folds into H, Q into K
        assert_eq!(manual().encode(b"khalaqa", true), "HALAKA");
        // SY folds into S, doubled across the hyphen boundary
        assert_eq!(manual().encode(b"asy-syamsu", true), "XASAMSU");
    }

    #[test]
    fn test_encode_diphthongs() {
        assert_eq!(manual().encode(b"aulia", true), "XAWLIXA");
        assert_eq!(manual().encode(b"lail", true), "LAYL");
    }

    #[test]
    fn test_encode_ikhfa() {
        // vowel + NG + concealing letter drops the G
        assert_eq!(manual().encode(b"angsa", true), "XANSA");
        assert_eq!(manual().encode(b"fangtaha", true), "FANTAHA");
    }

    #[test]
    fn test_encode_iqlab() {
        assert_eq!(manual().encode(b"min ba'dihim", true), "MIMBAXDIHIM");
    }

    #[test]
    fn test_encode_idgham() {
        assert_eq!(manual().encode(b"man yaqulu", true), "MAYAKULU");
        assert_eq!(manual().encode(b"mar robbihim", true), "MARABIHIM");
    }

    #[test]
    fn test_encode_idgham_exceptions() {
        assert_eq!(manual().encode(b"dunya", true), "DUNYA");
        assert_eq!(manual().encode(b"bunyanun", true), "BUNYANUN");
        assert_eq!(manual().encode(b"qinwanun", true), "KINWANUN");
    }

    #[test]
    fn test_encode_without_vowels() {
        assert_eq!(manual().encode(b"man yaqulu", false), "MYKL");
    }

    #[test]
    fn test_encode_sparse_mapping_still_works() {
        // a table with almost nothing in it loses recall, not correctness
        let mapping = LetterMapping::new(
            [(crate::alphabet::BEH, "B".to_string())].into_iter().collect(),
        );
        let enc = LatinEncoder::new(&mapping);
        let out = enc.encode(b"khalaqa", true);
        assert_eq!(out, enc.encode(b"khalaqa", true));
        assert!(!out.contains(' '));
    }

    #[test]
    fn test_encode_ignores_garbage() {
        let enc = manual();
        assert_eq!(enc.encode(b"", true), "");
        assert_eq!(enc.encode("čül 123 !?".as_bytes(), true), enc.encode(b"l", true));
    }
}
