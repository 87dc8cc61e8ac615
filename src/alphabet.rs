//! Arabic code points used by the phonetic pipeline.
//!
//! Pure vocabulary: every constant the encoders touch has a name here so the
//! rewrite rules read as prose instead of `\u{...}` soup. Grouped the way the
//! Unicode Arabic block groups them — consonants, harakat, then the small
//! Uthmani annotation marks.

// ── Consonants ───────────────────────────────────────────────────────────────

pub const HAMZA: char = '\u{0621}';
pub const ALEF_MADDA: char = '\u{0622}';
pub const ALEF_HAMZA_ABOVE: char = '\u{0623}';
pub const WAW_HAMZA_ABOVE: char = '\u{0624}';
pub const ALEF_HAMZA_BELOW: char = '\u{0625}';
pub const YEH_HAMZA_ABOVE: char = '\u{0626}';
pub const ALEF: char = '\u{0627}';
pub const BEH: char = '\u{0628}';
pub const TEH_MARBUTA: char = '\u{0629}';
pub const TEH: char = '\u{062a}';
pub const THEH: char = '\u{062b}';
pub const JEEM: char = '\u{062c}';
pub const HAH: char = '\u{062d}';
pub const KHAH: char = '\u{062e}';
pub const DAL: char = '\u{062f}';
pub const THAL: char = '\u{0630}';
pub const REH: char = '\u{0631}';
pub const ZAIN: char = '\u{0632}';
pub const SEEN: char = '\u{0633}';
pub const SHEEN: char = '\u{0634}';
pub const SAD: char = '\u{0635}';
pub const DAD: char = '\u{0636}';
pub const TAH: char = '\u{0637}';
pub const ZAH: char = '\u{0638}';
pub const AIN: char = '\u{0639}';
pub const GHAIN: char = '\u{063a}';
pub const FEH: char = '\u{0641}';
pub const QAF: char = '\u{0642}';
pub const KAF: char = '\u{0643}';
pub const LAM: char = '\u{0644}';
pub const MEEM: char = '\u{0645}';
pub const NOON: char = '\u{0646}';
pub const HEH: char = '\u{0647}';
pub const WAW: char = '\u{0648}';
pub const ALEF_MAKSURA: char = '\u{0649}';
pub const YEH: char = '\u{064a}';

// ── Harakat, tanwin and syllable marks ───────────────────────────────────────

pub const FATHATAN: char = '\u{064b}';
pub const DAMMATAN: char = '\u{064c}';
pub const KASRATAN: char = '\u{064d}';
pub const FATHA: char = '\u{064e}';
pub const DAMMA: char = '\u{064f}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';

// ── Uthmani annotation marks ─────────────────────────────────────────────────
//
// Name prefixes follow the Unicode chart: SMALL_HIGH / SMALL_LOW for the
// raised and lowered small letters, EMPTY_CENTRE / ROUNDED for the stop signs.

pub const TATWEEL: char = '\u{0640}';
pub const MADDAH_ABOVE: char = '\u{0653}';
pub const HAMZA_ABOVE: char = '\u{0654}';
pub const ALEF_ABOVE: char = '\u{0670}';
pub const ALEF_WASLA: char = '\u{0671}';
pub const SMALL_HIGH_LIGATURE_SAD: char = '\u{06d6}';
pub const SMALL_HIGH_LIGATURE_QAF: char = '\u{06d7}';
pub const SMALL_HIGH_MEEM_INITIAL: char = '\u{06d8}';
pub const SMALL_HIGH_LAM_ALEF: char = '\u{06d9}';
pub const SMALL_HIGH_JEEM: char = '\u{06da}';
pub const SMALL_HIGH_THREE_DOTS: char = '\u{06db}';
pub const SMALL_HIGH_SEEN: char = '\u{06dc}';
pub const RUB_EL_HIZB: char = '\u{06de}';
pub const SMALL_HIGH_ROUNDED_ZERO: char = '\u{06df}';
pub const SMALL_HIGH_UPRIGHT_RECT_ZERO: char = '\u{06e0}';
pub const SMALL_HIGH_MEEM_ISOLATED: char = '\u{06e2}';
pub const SMALL_LOW_SEEN: char = '\u{06e3}';
pub const SMALL_WAW: char = '\u{06e5}';
pub const SMALL_YEH: char = '\u{06e6}';
pub const SMALL_HIGH_YEH: char = '\u{06e7}';
pub const SMALL_HIGH_NOON: char = '\u{06e8}';
pub const SAJDAH: char = '\u{06e9}';
pub const EMPTY_CENTRE_LOW_STOP: char = '\u{06ea}';
pub const EMPTY_CENTRE_HIGH_STOP: char = '\u{06eb}';
pub const ROUNDED_HIGH_STOP_FILLED_CENTRE: char = '\u{06ec}';
pub const SMALL_LOW_MEEM: char = '\u{06ed}';
