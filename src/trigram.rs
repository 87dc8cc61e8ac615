//! Trigram feature extraction over phonetic codes.
//!
//! A token is three consecutive code points; phonetic codes are ASCII so in
//! practice that is three bytes. Positions are 1-based indices of the token's
//! first code point, the unit both the posting lists and the LIS scoring use.

use std::collections::HashMap;

/// One distinct trigram with every position it occurs at, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPositions {
    pub token: String,
    pub positions: Vec<u32>,
}

/// Number of trigrams in `code`: `max(0, code points − 2)`.
pub fn count(code: &str) -> usize {
    code.chars().count().saturating_sub(2)
}

/// Extract the distinct trigrams of `code` in first-occurrence order.
///
/// Repeat occurrences of a token only append to its position list, so the
/// returned sequence is deduplicated while still covering every window.
pub fn extract(code: &str) -> Vec<TokenPositions> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 3 {
        return Vec::new();
    }

    let mut tokens: Vec<TokenPositions> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for i in 0..=chars.len() - 3 {
        let token: String = chars[i..i + 3].iter().collect();
        let pos = (i + 1) as u32;
        match seen.get(&token) {
            Some(&at) => tokens[at].positions.push(pos),
            None => {
                seen.insert(token.clone(), tokens.len());
                tokens.push(TokenPositions {
                    token,
                    positions: vec![pos],
                });
            }
        }
    }

    tokens
}
