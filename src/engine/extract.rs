//! Qualifier extraction for delivery rules.
//!
//! Rule text such as `單 25號以下` mixes an address (`25號`) with range and
//! parity phrases (`單`, `以下`). This module removes those phrases, records
//! them as [`Qualifier`]s in the order they were seen, and leaves a residual
//! that the tokenizer can read as a plain address.
//!
//! ## Scanning
//!
//! The scan walks the normalized text left to right. At each position the
//! phrase table is tried top to bottom and the first entry that matches (text
//! *and* follow condition) wins; otherwise one character is copied to the
//! residual. Longer phrases sit above their own substrings, so `含附號以下`
//! is recognized before `以下` can be.
//!
//! Follow conditions only peek at the text after the phrase, they never
//! consume it. `單全` therefore yields both `Odd` and `FullRange`.

use super::normalize::normalize;
use crate::Qualifier;

/// What has to come right after a phrase for it to count.
#[derive(Debug, Clone, Copy)]
enum Follow {
    Anything,
    Digit,
    DigitOrFull,
    End,
}

impl Follow {
    fn admits(self, rest: &str) -> bool {
        match self {
            Follow::Anything => true,
            Follow::Digit => rest.starts_with(|ch: char| ch.is_ascii_digit()),
            Follow::DigitOrFull => rest.starts_with(|ch: char| ch.is_ascii_digit() || ch == '全'),
            Follow::End => rest.is_empty(),
        }
    }
}

struct Phrase {
    text: &'static str,
    follow: Follow,
    qualifier: Qualifier,
    /// Text left in the residual in place of the phrase.
    rewrite: &'static str,
}

const fn phrase(text: &'static str, follow: Follow, qualifier: Qualifier) -> Phrase {
    Phrase { text, follow, qualifier, rewrite: "" }
}

// Priority order: earlier entries shadow later ones at the same position.
const PHRASES: &[Phrase] = &[
    phrase("及以上附號", Follow::Anything, Qualifier::IncludingSubnumbersAndAbove),
    phrase("含附號以下", Follow::Anything, Qualifier::IncludingSubnumbersAndBelow),
    phrase("含附號全", Follow::Anything, Qualifier::ExactNumber),
    phrase("含附號", Follow::Anything, Qualifier::ExactNumber),
    phrase("以下", Follow::Anything, Qualifier::AndBelow),
    phrase("以上", Follow::Anything, Qualifier::AndAbove),
    // The number marker stays so the residual keeps its number boundary.
    Phrase { text: "附號全", follow: Follow::Anything, qualifier: Qualifier::IncludingAllSubnumbers, rewrite: "號" },
    phrase("連", Follow::Digit, Qualifier::Through),
    phrase("至", Follow::Digit, Qualifier::Through),
    phrase("單號", Follow::Anything, Qualifier::Odd),
    phrase("雙號", Follow::Anything, Qualifier::Even),
    phrase("單", Follow::DigitOrFull, Qualifier::Odd),
    phrase("雙", Follow::DigitOrFull, Qualifier::Even),
    phrase("全", Follow::End, Qualifier::FullRange),
];

/// Split rule text into its qualifiers (in encounter order) and the residual
/// address text.
///
/// ```
/// use twzip::{Qualifier, extract_qualifiers};
///
/// let (qualifiers, residual) = extract_qualifiers("單 3號至 25號");
/// assert_eq!(qualifiers, vec![Qualifier::Odd, Qualifier::Through]);
/// assert_eq!(residual, "3號25號");
/// ```
pub fn extract_qualifiers(rule_text: &str) -> (Vec<Qualifier>, String) {
    let normalized = normalize(rule_text);
    let mut qualifiers = Vec::new();
    let mut residual = String::with_capacity(normalized.len());
    let mut rest = normalized.as_str();

    'scan: while let Some(ch) = rest.chars().next() {
        for phrase in PHRASES {
            if let Some(after) = rest.strip_prefix(phrase.text) {
                if phrase.follow.admits(after) {
                    qualifiers.push(phrase.qualifier);
                    residual.push_str(phrase.rewrite);
                    rest = after;
                    continue 'scan;
                }
            }
        }
        residual.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    (qualifiers, residual)
}
