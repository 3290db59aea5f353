//! Address tokenizer.
//!
//! An address is read as a run of *segments*, each terminated by either a
//! comma or a unit character (縣, 市, 路, 號, ...):
//!
//! ```text
//! 臺北市 中山 路 3 巷 10之2 號
//! └name┘└name┘  └no┘ └no/sub┘
//!     市     路     巷       號
//! ```
//!
//! A segment is a digit run (optionally `之`/`-` and a sub-number) or, failing
//! that, the shortest run of characters that reaches a delimiter. Only fully
//! delimited segments become tokens; an unterminated tail is dropped, with one
//! exception described on [`tokenize`].

use super::normalize::normalize;
use crate::{Segment, Token, Unit};

/// Split `text` into address tokens.
///
/// The text is normalized first. Matching is leftmost-first and
/// non-overlapping, so `3巷5弄7號` yields three number tokens terminated by
/// 巷, 弄 and 號.
///
/// A tail made of exactly one unit character (`...樓` with nothing before the
/// 樓) is kept as a marker token with an empty name, unless the previous token
/// already ends with that same unit.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = normalize(text);
    let re = regex!(
        r"(?:(?P<no>[0-9]+)(?:[之\-](?P<subno>[0-9]+))?|(?P<name>.+?))(?:[,，]|(?P<unit>[縣市鄉鎮區村里路段街巷弄號樓])[,，]?)"
    );

    let mut tokens = Vec::new();
    let mut consumed = 0;

    for caps in re.captures_iter(&normalized) {
        let Some(whole) = caps.get(0) else { continue };
        consumed = whole.end();

        let unit = caps.name("unit").and_then(|m| m.as_str().chars().next()).and_then(Unit::from_char);
        let segment = match caps.name("no") {
            Some(no) => {
                let subno = caps.name("subno");
                let raw_end = subno.map_or(no.end(), |m| m.end());
                number_segment(no.as_str(), subno.map(|m| m.as_str()))
                    .unwrap_or_else(|| Segment::Name(normalized[no.start()..raw_end].to_string()))
            }
            None => Segment::Name(caps.name("name").map_or("", |m| m.as_str()).to_string()),
        };

        tokens.push(Token { segment, unit });
    }

    if let Some(unit) = lone_unit(&normalized[consumed..]) {
        if tokens.last().is_none_or(|prev| prev.unit != Some(unit)) {
            tokens.push(Token { segment: Segment::Name(String::new()), unit: Some(unit) });
        }
    }

    tokens
}

/// Digit runs that do not fit a `u64` are not numbers we can compare; the
/// caller keeps them as name text instead.
fn number_segment(no: &str, subno: Option<&str>) -> Option<Segment> {
    let number = no.parse().ok()?;
    let sub_number = match subno {
        Some(s) => Some(s.parse().ok()?),
        None => None,
    };
    Some(Segment::Number { number, sub_number })
}

fn lone_unit(tail: &str) -> Option<Unit> {
    let mut chars = tail.chars();
    let unit = Unit::from_char(chars.next()?)?;
    if chars.next().is_some() { None } else { Some(unit) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str, unit: Option<Unit>) -> Token {
        Token { segment: Segment::Name(s.to_string()), unit }
    }

    fn no(number: u64, sub_number: Option<u64>, unit: Option<Unit>) -> Token {
        Token { segment: Segment::Number { number, sub_number }, unit }
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \u{3000} ").is_empty());
    }

    #[test]
    fn full_address() {
        let tokens = tokenize("臺北市中正區中山路3巷5弄7之2號10樓");
        assert_eq!(
            tokens,
            vec![
                name("臺北", Some(Unit::City)),
                name("中正", Some(Unit::District)),
                name("中山", Some(Unit::Road)),
                no(3, None, Some(Unit::Lane)),
                no(5, None, Some(Unit::Alley)),
                no(7, Some(2), Some(Unit::Number)),
                no(10, None, Some(Unit::Floor)),
            ]
        );
    }

    #[test]
    fn hyphen_separates_sub_number() {
        assert_eq!(tokenize("10-3號"), vec![no(10, Some(3), Some(Unit::Number))]);
        assert_eq!(tokenize("10之3號"), tokenize("10-3號"));
    }

    #[test]
    fn commas_delimit_without_unit() {
        assert_eq!(
            tokenize("中山路,10號，5樓"),
            vec![name("中山", Some(Unit::Road)), no(10, None, Some(Unit::Number)), no(5, None, Some(Unit::Floor))]
        );
        assert_eq!(tokenize("地下室,"), vec![name("地下室", None)]);
    }

    #[test]
    fn unterminated_tail_is_dropped() {
        assert_eq!(tokenize("中山路10"), vec![name("中山", Some(Unit::Road))]);
        assert_eq!(tokenize("中山路10號後棟"), tokenize("中山路10號"));
    }

    #[test]
    fn digits_followed_by_text_become_a_name() {
        assert_eq!(tokenize("12a號"), vec![name("12a", Some(Unit::Number))]);
    }

    #[test]
    fn oversized_numbers_are_kept_as_names() {
        let digits = "123456789012345678901234567890";
        assert_eq!(tokenize(&format!("{digits}號")), vec![name(digits, Some(Unit::Number))]);
    }

    #[test]
    fn lone_trailing_unit_is_a_marker() {
        assert_eq!(tokenize("號"), vec![name("", Some(Unit::Number))]);
        assert_eq!(
            tokenize("中山路樓"),
            vec![name("中山", Some(Unit::Road)), name("", Some(Unit::Floor))]
        );
    }

    #[test]
    fn doubled_trailing_unit_is_not_a_marker() {
        assert_eq!(tokenize("10號號"), vec![no(10, None, Some(Unit::Number))]);
    }

    #[test]
    fn rendered_tokens_tokenize_back_to_themselves() {
        for input in ["臺北市中正區中山路3巷5弄7之2號10樓", "中山路,10-1號", "新北市板橋區文化路一段100號"] {
            let tokens = tokenize(input);
            let rendered: String = tokens.iter().map(|t| t.to_string()).collect();
            assert_eq!(tokenize(&rendered), tokens, "re-tokenizing {rendered:?}");
        }
    }
}
