use crate::engine::{self, Verdict};
use crate::{NumberPair, Qualifier, QualifierSet, Token};
use std::fmt;
use std::time::{Duration, Instant};

/// A tokenized address.
///
/// Parsed once on construction and immutable afterwards. Construction never
/// fails: text the tokenizer cannot read simply produces fewer tokens.
///
/// # Example
/// ```
/// use twzip::{Address, NumberPair};
///
/// let addr = Address::new("臺北市中山路10之2號");
/// assert_eq!(addr.tokens().len(), 3);
/// assert_eq!(addr.trailing_number_pair(), NumberPair::new(10, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    text: String,
    tokens: Vec<Token>,
}

impl Address {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = engine::tokenize(&text);
        Self { text, tokens }
    }

    /// The text this address was built from, as given.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number pair of the token at `index`; negative indexes count from the
    /// end (`-1` is the last token). Missing tokens and name tokens read as
    /// `(0, 0)`.
    pub fn number_pair(&self, index: isize) -> NumberPair {
        let resolved = if index < 0 { self.tokens.len().checked_sub(index.unsigned_abs()) } else { Some(index as usize) };
        resolved.and_then(|i| self.tokens.get(i)).map(Token::number_pair).unwrap_or_default()
    }

    /// Number pair of the last token.
    pub fn trailing_number_pair(&self) -> NumberPair {
        self.number_pair(-1)
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Address::new(text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A delivery rule: an address prefix plus the range/parity qualifiers that
/// select which numbers on it belong to the rule.
///
/// # Example
/// ```
/// use twzip::{Address, AddressRule};
///
/// let rule = AddressRule::new("中山路 單 3號以上");
/// assert!(rule.matches(&Address::new("中山路7號")));
/// assert!(!rule.matches(&Address::new("中山路8號")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRule {
    text: String,
    qualifiers: Vec<Qualifier>,
    flags: QualifierSet,
    address: Address,
}

impl AddressRule {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (qualifiers, residual) = engine::extract_qualifiers(&text);
        let flags = qualifiers.iter().copied().collect();
        let address = Address::new(residual);

        tracing::debug!(rule = %text, ?qualifiers, residual = address.as_str(), tokens = address.tokens().len(), "rule compiled");

        Self { text, qualifiers, flags, address }
    }

    /// The rule text as given, qualifiers included.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Qualifiers in the order they appear in the rule text.
    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn flags(&self) -> QualifierSet {
        self.flags
    }

    /// The address left after the qualifier phrases were removed.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tokens(&self) -> &[Token] {
        self.address.tokens()
    }

    pub fn number_pair(&self, index: isize) -> NumberPair {
        self.address.number_pair(index)
    }

    pub fn trailing_number_pair(&self) -> NumberPair {
        self.address.trailing_number_pair()
    }

    /// Whether `address` lies inside this rule's delivery range.
    pub fn matches(&self, address: &Address) -> bool {
        engine::evaluate(self, address).verdict.is_match()
    }

    /// Like [`AddressRule::matches`], but reports how the decision was made.
    pub fn explain(&self, address: &Address) -> MatchDetails {
        let start = Instant::now();
        let eval = engine::evaluate(self, address);

        MatchDetails {
            matched: eval.verdict.is_match(),
            verdict: eval.verdict,
            anchor: eval.anchor,
            address_pair: eval.address_pair,
            rule_pair: eval.rule_pair,
            range_start: eval.range_start,
            elapsed: start.elapsed(),
        }
    }
}

impl From<&str> for AddressRule {
    fn from(text: &str) -> Self {
        AddressRule::new(text)
    }
}

impl fmt::Display for AddressRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of [`AddressRule::explain`].
#[derive(Debug, Clone)]
pub struct MatchDetails {
    pub matched: bool,
    /// Why the address did or did not match.
    pub verdict: Verdict,
    /// Index of the address token the rule was aligned on, if alignment ran
    /// and found one.
    pub anchor: Option<usize>,
    /// Trailing number pair of the address.
    pub address_pair: NumberPair,
    /// Trailing number pair of the rule (the range end for `Through`).
    pub rule_pair: NumberPair,
    /// Range start, present only for `Through` rules.
    pub range_start: Option<NumberPair>,
    /// Time spent evaluating.
    pub elapsed: Duration,
}
