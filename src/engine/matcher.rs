//! Rule matching.
//!
//! A rule such as `中山路 單 3號以上` is tested against an address in two
//! steps:
//!
//! 1. **Context alignment.** The rule's first unit (路 here) is the *anchor*.
//!    The first address token carrying that unit is aligned with the rule's
//!    first token, and every rule token except the numeric target(s) must be
//!    equal to the address token at the same offset:
//!
//!    ```text
//!    rule     [中山 路] [3 號]              (Through keeps two targets)
//!    address  [臺北 市] [中山 路] [7 號]
//!                       ^ anchor
//!    ```
//!
//! 2. **Numeric checks.** Without qualifiers the trailing number pairs must be
//!    equal. Otherwise every qualifier is checked against the same address
//!    pair and all of them must hold.
//!
//! Comparisons of number pairs are lexicographic (`10 < 10之2 < 11`).

use crate::{Address, AddressRule, NumberPair, Qualifier, QualifierSet, Unit};
use std::fmt;

/// Outcome of evaluating one rule against one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The address is inside the rule's delivery range.
    Match,
    /// The rule has neither tokens nor qualifiers.
    EmptyRule,
    /// No address token carries the rule's first unit.
    AnchorMissing { unit: Option<Unit> },
    /// The address ends before the rule's fixed context does.
    AddressTooShort { needed: usize, available: usize },
    /// The address token at `position` differs from the rule's context.
    ContextMismatch { position: usize },
    /// Qualifier-free rule whose number differs from the address number.
    NumberMismatch,
    /// The named qualifier does not hold for the address number.
    QualifierRejected(Qualifier),
}

impl Verdict {
    pub fn is_match(self) -> bool {
        self == Verdict::Match
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Match => f.write_str("match"),
            Verdict::EmptyRule => f.write_str("empty rule"),
            Verdict::AnchorMissing { unit: Some(unit) } => write!(f, "no '{unit}' token in address"),
            Verdict::AnchorMissing { unit: None } => f.write_str("no comma-delimited token in address"),
            Verdict::AddressTooShort { needed, available } => {
                write!(f, "address too short ({available} of {needed} context tokens)")
            }
            Verdict::ContextMismatch { position } => write!(f, "context differs at token {position}"),
            Verdict::NumberMismatch => f.write_str("number differs"),
            Verdict::QualifierRejected(q) => write!(f, "rejected by {q:?}"),
        }
    }
}

/// Everything the evaluation looked at, for callers that want more than a bool.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Evaluation {
    pub verdict: Verdict,
    pub anchor: Option<usize>,
    pub address_pair: NumberPair,
    pub rule_pair: NumberPair,
    pub range_start: Option<NumberPair>,
}

pub(crate) fn evaluate(rule: &AddressRule, address: &Address) -> Evaluation {
    let through = rule.flags().contains(QualifierSet::THROUGH);
    let mut eval = Evaluation {
        verdict: Verdict::Match,
        anchor: None,
        address_pair: address.trailing_number_pair(),
        rule_pair: rule.trailing_number_pair(),
        range_start: through.then(|| rule.number_pair(-2)),
    };
    eval.verdict = judge(rule, address, &mut eval);

    tracing::trace!(
        rule = rule.as_str(),
        address = address.as_str(),
        anchor = ?eval.anchor,
        verdict = %eval.verdict,
        "rule evaluated"
    );

    eval
}

fn judge(rule: &AddressRule, address: &Address, eval: &mut Evaluation) -> Verdict {
    let rule_tokens = rule.tokens();
    let qualifiers = rule.qualifiers();

    if rule_tokens.is_empty() && qualifiers.is_empty() {
        return Verdict::EmptyRule;
    }

    if let Some(first) = rule_tokens.first() {
        let Some(anchor) = address.tokens().iter().position(|t| t.unit == first.unit) else {
            return Verdict::AnchorMissing { unit: first.unit };
        };
        eval.anchor = Some(anchor);

        let targets = if rule.flags().contains(QualifierSet::THROUGH) { 2 } else { 1 };
        let context = &rule_tokens[..rule_tokens.len().saturating_sub(targets)];
        let candidate = &address.tokens()[anchor..];

        if candidate.len() < context.len() {
            return Verdict::AddressTooShort { needed: context.len(), available: candidate.len() };
        }
        if let Some(offset) = context.iter().zip(candidate).position(|(mine, his)| mine != his) {
            return Verdict::ContextMismatch { position: anchor + offset };
        }
    }

    if qualifiers.is_empty() {
        return if eval.address_pair == eval.rule_pair { Verdict::Match } else { Verdict::NumberMismatch };
    }

    for &qualifier in qualifiers {
        if !admits(qualifier, eval) {
            return Verdict::QualifierRejected(qualifier);
        }
    }

    Verdict::Match
}

fn admits(qualifier: Qualifier, eval: &Evaluation) -> bool {
    let his = eval.address_pair;
    let mine = eval.rule_pair;

    match qualifier {
        Qualifier::Odd => his.number % 2 == 1,
        Qualifier::Even => his.number % 2 == 0,
        Qualifier::AndAbove | Qualifier::IncludingSubnumbersAndAbove => his >= mine,
        Qualifier::AndBelow | Qualifier::IncludingSubnumbersAndBelow => his <= mine,
        Qualifier::Through => {
            let start = eval.range_start.unwrap_or_default();
            start <= his && his <= mine
        }
        Qualifier::IncludingAllSubnumbers => his.sub_number > 0,
        Qualifier::ExactNumber => his.number == mine.number,
        Qualifier::FullRange => true,
    }
}
