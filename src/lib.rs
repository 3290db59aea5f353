use bitflags::bitflags;
use std::fmt;

#[macro_use]
mod macros;
mod api;
mod engine;

pub use api::{Address, AddressRule, MatchDetails};
pub use engine::{Verdict, extract_qualifiers, normalize, tokenize};

// --- Token model ------------------------------------------------------------

/// Classifier character that terminates an address segment.
///
/// The set is closed: these are the only characters the tokenizer treats as
/// segment boundaries (besides commas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// 縣
    County,
    /// 市
    City,
    /// 鄉
    Township,
    /// 鎮
    Town,
    /// 區
    District,
    /// 村
    Village,
    /// 里
    Neighborhood,
    /// 路
    Road,
    /// 段
    Section,
    /// 街
    Street,
    /// 巷
    Lane,
    /// 弄
    Alley,
    /// 號
    Number,
    /// 樓
    Floor,
}

impl Unit {
    pub const ALL: [Unit; 14] = [
        Unit::County,
        Unit::City,
        Unit::Township,
        Unit::Town,
        Unit::District,
        Unit::Village,
        Unit::Neighborhood,
        Unit::Road,
        Unit::Section,
        Unit::Street,
        Unit::Lane,
        Unit::Alley,
        Unit::Number,
        Unit::Floor,
    ];

    pub fn from_char(ch: char) -> Option<Unit> {
        Unit::ALL.into_iter().find(|unit| unit.as_char() == ch)
    }

    pub fn as_char(self) -> char {
        match self {
            Unit::County => '縣',
            Unit::City => '市',
            Unit::Township => '鄉',
            Unit::Town => '鎮',
            Unit::District => '區',
            Unit::Village => '村',
            Unit::Neighborhood => '里',
            Unit::Road => '路',
            Unit::Section => '段',
            Unit::Street => '街',
            Unit::Lane => '巷',
            Unit::Alley => '弄',
            Unit::Number => '號',
            Unit::Floor => '樓',
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The payload of a token: either a (sub-)numbered segment or a name, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Number { number: u64, sub_number: Option<u64> },
    Name(String),
}

/// One delimited piece of an address, e.g. `中山` + 路 or `10之2` + 號.
///
/// `unit` is `None` when the segment was terminated by a comma.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub segment: Segment,
    pub unit: Option<Unit>,
}

impl Token {
    pub fn number(&self) -> Option<u64> {
        match self.segment {
            Segment::Number { number, .. } => Some(number),
            Segment::Name(_) => None,
        }
    }

    pub fn sub_number(&self) -> Option<u64> {
        match self.segment {
            Segment::Number { sub_number, .. } => sub_number,
            Segment::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.segment {
            Segment::Name(name) => Some(name),
            Segment::Number { .. } => None,
        }
    }

    /// Numeric value of this token with missing parts read as zero.
    pub fn number_pair(&self) -> NumberPair {
        NumberPair { number: self.number().unwrap_or(0), sub_number: self.sub_number().unwrap_or(0) }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.segment {
            Segment::Number { number, sub_number: Some(sub) } => write!(f, "{number}之{sub}")?,
            Segment::Number { number, sub_number: None } => write!(f, "{number}")?,
            Segment::Name(name) => f.write_str(name)?,
        }
        match self.unit {
            Some(unit) => write!(f, "{unit}"),
            None => f.write_str(","),
        }
    }
}

/// `(number, sub_number)` of a token. Ordering is lexicographic, so `10之2`
/// sorts strictly between `10` and `11`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumberPair {
    pub number: u64,
    pub sub_number: u64,
}

impl NumberPair {
    pub const fn new(number: u64, sub_number: u64) -> Self {
        Self { number, sub_number }
    }
}

impl From<(u64, u64)> for NumberPair {
    fn from((number, sub_number): (u64, u64)) -> Self {
        Self { number, sub_number }
    }
}

impl fmt::Display for NumberPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sub_number > 0 { write!(f, "{}之{}", self.number, self.sub_number) } else { write!(f, "{}", self.number) }
    }
}

// --- Rule qualifiers ----------------------------------------------------------

/// Range/parity constraint carried by a delivery rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// 含附號 / 含附號全: the rule number itself, any sub-number.
    ExactNumber,
    /// 以上
    AndAbove,
    /// 以下
    AndBelow,
    /// 至 / 連 followed by the end of the range.
    Through,
    /// 單
    Odd,
    /// 雙
    Even,
    /// 及以上附號
    IncludingSubnumbersAndAbove,
    /// 含附號以下
    IncludingSubnumbersAndBelow,
    /// 附號全: sub-numbered addresses only.
    IncludingAllSubnumbers,
    /// 全
    FullRange,
}

impl Qualifier {
    pub fn flag(self) -> QualifierSet {
        match self {
            Qualifier::ExactNumber => QualifierSet::EXACT_NUMBER,
            Qualifier::AndAbove => QualifierSet::AND_ABOVE,
            Qualifier::AndBelow => QualifierSet::AND_BELOW,
            Qualifier::Through => QualifierSet::THROUGH,
            Qualifier::Odd => QualifierSet::ODD,
            Qualifier::Even => QualifierSet::EVEN,
            Qualifier::IncludingSubnumbersAndAbove => QualifierSet::INCLUDING_SUBNUMBERS_AND_ABOVE,
            Qualifier::IncludingSubnumbersAndBelow => QualifierSet::INCLUDING_SUBNUMBERS_AND_BELOW,
            Qualifier::IncludingAllSubnumbers => QualifierSet::INCLUDING_ALL_SUBNUMBERS,
            Qualifier::FullRange => QualifierSet::FULL_RANGE,
        }
    }
}

bitflags! {
    /// Summary of the qualifiers a rule carries, independent of their order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct QualifierSet: u16 {
        const EXACT_NUMBER                   = 1 << 0;
        const AND_ABOVE                      = 1 << 1;
        const AND_BELOW                      = 1 << 2;
        const THROUGH                        = 1 << 3;
        const ODD                            = 1 << 4;
        const EVEN                           = 1 << 5;
        const INCLUDING_SUBNUMBERS_AND_ABOVE = 1 << 6;
        const INCLUDING_SUBNUMBERS_AND_BELOW = 1 << 7;
        const INCLUDING_ALL_SUBNUMBERS       = 1 << 8;
        const FULL_RANGE                     = 1 << 9;

        const ANY_ABOVE = Self::AND_ABOVE.bits() | Self::INCLUDING_SUBNUMBERS_AND_ABOVE.bits();
        const ANY_BELOW = Self::AND_BELOW.bits() | Self::INCLUDING_SUBNUMBERS_AND_BELOW.bits();
    }
}

impl FromIterator<Qualifier> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        iter.into_iter().fold(QualifierSet::empty(), |set, q| set | q.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_chars_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_char(unit.as_char()), Some(unit));
        }
        assert_eq!(Unit::from_char('中'), None);
    }

    #[test]
    fn number_pairs_order_sub_numbers_between_numbers() {
        let ten = NumberPair::new(10, 0);
        let ten_two = NumberPair::new(10, 2);
        let eleven = NumberPair::new(11, 0);
        assert!(ten < ten_two && ten_two < eleven);
        assert_eq!(ten_two.to_string(), "10之2");
        assert_eq!(eleven.to_string(), "11");
    }

    #[test]
    fn token_display_uses_unit_or_comma() {
        let road = Token { segment: Segment::Name("中山".to_string()), unit: Some(Unit::Road) };
        let no = Token { segment: Segment::Number { number: 10, sub_number: Some(3) }, unit: Some(Unit::Number) };
        let bare = Token { segment: Segment::Name("後棟".to_string()), unit: None };
        assert_eq!(road.to_string(), "中山路");
        assert_eq!(no.to_string(), "10之3號");
        assert_eq!(bare.to_string(), "後棟,");
        assert_eq!(road.number_pair(), NumberPair::default());
        assert_eq!(no.number_pair(), NumberPair::new(10, 3));
    }

    #[test]
    fn qualifier_set_collects_flags() {
        let set: QualifierSet = [Qualifier::Odd, Qualifier::IncludingSubnumbersAndAbove].into_iter().collect();
        assert!(set.contains(QualifierSet::ODD));
        assert!(set.intersects(QualifierSet::ANY_ABOVE));
        assert!(!set.intersects(QualifierSet::ANY_BELOW));
    }
}
