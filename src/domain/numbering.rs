//! Period-scoped display numbers such as `ORD-202506-003`.
//!
//! A number is `<PREFIX>-<YYYYMM>-<NNN>`. Orders and bills draw from
//! independent sequences, and each sequence restarts at `001` when the
//! calendar month changes. The next number is always derived from what has
//! already been persisted, so nothing here holds state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Order,
    Billing,
}

impl NumberKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            NumberKind::Order => "ORD",
            NumberKind::Billing => "BIL",
        }
    }

    /// Key of the transaction-scoped advisory lock that serialises number
    /// generation for this kind.
    pub fn lock_key(&self) -> i64 {
        match self {
            NumberKind::Order => 0x4f52_4400,
            NumberKind::Billing => 0x4249_4c00,
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ORD" => Some(NumberKind::Order),
            "BIL" => Some(NumberKind::Billing),
            _ => None,
        }
    }
}

/// A calendar month, rendered as `YYYYMM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(DomainError::InvalidInput(format!(
                "invalid period {year}-{month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    #[cfg(test)]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidInput(format!("invalid period token '{s}'"));
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = s[..4].parse().map_err(|_| invalid())?;
        let month = s[4..].parse().map_err(|_| invalid())?;
        Period::new(year, month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayNumber {
    pub kind: NumberKind,
    pub period: Period,
    pub sequence: u32,
}

impl DisplayNumber {
    /// The number following `last` in `period`. `last` is 0 when the period
    /// has no numbers yet.
    pub fn following(kind: NumberKind, period: Period, last: u32) -> Self {
        Self {
            kind,
            period,
            sequence: last + 1,
        }
    }

    /// `LIKE` pattern matching every number of `kind` issued in `period`.
    pub fn period_pattern(kind: NumberKind, period: Period) -> String {
        format!("{}-{}-%", kind.prefix(), period)
    }
}

impl fmt::Display for DisplayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:03}", self.kind.prefix(), self.period, self.sequence)
    }
}

impl FromStr for DisplayNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidInput(format!("invalid display number '{s}'"));
        let mut parts = s.splitn(3, '-');
        let (Some(prefix), Some(period), Some(seq)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let kind = NumberKind::from_prefix(prefix).ok_or_else(invalid)?;
        let period = period.parse().map_err(|_| invalid())?;
        if seq.len() < 3 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u32 = seq.parse().map_err(|_| invalid())?;
        if sequence == 0 {
            return Err(invalid());
        }
        Ok(Self {
            kind,
            period,
            sequence,
        })
    }
}

/// Highest sequence among `numbers` that belong to `kind` and `period`, or 0.
///
/// Numbers of other kinds, other periods, or that do not parse are ignored.
pub fn last_sequence<'a>(
    numbers: impl IntoIterator<Item = &'a str>,
    kind: NumberKind,
    period: Period,
) -> u32 {
    numbers
        .into_iter()
        .filter_map(|n| n.parse::<DisplayNumber>().ok())
        .filter(|n| n.kind == kind && n.period == period)
        .map(|n| n.sequence)
        .max()
        .unwrap_or(0)
}
