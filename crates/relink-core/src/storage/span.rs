//! Signed duration used for validated intervals and their text form.
//!
//! `std::time::Duration` cannot hold a negative value, but a negative
//! interval must still be representable so it can be rejected (from a
//! setter or from a corrupt settings file). Text form is a sequence of
//! `<integer><unit>` groups, e.g. `10s`, `1m30s`, `250ms`, `-5s`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::PolicyError;

const UNITS: [(&str, i128); 6] = [
    ("h", 3_600_000_000_000),
    ("m", 60_000_000_000),
    ("s", 1_000_000_000),
    ("ms", 1_000_000),
    ("us", 1_000),
    ("ns", 1),
];

/// Signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    nanos: i64,
}

impl Span {
    pub const ZERO: Span = Span { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            nanos: secs.saturating_mul(1_000_000_000),
        }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }

    /// Convert to a std duration; `None` when negative.
    pub fn to_std(self) -> Option<Duration> {
        u64::try_from(self.nanos).ok().map(Duration::from_nanos)
    }
}

/// Durations beyond ~292 years saturate at `i64::MAX` nanoseconds.
impl From<Duration> for Span {
    fn from(d: Duration) -> Self {
        Self {
            nanos: i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return write!(f, "0s");
        }
        if self.nanos < 0 {
            write!(f, "-")?;
        }
        let mut rem = i128::from(self.nanos).abs();
        for (suffix, unit) in UNITS {
            let q = rem / unit;
            if q > 0 {
                write!(f, "{q}{suffix}")?;
                rem %= unit;
            }
        }
        Ok(())
    }
}

impl FromStr for Span {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PolicyError::InvalidSpan(s.to_string());
        let text = s.trim();
        let (negative, mut rest) = match text.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, text),
        };
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut total: i128 = 0;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(invalid());
            }
            let value: i128 = rest[..digits].parse().map_err(|_| invalid())?;
            rest = &rest[digits..];

            let unit_len = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            let unit = UNITS
                .iter()
                .find(|(suffix, _)| *suffix == &rest[..unit_len])
                .map(|(_, nanos)| *nanos)
                .ok_or_else(invalid)?;
            rest = &rest[unit_len..];

            total = value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(invalid)?;
        }

        let signed = if negative { -total } else { total };
        let nanos = i64::try_from(signed).map_err(|_| invalid())?;
        Ok(Span { nanos })
    }
}
