//! Time-of-day range used by session windows.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::PolicyError;

const SECS_PER_DAY: u32 = 86_400;

/// Half-open `[start, end)` time-of-day range with second resolution.
///
/// A range whose start is after its end wraps midnight (`22:00-06:00`).
/// Equal start and end cover the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: u32,
    end: u32,
}

impl TimeRange {
    /// Build a range from offsets since midnight; both must be under 24h.
    pub fn new(start: Duration, end: Duration) -> Result<Self, PolicyError> {
        let to_secs = |d: Duration| {
            u32::try_from(d.as_secs())
                .ok()
                .filter(|s| *s < SECS_PER_DAY)
                .ok_or_else(|| PolicyError::InvalidTimeRange(format!("{d:?}")))
        };
        Ok(Self {
            start: to_secs(start)?,
            end: to_secs(end)?,
        })
    }

    pub fn start(&self) -> Duration {
        Duration::from_secs(u64::from(self.start))
    }

    pub fn end(&self) -> Duration {
        Duration::from_secs(u64::from(self.end))
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Whether `time_of_day` (offset since midnight) falls in the range.
    /// Offsets of a day or more are reduced modulo 24h.
    pub fn contains(&self, time_of_day: Duration) -> bool {
        let t = (time_of_day.as_secs() % u64::from(SECS_PER_DAY)) as u32;
        match self.start.cmp(&self.end) {
            std::cmp::Ordering::Less => t >= self.start && t < self.end,
            std::cmp::Ordering::Greater => t >= self.start || t < self.end,
            std::cmp::Ordering::Equal => true,
        }
    }
}

fn parse_clock(text: &str) -> Option<u32> {
    let mut parts = text.trim().split(':');
    let mut field = |max: u32| -> Option<u32> {
        let p = parts.next()?;
        if p.is_empty() || p.len() > 2 || !p.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        p.parse().ok().filter(|v| *v <= max)
    };
    let h = field(23)?;
    let m = field(59)?;
    let s = match parts.next() {
        None => 0,
        Some(p) if p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit()) => {
            p.parse().ok().filter(|v: &u32| *v <= 59)?
        }
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(h * 3_600 + m * 60 + s)
}

fn fmt_clock(f: &mut fmt::Formatter<'_>, secs: u32) -> fmt::Result {
    let (h, m, s) = (secs / 3_600, secs / 60 % 60, secs % 60);
    if s == 0 {
        write!(f, "{h:02}:{m:02}")
    } else {
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_clock(f, self.start)?;
        write!(f, "-")?;
        fmt_clock(f, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PolicyError::InvalidTimeRange(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            start: parse_clock(start).ok_or_else(invalid)?,
            end: parse_clock(end).ok_or_else(invalid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u64, m: u64) -> Duration {
        Duration::from_secs(h * 3_600 + m * 60)
    }

    #[test]
    fn parse_and_display() {
        let r: TimeRange = "09:00-17:30".parse().unwrap();
        assert_eq!(r.start(), at(9, 0));
        assert_eq!(r.end(), at(17, 30));
        assert_eq!(r.to_string(), "09:00-17:30");

        let r: TimeRange = "9:05:30 - 10:00".parse().unwrap();
        assert_eq!(r.to_string(), "09:05:30-10:00");
    }

    #[test]
    fn rejects_bad_clock_text() {
        for bad in ["", "09:00", "24:00-10:00", "09:60-10:00", "09-10", "09:00:5-10:00", "a:b-c:d"] {
            assert!(bad.parse::<TimeRange>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn contains_plain_and_wrapping() {
        let day: TimeRange = "10:00-18:45".parse().unwrap();
        assert!(day.contains(at(10, 0)));
        assert!(day.contains(at(18, 44)));
        assert!(!day.contains(at(18, 45)));
        assert!(!day.contains(at(9, 59)));

        let night: TimeRange = "22:00-06:00".parse().unwrap();
        assert!(night.wraps_midnight());
        assert!(night.contains(at(23, 0)));
        assert!(night.contains(at(5, 59)));
        assert!(!night.contains(at(12, 0)));
        assert!(night.contains(at(24 + 23, 0)));
    }

    #[test]
    fn new_rejects_full_day_offsets() {
        assert!(TimeRange::new(at(0, 0), at(24, 0)).is_err());
        let r = TimeRange::new(at(8, 0), at(8, 0)).unwrap();
        assert!(r.contains(at(3, 0)));
    }
}
