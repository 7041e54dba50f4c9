//! Day-index resolver
//!
//! Counts whole days elapsed since the puzzle's start date (taken as UTC
//! midnight). The count selects today's answer from the dictionary.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Error raised for an unusable start date
#[derive(Debug, thiserror::Error)]
pub enum DayError {
    #[error("invalid start date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidStartDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Resolves the current time to a day offset from a fixed epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayResolver {
    epoch: DateTime<Utc>,
}

impl DayResolver {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            epoch: start_date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Parse a `YYYY-MM-DD` start date
    pub fn parse(start_date: &str) -> Result<Self, DayError> {
        NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d")
            .map(Self::new)
            .map_err(|source| DayError::InvalidStartDate {
                value: start_date.to_string(),
                source,
            })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.epoch.date_naive()
    }

    /// Whole days elapsed between the epoch and `now`, floored.
    ///
    /// Returns `None` when `now` is before the epoch.
    pub fn day_index(&self, now: DateTime<Utc>) -> Option<usize> {
        let elapsed = (now - self.epoch).num_seconds();
        if elapsed < 0 {
            return None;
        }
        usize::try_from(elapsed.div_euclid(SECONDS_PER_DAY)).ok()
    }

    /// Day index for the current wall-clock time
    pub fn today(&self) -> Option<usize> {
        self.day_index(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn resolver() -> DayResolver {
        DayResolver::parse("2022-05-21").unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(resolver().day_index(at(2022, 5, 21, 0, 0, 0)), Some(0));
        assert_eq!(resolver().day_index(at(2022, 5, 21, 23, 59, 59)), Some(0));
    }

    #[test]
    fn test_next_day_starts_at_midnight_utc() {
        assert_eq!(resolver().day_index(at(2022, 5, 22, 0, 0, 0)), Some(1));
        assert_eq!(resolver().day_index(at(2023, 5, 21, 12, 0, 0)), Some(365));
    }

    #[test]
    fn test_stable_within_same_day() {
        let r = resolver();
        let morning = r.day_index(at(2024, 2, 29, 0, 0, 1));
        let evening = r.day_index(at(2024, 2, 29, 23, 59, 59));
        assert!(morning.is_some());
        assert_eq!(morning, evening);
    }

    #[test]
    fn test_before_epoch_has_no_index() {
        assert_eq!(resolver().day_index(at(2022, 5, 20, 23, 59, 59)), None);
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        assert!(DayResolver::parse("2022-13-01").is_err());
        assert!(DayResolver::parse("May 21st").is_err());
        assert_eq!(
            resolver().start_date(),
            NaiveDate::from_ymd_opt(2022, 5, 21).unwrap()
        );
    }
}
