use crate::error::{Result, ShipboardError};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a stored target date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Timestamps are truncated to
/// the calendar date in their own offset, so `2025-01-10T23:30:00-05:00` is
/// the 10th.
pub fn parse_target_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ShipboardError::InvalidInput("target date is empty".to_string()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| ShipboardError::InvalidInput(format!("unparseable target date '{raw}'")))
}

/// Whole calendar days from `today` to `target`. Negative when overdue.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

// ---------------------------------------------------------------------------
// DateLabel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabel {
    ReleaseDate,
    TargetDate,
}

impl DateLabel {
    /// Dates already behind us read as when it shipped; the rest as a target.
    pub fn for_date(target: NaiveDate, today: NaiveDate) -> Self {
        if target < today {
            DateLabel::ReleaseDate
        } else {
            DateLabel::TargetDate
        }
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::ReleaseDate => f.write_str("Release Date"),
            DateLabel::TargetDate => f.write_str("Target Date"),
        }
    }
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Urgent,
}

impl Urgency {
    pub fn from_days(days_remaining: i64, due_soon_days: i64) -> Self {
        if days_remaining < due_soon_days {
            Urgency::Urgent
        } else {
            Urgency::Normal
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => f.write_str("normal"),
            Urgency::Urgent => f.write_str("urgent"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_target_date("2025-01-10").unwrap(), date(2025, 1, 10));
        assert_eq!(parse_target_date("  2025-01-10\n").unwrap(), date(2025, 1, 10));
    }

    #[test]
    fn parses_timestamp_to_its_calendar_day() {
        assert_eq!(
            parse_target_date("2025-01-10T23:30:00-05:00").unwrap(),
            date(2025, 1, 10)
        );
        assert_eq!(
            parse_target_date("2025-01-10T00:00:00Z").unwrap(),
            date(2025, 1, 10)
        );
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "tomorrow", "2025-13-01", "10/01/2025"] {
            assert!(
                matches!(parse_target_date(raw), Err(ShipboardError::InvalidInput(_))),
                "expected InvalidInput for {raw:?}"
            );
        }
    }

    #[test]
    fn days_until_counts_calendar_days() {
        let today = date(2025, 1, 15);
        assert_eq!(days_until(date(2025, 1, 20), today), 5);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(date(2025, 1, 10), today), -5);
        assert_eq!(days_until(date(2025, 2, 1), date(2025, 1, 31)), 1);
    }

    #[test]
    fn date_label_flips_after_target() {
        let today = date(2025, 1, 15);
        assert_eq!(DateLabel::for_date(date(2025, 1, 14), today), DateLabel::ReleaseDate);
        assert_eq!(DateLabel::for_date(today, today), DateLabel::TargetDate);
        assert_eq!(DateLabel::ReleaseDate.to_string(), "Release Date");
    }

    #[test]
    fn urgency_threshold_is_exclusive() {
        assert_eq!(Urgency::from_days(2, 3), Urgency::Urgent);
        assert_eq!(Urgency::from_days(3, 3), Urgency::Normal);
        assert_eq!(Urgency::from_days(-1, 3), Urgency::Urgent);
    }
}
