//! Daily completion inference for streak-style counters.
//!
//! A streak grows by exactly one per completed day. If it grew by at least as
//! many units as days elapsed since the reference observation, the most recent
//! day was completed.

use chrono::NaiveDate;

/// Breakdown of one completion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCheck {
    pub days_elapsed: i64,
    pub delta: i64,
    pub completed: bool,
}

/// Whole calendar days between both dates, in either direction.
///
/// A reference date in the future is counted as if it were in the past.
pub fn days_elapsed(last: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(last).num_days().abs()
}

pub fn check(current: u32, last: u32, last_date: NaiveDate, today: NaiveDate) -> StreakCheck {
    let days_elapsed = days_elapsed(last_date, today);
    let delta = i64::from(current) - i64::from(last);
    StreakCheck {
        days_elapsed,
        delta,
        completed: delta >= days_elapsed,
    }
}

pub fn is_completed(current: u32, last: u32, last_date: NaiveDate, today: NaiveDate) -> bool {
    check(current, last, last_date, today).completed
}
