// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sprint duration and working-day calculation.
//!
//! All functions here are total: any combination of present, absent or
//! inverted dates yields a value. An inverted range is a validation concern,
//! not a calculation failure.

use crate::policy::FALLBACK_WORKING_DAYS;
use crate::types::SprintParameters;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// Sprint-level day counts for one set of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintDuration {
    /// Calendar days in the window, both endpoints included.
    pub calendar_days: u32,
    /// Calendar days minus holidays, never negative.
    pub working_days: u32,
    /// Holidays subtracted (negative input counts as zero).
    pub holidays: u32,
    /// Whether the counts come from the fallback rather than real dates.
    pub is_fallback: bool,
}

/// Counts calendar days from `from_date` to `to_date`, inclusive of both.
///
/// Returns zero or a negative count when `to_date` precedes `from_date`.
#[must_use]
pub fn calendar_days_between(from_date: Date, to_date: Date) -> i64 {
    (to_date - from_date).whole_days() + 1
}

/// Computes calendar and working days for the sprint.
///
/// When either date is missing the calendar span is
/// [`FALLBACK_WORKING_DAYS`] and `is_fallback` is set; the fallback never
/// accompanies a real date range.
#[must_use]
pub fn sprint_duration(params: &SprintParameters) -> SprintDuration {
    let holidays: u32 = u32::try_from(params.holiday_count).unwrap_or(0);

    let (calendar_days, is_fallback): (u32, bool) = match (params.from_date, params.to_date) {
        (Some(from_date), Some(to_date)) => {
            let days: i64 = calendar_days_between(from_date, to_date).max(0);
            (u32::try_from(days).unwrap_or(u32::MAX), false)
        }
        _ => (FALLBACK_WORKING_DAYS, true),
    };

    SprintDuration {
        calendar_days,
        working_days: calendar_days.saturating_sub(holidays),
        holidays,
        is_fallback,
    }
}

/// Working days available in the sprint: calendar days minus holidays.
#[must_use]
pub fn working_days(params: &SprintParameters) -> u32 {
    sprint_duration(params).working_days
}

/// Parses a sprint date leniently.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a `T` or space and a time
/// part, which is ignored. Anything else yields `None`, so callers drop to
/// the fallback duration instead of failing.
#[must_use]
pub fn parse_sprint_date(text: &str) -> Option<Date> {
    let trimmed: &str = text.trim();
    let date_part: &str = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}
