// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::policy::{DEFAULT_CAPACITY_PERCENTAGE, DEFAULT_DAILY_HOURS};
use crate::row_capacity::{DerivedFields, compute_row};
use serde::{Deserialize, Serialize};
use time::Date;

/// Identifies a team member in the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(i64);

impl MemberId {
    /// Creates a new `MemberId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member as returned by the team directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// The member's directory identifier.
    pub member_id: MemberId,
    /// The member's display name.
    pub display_name: String,
}

impl TeamMember {
    /// Creates a new `TeamMember`.
    #[must_use]
    pub fn new(member_id: MemberId, display_name: &str) -> Self {
        Self {
            member_id,
            display_name: display_name.to_string(),
        }
    }
}

/// Descriptive sprint fields that do not feed any capacity calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SprintDetails {
    /// The sprint name.
    pub name: String,
    /// The selected team. `None` until a team is chosen.
    pub team_id: Option<i64>,
    /// Story points committed for the sprint.
    pub sprint_point: i32,
    /// Free-text remark.
    pub details_remark: Option<String>,
    /// The operator creating the sprint.
    pub created_by: Option<String>,
}

/// The calendar window and sprint-wide defaults every row is computed against.
///
/// Dates are optional while a plan is being entered; calculations fall back
/// to [`crate::FALLBACK_WORKING_DAYS`] until both are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprintParameters {
    /// First day of the sprint (inclusive).
    pub from_date: Option<Date>,
    /// Last day of the sprint (inclusive).
    pub to_date: Option<Date>,
    /// Number of holidays inside the window.
    pub holiday_count: i32,
    /// Hours per day for rows without their own override.
    pub default_daily_hours: f64,
}

impl SprintParameters {
    /// Creates sprint parameters.
    ///
    /// # Arguments
    ///
    /// * `from_date` - First day of the sprint, if chosen
    /// * `to_date` - Last day of the sprint, if chosen
    /// * `holiday_count` - Holidays inside the window
    /// * `default_daily_hours` - Fallback hours per day for member rows
    #[must_use]
    pub const fn new(
        from_date: Option<Date>,
        to_date: Option<Date>,
        holiday_count: i32,
        default_daily_hours: f64,
    ) -> Self {
        Self {
            from_date,
            to_date,
            holiday_count,
            default_daily_hours,
        }
    }
}

impl Default for SprintParameters {
    fn default() -> Self {
        Self::new(None, None, 0, DEFAULT_DAILY_HOURS)
    }
}

/// One team member's participation in a sprint.
///
/// The input fields are plain data. The derived figures are only ever
/// produced by [`MemberCapacityRow::recompute`]; there is no way to set them
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCapacityRow {
    /// The member's directory identifier. `None` for a row whose member has
    /// not been picked yet.
    pub member_id: Option<MemberId>,
    /// The member's display name.
    pub display_name: String,
    /// Share of normal availability given to this sprint, in percent.
    pub capacity_percentage: f64,
    /// Days the member is unavailable inside the sprint window.
    pub leave_days: i32,
    /// Per-member override of the sprint's default daily hours.
    pub daily_working_hours: Option<f64>,
    /// Hours of work assigned to the member.
    pub allocated_hours: f64,
    /// Free-text notes stored with the row.
    pub notes: Option<String>,
    derived: DerivedFields,
}

impl MemberCapacityRow {
    /// Creates a row with full capacity, no leave and no allocation.
    ///
    /// Derived fields start zeroed; they become meaningful after the first
    /// [`recompute`](Self::recompute).
    #[must_use]
    pub fn new(member_id: Option<MemberId>, display_name: &str) -> Self {
        Self {
            member_id,
            display_name: display_name.to_string(),
            capacity_percentage: DEFAULT_CAPACITY_PERCENTAGE,
            leave_days: 0,
            daily_working_hours: None,
            allocated_hours: 0.0,
            notes: None,
            derived: DerivedFields::default(),
        }
    }

    /// Creates a row for a directory member.
    #[must_use]
    pub fn for_member(member: &TeamMember) -> Self {
        Self::new(Some(member.member_id), &member.display_name)
    }

    /// Sets the capacity percentage.
    #[must_use]
    pub const fn with_capacity_percentage(mut self, capacity_percentage: f64) -> Self {
        self.capacity_percentage = capacity_percentage;
        self
    }

    /// Sets the leave days.
    #[must_use]
    pub const fn with_leave_days(mut self, leave_days: i32) -> Self {
        self.leave_days = leave_days;
        self
    }

    /// Sets the per-member daily hours override.
    #[must_use]
    pub const fn with_daily_working_hours(mut self, daily_working_hours: Option<f64>) -> Self {
        self.daily_working_hours = daily_working_hours;
        self
    }

    /// Sets the allocated hours.
    #[must_use]
    pub const fn with_allocated_hours(mut self, allocated_hours: f64) -> Self {
        self.allocated_hours = allocated_hours;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Returns the figures derived at the last recomputation.
    #[must_use]
    pub const fn derived(&self) -> &DerivedFields {
        &self.derived
    }

    /// Recomputes the derived figures from the current inputs.
    ///
    /// Calling this repeatedly with the same arguments yields identical
    /// derived fields.
    ///
    /// # Arguments
    ///
    /// * `working_days` - Sprint working days (after holidays)
    /// * `default_daily_hours` - The sprint's default daily hours
    pub fn recompute(&mut self, working_days: u32, default_daily_hours: f64) {
        self.derived = compute_row(self, working_days, default_daily_hours);
    }

    /// Leave days as used by the arithmetic. Negative input counts as zero.
    #[must_use]
    pub fn effective_leave_days(&self) -> u32 {
        u32::try_from(self.leave_days).unwrap_or(0)
    }
}
