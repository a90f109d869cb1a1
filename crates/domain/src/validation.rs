// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::policy::{
    MAX_CAPACITY_PERCENTAGE, MAX_DAILY_WORKING_HOURS, MAX_REMARK_LENGTH, MAX_SPRINT_NAME_LENGTH,
    MIN_CAPACITY_PERCENTAGE, MIN_DEFAULT_DAILY_HOURS,
};
use crate::types::{MemberCapacityRow, MemberId, SprintDetails, SprintParameters};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable, machine-readable reason for a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The sprint has no name.
    SprintNameRequired,
    /// The sprint name exceeds the maximum length.
    SprintNameTooLong,
    /// The start date is missing.
    FromDateRequired,
    /// The end date is missing.
    ToDateRequired,
    /// The end date is not after the start date.
    DateRangeInvalid,
    /// No team has been selected.
    TeamRequired,
    /// The holiday count is negative.
    HolidayCountNegative,
    /// The default daily hours are outside 1..=24.
    DefaultDailyHoursOutOfRange,
    /// The sprint point commitment is negative.
    SprintPointNegative,
    /// The remark exceeds the maximum length.
    RemarkTooLong,
    /// A roster row has no member name.
    MemberNameRequired,
    /// A roster row's capacity percentage is outside 1..=100.
    CapacityPercentageOutOfRange,
    /// A roster row has negative leave days.
    LeaveDaysNegative,
    /// A roster row's daily hours are outside (0, 24].
    DailyHoursOutOfRange,
    /// A roster row has negative allocated hours.
    AllocatedHoursNegative,
    /// A member appears on more than one row.
    DuplicateMember,
}

impl ViolationCode {
    /// Returns the stable code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SprintNameRequired => "sprint_name_required",
            Self::SprintNameTooLong => "sprint_name_too_long",
            Self::FromDateRequired => "from_date_required",
            Self::ToDateRequired => "to_date_required",
            Self::DateRangeInvalid => "date_range_invalid",
            Self::TeamRequired => "team_required",
            Self::HolidayCountNegative => "holiday_count_negative",
            Self::DefaultDailyHoursOutOfRange => "default_daily_hours_out_of_range",
            Self::SprintPointNegative => "sprint_point_negative",
            Self::RemarkTooLong => "remark_too_long",
            Self::MemberNameRequired => "member_name_required",
            Self::CapacityPercentageOutOfRange => "capacity_percentage_out_of_range",
            Self::LeaveDaysNegative => "leave_days_negative",
            Self::DailyHoursOutOfRange => "daily_hours_out_of_range",
            Self::AllocatedHoursNegative => "allocated_hours_negative",
            Self::DuplicateMember => "duplicate_member",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One problem found in a sprint capacity plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Machine-readable reason.
    pub code: ViolationCode,
    /// The offending field, e.g. `toDate` or `capacityPercentage`.
    pub field: &'static str,
    /// Roster row index for row-level violations.
    pub row_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn sprint(code: ViolationCode, field: &'static str, message: String) -> Self {
        Self {
            code,
            field,
            row_index: None,
            message,
        }
    }

    fn row(code: ViolationCode, field: &'static str, row_index: usize, message: String) -> Self {
        Self {
            code,
            field,
            row_index: Some(row_index),
            message,
        }
    }
}

/// Validates a sprint capacity plan before submission.
///
/// Every rule is checked; violations are collected rather than returned on
/// the first failure. An empty result means the plan may be persisted.
/// Business-rule problems never produce an error.
///
/// # Arguments
///
/// * `details` - Sprint name, team and descriptive fields
/// * `params` - Sprint dates and defaults
/// * `rows` - The roster
#[must_use]
pub fn validate_sprint_plan(
    details: &SprintDetails,
    params: &SprintParameters,
    rows: &[MemberCapacityRow],
) -> Vec<Violation> {
    let mut violations: Vec<Violation> = Vec::new();

    validate_details(details, &mut violations);
    validate_parameters(params, &mut violations);

    let mut seen_members: HashSet<MemberId> = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        validate_row(index, row, &mut violations);

        let duplicate: Option<MemberId> = row
            .member_id
            .filter(|member_id| !seen_members.insert(*member_id));
        if let Some(member_id) = duplicate {
            violations.push(Violation::row(
                ViolationCode::DuplicateMember,
                "userId",
                index,
                format!("Member {member_id} appears more than once in the roster"),
            ));
        }
    }

    violations
}

fn validate_details(details: &SprintDetails, violations: &mut Vec<Violation>) {
    // Rule: sprint name is required and bounded
    if details.name.trim().is_empty() {
        violations.push(Violation::sprint(
            ViolationCode::SprintNameRequired,
            "sprintName",
            String::from("Sprint name is required"),
        ));
    } else if details.name.chars().count() > MAX_SPRINT_NAME_LENGTH {
        violations.push(Violation::sprint(
            ViolationCode::SprintNameTooLong,
            "sprintName",
            format!("Sprint name must be at most {MAX_SPRINT_NAME_LENGTH} characters"),
        ));
    }

    // Rule: a team must be selected
    if details.team_id.is_none_or(|team_id| team_id <= 0) {
        violations.push(Violation::sprint(
            ViolationCode::TeamRequired,
            "tramId",
            String::from("A team must be selected"),
        ));
    }

    if details.sprint_point < 0 {
        violations.push(Violation::sprint(
            ViolationCode::SprintPointNegative,
            "sprintPoint",
            format!("Sprint points cannot be negative, got {}", details.sprint_point),
        ));
    }

    if details
        .details_remark
        .as_ref()
        .is_some_and(|remark| remark.chars().count() > MAX_REMARK_LENGTH)
    {
        violations.push(Violation::sprint(
            ViolationCode::RemarkTooLong,
            "detailsRemark",
            format!("Remark must be at most {MAX_REMARK_LENGTH} characters"),
        ));
    }
}

fn validate_parameters(params: &SprintParameters, violations: &mut Vec<Violation>) {
    match (params.from_date, params.to_date) {
        (Some(from_date), Some(to_date)) => {
            // Rule: the sprint must end after it starts
            if to_date <= from_date {
                violations.push(Violation::sprint(
                    ViolationCode::DateRangeInvalid,
                    "toDate",
                    format!("End date {to_date} must be after start date {from_date}"),
                ));
            }
        }
        (from_date, to_date) => {
            if from_date.is_none() {
                violations.push(Violation::sprint(
                    ViolationCode::FromDateRequired,
                    "fromDate",
                    String::from("Start date is required"),
                ));
            }
            if to_date.is_none() {
                violations.push(Violation::sprint(
                    ViolationCode::ToDateRequired,
                    "toDate",
                    String::from("End date is required"),
                ));
            }
        }
    }

    if params.holiday_count < 0 {
        violations.push(Violation::sprint(
            ViolationCode::HolidayCountNegative,
            "noOfHolidays",
            format!("Holiday count cannot be negative, got {}", params.holiday_count),
        ));
    }

    let default_hours: f64 = params.default_daily_hours;
    if !(MIN_DEFAULT_DAILY_HOURS..=MAX_DAILY_WORKING_HOURS).contains(&default_hours) {
        violations.push(Violation::sprint(
            ViolationCode::DefaultDailyHoursOutOfRange,
            "defaultDailyHours",
            format!(
                "Default daily hours must be between {MIN_DEFAULT_DAILY_HOURS} and {MAX_DAILY_WORKING_HOURS}, got {default_hours}"
            ),
        ));
    }
}

fn validate_row(index: usize, row: &MemberCapacityRow, violations: &mut Vec<Violation>) {
    if row.display_name.trim().is_empty() {
        violations.push(Violation::row(
            ViolationCode::MemberNameRequired,
            "userName",
            index,
            format!("Row {index}: member name is required"),
        ));
    }

    let capacity: f64 = row.capacity_percentage;
    if !(MIN_CAPACITY_PERCENTAGE..=MAX_CAPACITY_PERCENTAGE).contains(&capacity) {
        violations.push(Violation::row(
            ViolationCode::CapacityPercentageOutOfRange,
            "userCapacityPercentage",
            index,
            format!(
                "Row {index}: capacity must be between {MIN_CAPACITY_PERCENTAGE}% and {MAX_CAPACITY_PERCENTAGE}%, got {capacity}"
            ),
        ));
    }

    if row.leave_days < 0 {
        violations.push(Violation::row(
            ViolationCode::LeaveDaysNegative,
            "leaveDays",
            index,
            format!("Row {index}: leave days cannot be negative, got {}", row.leave_days),
        ));
    }

    if let Some(hours) = row.daily_working_hours {
        // NaN fails both comparisons, so it is reported here as well
        if !(hours > 0.0 && hours <= MAX_DAILY_WORKING_HOURS) {
            violations.push(Violation::row(
                ViolationCode::DailyHoursOutOfRange,
                "dailyWorkingHours",
                index,
                format!(
                    "Row {index}: daily hours must be above 0 and at most {MAX_DAILY_WORKING_HOURS}, got {hours}"
                ),
            ));
        }
    }

    if row.allocated_hours < 0.0 {
        violations.push(Violation::row(
            ViolationCode::AllocatedHoursNegative,
            "allocatedHours",
            index,
            format!(
                "Row {index}: allocated hours cannot be negative, got {}",
                row.allocated_hours
            ),
        ));
    }
}
