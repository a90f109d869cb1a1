// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names follow the console's JSON contract (`tramId`, `noOfHolidays`,
//! `userCapacityPercentage`), so they differ from the domain names.

use serde::{Deserialize, Serialize};
use spark_capacity::{PlanningSession, SessionMode};
use spark_capacity_domain::{
    CapacitySummary, DEFAULT_CAPACITY_PERCENTAGE, DerivedFields, MemberCapacityRow, MemberId,
    MemberProgress,
    SprintDetails, SprintDuration, SprintParameters, TeamMember, Violation, parse_sprint_date,
    round_to_hundredths,
};
use time::Date;

time::serde::format_description!(sprint_date, Date, "[year]-[month]-[day]");

/// One roster row as entered by the caller.
///
/// Missing numbers take the defaults of a freshly added row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberCapacityInput {
    /// The member, if one has been picked.
    pub user_id: Option<i64>,
    /// The member's display name.
    pub user_name: String,
    /// Capacity percentage (defaults to 100).
    pub user_capacity_percentage: Option<f64>,
    /// Leave days (defaults to 0).
    pub leave_days: Option<i32>,
    /// Per-member daily hours override.
    pub daily_working_hours: Option<f64>,
    /// Allocated hours (defaults to 0).
    pub allocated_hours: Option<f64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl MemberCapacityInput {
    /// Converts the input into a roster row. Derived fields are computed
    /// when the row enters a session.
    #[must_use]
    pub fn to_row(&self) -> MemberCapacityRow {
        MemberCapacityRow::new(self.user_id.map(MemberId::new), &self.user_name)
            .with_capacity_percentage(
                self.user_capacity_percentage
                    .unwrap_or(DEFAULT_CAPACITY_PERCENTAGE),
            )
            .with_leave_days(self.leave_days.unwrap_or(0))
            .with_daily_working_hours(self.daily_working_hours)
            .with_allocated_hours(self.allocated_hours.unwrap_or(0.0))
            .with_notes(self.notes.clone())
    }
}

/// API request to plan a sprint's capacity.
///
/// With `sprintId` set the request revises a stored sprint; otherwise it
/// plans a new one. Dates are parsed leniently: text that is not an ISO
/// date counts as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSprintRequest {
    /// The stored sprint being revised, if any.
    pub sprint_id: Option<i64>,
    /// The sprint name.
    pub sprint_name: String,
    /// First day of the sprint (ISO 8601).
    pub from_date: Option<String>,
    /// Last day of the sprint (ISO 8601).
    pub to_date: Option<String>,
    /// The selected team.
    #[serde(alias = "teamId")]
    pub tram_id: Option<i64>,
    /// Committed story points.
    pub sprint_point: Option<i32>,
    /// Free-text remark.
    pub details_remark: Option<String>,
    /// The operator creating the sprint.
    pub create_by: Option<String>,
    /// Holidays inside the window.
    pub no_of_holidays: Option<i32>,
    /// Hours per day for rows without their own override.
    pub default_daily_hours: Option<f64>,
    /// The initial roster.
    pub user_capacities: Vec<MemberCapacityInput>,
}

impl CreateSprintRequest {
    /// Returns the sprint details carried by the request.
    #[must_use]
    pub fn details(&self) -> SprintDetails {
        SprintDetails {
            name: self.sprint_name.clone(),
            team_id: self.tram_id,
            sprint_point: self.sprint_point.unwrap_or(0),
            details_remark: self.details_remark.clone(),
            created_by: self.create_by.clone(),
        }
    }

    /// Returns the sprint parameters carried by the request.
    ///
    /// # Arguments
    ///
    /// * `fallback_daily_hours` - Used when the request has no default daily hours
    #[must_use]
    pub fn parameters(&self, fallback_daily_hours: f64) -> SprintParameters {
        SprintParameters::new(
            self.from_date.as_deref().and_then(parse_sprint_date),
            self.to_date.as_deref().and_then(parse_sprint_date),
            self.no_of_holidays.unwrap_or(0),
            self.default_daily_hours.unwrap_or(fallback_daily_hours),
        )
    }

    /// Returns the initial roster.
    #[must_use]
    pub fn rows(&self) -> Vec<MemberCapacityRow> {
        self.user_capacities
            .iter()
            .map(MemberCapacityInput::to_row)
            .collect()
    }
}

/// One roster row with its derived figures, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCapacityResponse {
    /// The member, if one has been picked.
    pub user_id: Option<i64>,
    /// The member's display name.
    pub user_name: String,
    /// Capacity percentage as entered.
    pub user_capacity_percentage: f64,
    /// Leave days as entered.
    pub leave_days: i32,
    /// Daily hours override as entered.
    pub daily_working_hours: Option<f64>,
    /// Allocated hours as entered.
    pub allocated_hours: f64,
    /// Notes as entered.
    pub notes: Option<String>,
    /// Sprint working days the row was computed against.
    pub working_days: u32,
    /// Daily hours actually used.
    pub effective_daily_hours: f64,
    /// Working days times daily hours.
    pub total_working_hours: f64,
    /// Hours after leave and capacity.
    pub available_working_hours: f64,
    /// Available minus allocated.
    pub remaining_hours: f64,
    /// Allocated as a percentage of available.
    pub utilization_percentage: f64,
    /// Utilization above 100%.
    pub is_over_allocated: bool,
    /// Display band for the utilization.
    pub utilization_band: String,
}

impl MemberCapacityResponse {
    /// Builds the response for one row.
    #[must_use]
    pub fn from_row(row: &MemberCapacityRow) -> Self {
        let derived: &DerivedFields = row.derived();
        Self {
            user_id: row.member_id.map(|id| id.value()),
            user_name: row.display_name.clone(),
            user_capacity_percentage: row.capacity_percentage,
            leave_days: row.leave_days,
            daily_working_hours: row.daily_working_hours,
            allocated_hours: round_to_hundredths(row.allocated_hours),
            notes: row.notes.clone(),
            working_days: derived.working_days(),
            effective_daily_hours: round_to_hundredths(derived.effective_daily_hours()),
            total_working_hours: round_to_hundredths(derived.total_working_hours()),
            available_working_hours: round_to_hundredths(derived.available_working_hours()),
            remaining_hours: round_to_hundredths(derived.remaining_hours()),
            utilization_percentage: derived.utilization_display(),
            is_over_allocated: derived.is_over_allocated(),
            utilization_band: derived.band().to_string(),
        }
    }
}

/// Team-level figures, rounded for display, with the sprint's day counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySummaryResponse {
    /// Rows in the roster.
    pub total_members: usize,
    /// Rows with capacity above zero.
    pub active_members: usize,
    /// Rows with leave.
    pub members_on_leave: usize,
    /// Sum of available hours.
    pub total_capacity_hours: f64,
    /// Sum of allocated hours.
    pub total_allocated_hours: f64,
    /// Capacity minus allocation.
    pub total_remaining_hours: f64,
    /// Team utilization.
    pub average_utilization: f64,
    /// Over-allocated rows.
    pub over_allocated_members: usize,
    /// Rows under 50% utilization.
    pub under_utilized_members: usize,
    /// Team over 100% or any member over-allocated.
    pub has_capacity_risks: bool,
    /// `100 - |100 - averageUtilization|`.
    pub team_efficiency: f64,
    /// Hours before leave and capacity.
    pub total_potential_hours: f64,
    /// Hours removed by leave.
    pub total_lost_hours_to_leave: f64,
    /// Hours removed by partial capacity.
    pub total_lost_hours_to_capacity: f64,
    /// Leave days across the roster.
    pub total_leave_days: u32,
    /// Calendar days in the sprint, or the fallback.
    pub sprint_duration_days: u32,
    /// Working days after holidays.
    pub working_days: u32,
    /// Holidays subtracted.
    pub holidays: u32,
}

impl CapacitySummaryResponse {
    /// Builds the response from a summary and the sprint's day counts.
    #[must_use]
    pub fn new(summary: &CapacitySummary, duration: SprintDuration) -> Self {
        let rounded: CapacitySummary = summary.rounded();
        Self {
            total_members: rounded.total_members,
            active_members: rounded.active_members,
            members_on_leave: rounded.members_on_leave,
            total_capacity_hours: rounded.total_capacity_hours,
            total_allocated_hours: rounded.total_allocated_hours,
            total_remaining_hours: rounded.total_remaining_hours,
            average_utilization: rounded.average_utilization,
            over_allocated_members: rounded.over_allocated_members,
            under_utilized_members: rounded.under_utilized_members,
            has_capacity_risks: rounded.has_capacity_risks,
            team_efficiency: rounded.team_efficiency,
            total_potential_hours: rounded.total_potential_hours,
            total_lost_hours_to_leave: rounded.total_lost_hours_to_leave,
            total_lost_hours_to_capacity: rounded.total_lost_hours_to_capacity,
            total_leave_days: rounded.total_leave_days,
            sprint_duration_days: duration.calendar_days,
            working_days: duration.working_days,
            holidays: duration.holidays,
        }
    }
}

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationResponse {
    /// Stable reason code, e.g. `to_date_required`.
    pub code: String,
    /// The offending field.
    pub field: String,
    /// Roster row, for row-level problems.
    pub row_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl From<&Violation> for ViolationResponse {
    fn from(violation: &Violation) -> Self {
        Self {
            code: violation.code.as_str().to_string(),
            field: violation.field.to_string(),
            row_index: violation.row_index,
            message: violation.message.clone(),
        }
    }
}

/// The full state of a planning session after an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintCapacityResponse {
    /// The stored sprint, in edit mode.
    pub sprint_id: Option<i64>,
    /// Lifecycle phase.
    pub phase: String,
    /// The sprint name.
    pub sprint_name: String,
    /// The selected team.
    pub tram_id: Option<i64>,
    /// First day of the sprint.
    #[serde(with = "sprint_date::option")]
    pub from_date: Option<Date>,
    /// Last day of the sprint.
    #[serde(with = "sprint_date::option")]
    pub to_date: Option<Date>,
    /// Holidays as entered.
    pub no_of_holidays: i32,
    /// Default daily hours as entered.
    pub default_daily_hours: f64,
    /// Working days used for every row.
    pub working_days: u32,
    /// Whether the working days come from the fallback.
    pub uses_fallback_duration: bool,
    /// The roster.
    pub user_capacities: Vec<MemberCapacityResponse>,
    /// Team figures; absent while the roster is empty.
    pub capacity_summary: Option<CapacitySummaryResponse>,
}

impl SprintCapacityResponse {
    /// Builds the response for a session.
    #[must_use]
    pub fn from_session(session: &PlanningSession) -> Self {
        let parameters: &SprintParameters = session.parameters();
        let duration: SprintDuration = session.duration();
        Self {
            sprint_id: sprint_id_of(session),
            phase: session.phase().as_str().to_string(),
            sprint_name: session.details().name.clone(),
            tram_id: session.details().team_id,
            from_date: parameters.from_date,
            to_date: parameters.to_date,
            no_of_holidays: parameters.holiday_count,
            default_daily_hours: parameters.default_daily_hours,
            working_days: duration.working_days,
            uses_fallback_duration: duration.is_fallback,
            user_capacities: session
                .rows()
                .iter()
                .map(MemberCapacityResponse::from_row)
                .collect(),
            capacity_summary: session
                .summary()
                .map(|summary| CapacitySummaryResponse::new(summary, duration)),
        }
    }
}

/// A member capacity row as sent to and returned by the sprint store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCapacityRecord {
    /// Store identifier, once persisted.
    #[serde(default)]
    pub id: Option<i64>,
    /// The sprint the row belongs to, once persisted.
    #[serde(default)]
    pub sprint_id: Option<i64>,
    /// The member.
    pub user_id: i64,
    /// The member's display name.
    pub user_name: String,
    /// Capacity percentage.
    pub user_capacity_percentage: f64,
    /// Leave days.
    pub leave_days: i32,
    /// Daily hours override.
    #[serde(default)]
    pub daily_working_hours: Option<f64>,
    /// Working days the figures were computed against.
    pub working_days: u32,
    /// Working days times daily hours.
    pub total_working_hours: f64,
    /// Hours after leave and capacity.
    pub available_working_hours: f64,
    /// Allocated hours.
    pub allocated_hours: f64,
    /// Available minus allocated.
    pub remaining_hours: f64,
    /// Utilization, rounded.
    pub utilization_percentage: f64,
    /// Over-allocation flag.
    pub is_over_allocated: bool,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl MemberCapacityRecord {
    /// Builds the record for a row. Rows without a member are not stored, so
    /// they yield `None`.
    #[must_use]
    pub fn from_row(row: &MemberCapacityRow) -> Option<Self> {
        let member_id: MemberId = row.member_id?;
        let derived: &DerivedFields = row.derived();
        Some(Self {
            id: None,
            sprint_id: None,
            user_id: member_id.value(),
            user_name: row.display_name.clone(),
            user_capacity_percentage: row.capacity_percentage,
            leave_days: row.leave_days,
            daily_working_hours: row.daily_working_hours,
            working_days: derived.working_days(),
            total_working_hours: round_to_hundredths(derived.total_working_hours()),
            available_working_hours: round_to_hundredths(derived.available_working_hours()),
            allocated_hours: round_to_hundredths(row.allocated_hours),
            remaining_hours: round_to_hundredths(derived.remaining_hours()),
            utilization_percentage: derived.utilization_display(),
            is_over_allocated: derived.is_over_allocated(),
            notes: row.notes.clone(),
        })
    }

    /// Converts a stored record back into a roster row.
    #[must_use]
    pub fn to_row(&self) -> MemberCapacityRow {
        MemberCapacityRow::new(Some(MemberId::new(self.user_id)), &self.user_name)
            .with_capacity_percentage(self.user_capacity_percentage)
            .with_leave_days(self.leave_days)
            .with_daily_working_hours(self.daily_working_hours)
            .with_allocated_hours(self.allocated_hours)
            .with_notes(self.notes.clone())
    }
}

/// A complete sprint as handed to the store on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSubmission {
    /// The sprint name.
    pub sprint_name: String,
    /// First day of the sprint.
    #[serde(with = "sprint_date::option")]
    pub from_date: Option<Date>,
    /// Last day of the sprint.
    #[serde(with = "sprint_date::option")]
    pub to_date: Option<Date>,
    /// The selected team.
    pub tram_id: Option<i64>,
    /// Committed story points.
    pub sprint_point: i32,
    /// Free-text remark.
    pub details_remark: Option<String>,
    /// The operator creating the sprint.
    pub create_by: Option<String>,
    /// Holidays inside the window.
    pub no_of_holidays: i32,
    /// Default daily hours.
    pub default_daily_hours: f64,
    /// Calendar days in the sprint.
    pub sprint_duration_days: u32,
    /// Rows with a member.
    pub user_capacities: Vec<MemberCapacityRecord>,
    /// Team figures at submission time.
    pub capacity_summary: Option<CapacitySummaryResponse>,
}

impl SprintSubmission {
    /// Builds the submission for a session.
    #[must_use]
    pub fn from_session(session: &PlanningSession) -> Self {
        let details: &SprintDetails = session.details();
        let parameters: &SprintParameters = session.parameters();
        let duration: SprintDuration = session.duration();
        Self {
            sprint_name: details.name.clone(),
            from_date: parameters.from_date,
            to_date: parameters.to_date,
            tram_id: details.team_id,
            sprint_point: details.sprint_point,
            details_remark: details.details_remark.clone(),
            create_by: details.created_by.clone(),
            no_of_holidays: parameters.holiday_count,
            default_daily_hours: parameters.default_daily_hours,
            sprint_duration_days: duration.calendar_days,
            user_capacities: session
                .rows()
                .iter()
                .filter_map(MemberCapacityRecord::from_row)
                .collect(),
            capacity_summary: session
                .summary()
                .map(|summary| CapacitySummaryResponse::new(summary, duration)),
        }
    }

    /// Returns the stored sprint details.
    #[must_use]
    pub fn details(&self) -> SprintDetails {
        SprintDetails {
            name: self.sprint_name.clone(),
            team_id: self.tram_id,
            sprint_point: self.sprint_point,
            details_remark: self.details_remark.clone(),
            created_by: self.create_by.clone(),
        }
    }

    /// Returns the stored sprint parameters.
    #[must_use]
    pub const fn parameters(&self) -> SprintParameters {
        SprintParameters::new(
            self.from_date,
            self.to_date,
            self.no_of_holidays,
            self.default_daily_hours,
        )
    }
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// The stored sprint.
    pub sprint_id: i64,
    /// Whether the sprint was created (otherwise its rows were upserted).
    pub created: bool,
    /// Rows sent to the store.
    pub rows_persisted: usize,
    /// Stored rows deleted because the member left the roster.
    pub rows_removed: usize,
    /// A success message.
    pub message: String,
}

/// A team member as the directory lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRecord {
    pub user_id: i64,
    pub user_name: String,
}

impl TeamMemberRecord {
    #[must_use]
    pub fn to_member(&self) -> TeamMember {
        TeamMember::new(MemberId::new(self.user_id), &self.user_name)
    }
}

impl From<&TeamMember> for TeamMemberRecord {
    fn from(member: &TeamMember) -> Self {
        Self {
            user_id: member.member_id.value(),
            user_name: member.display_name.clone(),
        }
    }
}

/// One member's capacity and delivery figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgressResponse {
    pub user_id: i64,
    pub user_name: String,
    pub total_working_hours: f64,
    pub available_working_hours: f64,
    pub allocated_hours: f64,
    pub remaining_hours: f64,
    pub utilization_percentage: f64,
    pub is_over_allocated: bool,
    pub tasks_total: u32,
    pub tasks_done: u32,
    pub points_total: u32,
    pub points_done: u32,
    pub completion_percentage: u32,
    pub points_completion_percentage: u32,
    pub velocity_points_per_day: f64,
}

impl From<&MemberProgress> for MemberProgressResponse {
    fn from(progress: &MemberProgress) -> Self {
        Self {
            user_id: progress.member_id.value(),
            user_name: progress.display_name.clone(),
            total_working_hours: round_to_hundredths(progress.total_working_hours),
            available_working_hours: round_to_hundredths(progress.available_working_hours),
            allocated_hours: round_to_hundredths(progress.allocated_hours),
            remaining_hours: round_to_hundredths(progress.remaining_hours),
            utilization_percentage: progress.utilization_percentage,
            is_over_allocated: progress.over_allocated,
            tasks_total: progress.tasks_total,
            tasks_done: progress.tasks_done,
            points_total: progress.points_total,
            points_done: progress.points_done,
            completion_percentage: progress.completion_percentage,
            points_completion_percentage: progress.points_completion_percentage,
            velocity_points_per_day: progress.velocity_points_per_day,
        }
    }
}

/// Per-member delivery progress for a sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintProgressResponse {
    /// Calendar days used for velocity.
    pub sprint_duration_days: u32,
    /// One line per member.
    pub members: Vec<MemberProgressResponse>,
}

const fn sprint_id_of(session: &PlanningSession) -> Option<i64> {
    match session.mode() {
        SessionMode::Create => None,
        SessionMode::Edit { sprint_id } => Some(sprint_id),
    }
}
