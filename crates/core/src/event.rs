// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use spark_capacity_domain::{MemberCapacityRow, MemberId, SprintParameters, TeamMember};
use time::Date;

/// How much of a session an event invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeClass {
    /// One row changes; recompute it, then the summary once.
    RowEdit,
    /// Sprint parameters change; recompute every row, then the summary once.
    ParameterEdit,
    /// Many rows appear or vanish at once; summary once after the loop.
    BulkRosterChange,
    /// Descriptive fields only; nothing derived changes.
    DetailsEdit,
    /// Phase changes with no data change.
    Lifecycle,
}

impl ChangeClass {
    /// Returns the class name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RowEdit => "row_edit",
            Self::ParameterEdit => "parameter_edit",
            Self::BulkRosterChange => "bulk_roster_change",
            Self::DetailsEdit => "details_edit",
            Self::Lifecycle => "lifecycle",
        }
    }
}

impl std::fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A change to one field of a roster row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEdit {
    /// Picks (or clears) the member the row belongs to.
    Member {
        /// The member, `None` to clear the selection.
        member_id: Option<MemberId>,
        /// The member's display name.
        display_name: String,
    },
    /// Sets the capacity percentage.
    CapacityPercentage(f64),
    /// Sets the leave days.
    LeaveDays(i32),
    /// Sets or clears the daily hours override.
    DailyWorkingHours(Option<f64>),
    /// Sets the allocated hours.
    AllocatedHours(f64),
    /// Sets the notes.
    Notes(Option<String>),
}

/// A change to the sprint parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterEdit {
    /// Sets the first day of the sprint.
    FromDate(Option<Date>),
    /// Sets the last day of the sprint.
    ToDate(Option<Date>),
    /// Sets the holiday count.
    HolidayCount(i32),
    /// Sets the default daily hours.
    DefaultDailyHours(f64),
    /// Replaces all parameters at once.
    Replace(SprintParameters),
}

/// A change to the descriptive sprint fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsEdit {
    /// Sets the sprint name.
    Name(String),
    /// Selects a team. Choosing a different team clears the roster.
    Team(Option<i64>),
    /// Sets the committed sprint points.
    SprintPoint(i32),
    /// Sets the remark.
    Remark(Option<String>),
    /// Sets the creator.
    CreatedBy(Option<String>),
}

/// A discrete edit sent by the caller.
///
/// Each event names its change class, which decides how much is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningEvent {
    /// Edits one field of one row.
    EditRow {
        /// Roster position.
        index: usize,
        /// The change.
        edit: RowEdit,
    },
    /// Appends one manually added row.
    AddRow {
        /// The new row.
        row: MemberCapacityRow,
    },
    /// Removes one row.
    RemoveRow {
        /// Roster position.
        index: usize,
    },
    /// Edits the sprint parameters.
    EditParameters(ParameterEdit),
    /// Adds every member of a team with default capacity values.
    ///
    /// Members already on the roster are skipped. Resolves a pending roster
    /// load.
    AddTeamMembers {
        /// Members as returned by the team directory.
        members: Vec<TeamMember>,
    },
    /// Replaces the whole roster, e.g. with rows loaded from the store.
    ReplaceRoster {
        /// The new roster.
        rows: Vec<MemberCapacityRow>,
    },
    /// Edits the descriptive sprint fields.
    EditDetails(DetailsEdit),
    /// Marks a roster fetch as outstanding.
    BeginRosterLoad,
    /// Abandons an outstanding roster fetch.
    AbortRosterLoad,
}

impl PlanningEvent {
    /// Returns the change class this event belongs to.
    #[must_use]
    pub const fn change_class(&self) -> ChangeClass {
        match self {
            Self::EditRow { .. } | Self::AddRow { .. } | Self::RemoveRow { .. } => {
                ChangeClass::RowEdit
            }
            Self::EditParameters(_) => ChangeClass::ParameterEdit,
            Self::AddTeamMembers { .. } | Self::ReplaceRoster { .. } => {
                ChangeClass::BulkRosterChange
            }
            Self::EditDetails(_) => ChangeClass::DetailsEdit,
            Self::BeginRosterLoad | Self::AbortRosterLoad => ChangeClass::Lifecycle,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EditRow { .. } => "EditRow",
            Self::AddRow { .. } => "AddRow",
            Self::RemoveRow { .. } => "RemoveRow",
            Self::EditParameters(_) => "EditParameters",
            Self::AddTeamMembers { .. } => "AddTeamMembers",
            Self::ReplaceRoster { .. } => "ReplaceRoster",
            Self::EditDetails(_) => "EditDetails",
            Self::BeginRosterLoad => "BeginRosterLoad",
            Self::AbortRosterLoad => "AbortRosterLoad",
        }
    }
}
