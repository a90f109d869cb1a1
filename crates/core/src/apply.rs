// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::{ChangeClass, DetailsEdit, ParameterEdit, PlanningEvent, RowEdit};
use crate::session::{PlanningSession, SessionPhase};
use spark_capacity_domain::{
    DomainError, MemberCapacityRow, MemberId, SprintParameters, TeamMember,
};
use std::collections::HashSet;
use tracing::debug;

/// What a transition recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeReport {
    /// The change class of the event.
    pub change_class: ChangeClass,
    /// Rows whose derived fields were recomputed.
    pub rows_recomputed: usize,
    /// Summary aggregations performed.
    pub summary_passes: usize,
}

/// The result of a successful session transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The session after the transition.
    pub new_session: PlanningSession,
    /// What the transition recomputed.
    pub report: RecomputeReport,
}

/// How a full roster recomputation schedules summary passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcMode {
    /// Recompute every row, then aggregate once.
    Batch,
    /// Aggregate after every row, as a sequence of single-row edits would.
    Incremental,
}

/// Applies a planning event to a session, producing a new session.
///
/// The event's change class decides the scope: a row edit recomputes one
/// row, a parameter edit or bulk roster change recomputes every affected row
/// in batch mode. Either way the summary is aggregated exactly once.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `event` - The edit to apply
///
/// # Returns
///
/// * `Ok(Transition)` containing the new session and a recompute report
/// * `Err(CoreError)` if the event is not allowed
///
/// # Errors
///
/// Returns an error if:
/// - A row edit arrives while the roster is loading
/// - A row index does not exist
/// - A member would appear on the roster twice
/// - A roster load is begun twice or aborted when none is outstanding
pub fn apply(session: &PlanningSession, event: PlanningEvent) -> Result<Transition, CoreError> {
    let change_class: ChangeClass = event.change_class();
    let event_name: &'static str = event.name();

    if session.phase() == SessionPhase::Loading && change_class == ChangeClass::RowEdit {
        return Err(CoreError::RosterLoading);
    }

    let mut next: PlanningSession = session.clone();

    let (rows_recomputed, summary_passes): (usize, usize) = match event {
        PlanningEvent::EditRow { index, edit } => {
            check_index(&next, index)?;
            if let RowEdit::Member {
                member_id: Some(member_id),
                ..
            } = &edit
            {
                check_member_free(&next, *member_id, Some(index))?;
            }
            if let Some(row) = next.rows_mut().get_mut(index) {
                apply_row_edit(row, edit);
            }
            next.recompute_row(index);
            next.refresh_summary();
            mark_edited(&mut next);
            (1, 1)
        }
        PlanningEvent::AddRow { row } => {
            if let Some(member_id) = row.member_id {
                check_member_free(&next, member_id, None)?;
            }
            next.rows_mut().push(row);
            next.recompute_row(next.rows().len() - 1);
            next.refresh_summary();
            mark_edited(&mut next);
            (1, 1)
        }
        PlanningEvent::RemoveRow { index } => {
            check_index(&next, index)?;
            next.rows_mut().remove(index);
            next.refresh_summary();
            mark_edited(&mut next);
            (0, 1)
        }
        PlanningEvent::EditParameters(edit) => {
            let parameters: SprintParameters = edit_parameters(*next.parameters(), edit);
            next.set_parameters(parameters);
            let rows: usize = next.recompute_all_rows();
            next.refresh_summary();
            mark_edited(&mut next);
            (rows, 1)
        }
        PlanningEvent::AddTeamMembers { members } => {
            let added: usize = add_team_members(&mut next, &members);
            next.refresh_summary();
            if next.phase() == SessionPhase::Loading {
                next.finish_loading();
            }
            next.set_phase(SessionPhase::Populating);
            (added, 1)
        }
        PlanningEvent::ReplaceRoster { rows } => {
            check_unique_members(&rows)?;
            *next.rows_mut() = rows;
            let recomputed: usize = next.recompute_all_rows();
            next.refresh_summary();
            if next.phase() == SessionPhase::Loading {
                next.finish_loading();
            }
            next.set_phase(SessionPhase::Populating);
            (recomputed, 1)
        }
        PlanningEvent::EditDetails(edit) => {
            let roster_cleared: bool = edit_details(&mut next, edit);
            let passes: usize = if roster_cleared {
                next.refresh_summary();
                1
            } else {
                0
            };
            mark_edited(&mut next);
            (0, passes)
        }
        PlanningEvent::BeginRosterLoad => {
            if next.phase() == SessionPhase::Loading {
                return Err(CoreError::RosterLoading);
            }
            next.begin_loading();
            (0, 0)
        }
        PlanningEvent::AbortRosterLoad => {
            if next.phase() != SessionPhase::Loading {
                return Err(CoreError::NotLoading);
            }
            next.finish_loading();
            (0, 0)
        }
    };

    debug!(
        event = event_name,
        change_class = %change_class,
        rows_recomputed,
        summary_passes,
        phase = %next.phase(),
        "Applied planning event"
    );

    Ok(Transition {
        new_session: next,
        report: RecomputeReport {
            change_class,
            rows_recomputed,
            summary_passes,
        },
    })
}

/// Recomputes every row of a session against its current parameters.
///
/// `Batch` performs one summary pass; `Incremental` aggregates after every
/// row. Both end with the same rows and summary. The phase is unchanged.
///
/// # Arguments
///
/// * `session` - The session to recompute (immutable)
/// * `mode` - How summary passes are scheduled
#[must_use]
pub fn recalculate_roster(session: &PlanningSession, mode: RecalcMode) -> Transition {
    let mut next: PlanningSession = session.clone();

    let (rows_recomputed, summary_passes): (usize, usize) = match mode {
        RecalcMode::Batch => {
            let rows: usize = next.recompute_all_rows();
            next.refresh_summary();
            (rows, 1)
        }
        RecalcMode::Incremental => {
            let rows: usize = next.rows().len();
            for index in 0..rows {
                next.recompute_row(index);
                next.refresh_summary();
            }
            if rows == 0 {
                next.refresh_summary();
            }
            (rows, rows.max(1))
        }
    };

    debug!(
        mode = ?mode,
        rows_recomputed,
        summary_passes,
        "Recalculated roster"
    );

    Transition {
        new_session: next,
        report: RecomputeReport {
            change_class: ChangeClass::ParameterEdit,
            rows_recomputed,
            summary_passes,
        },
    }
}

fn mark_edited(session: &mut PlanningSession) {
    if session.phase() == SessionPhase::Loading {
        session.mark_edited_while_loading();
    } else {
        session.set_phase(SessionPhase::Populating);
    }
}

fn check_index(session: &PlanningSession, index: usize) -> Result<(), CoreError> {
    let len: usize = session.rows().len();
    if index >= len {
        return Err(CoreError::DomainViolation(
            DomainError::RowIndexOutOfRange { index, len },
        ));
    }
    Ok(())
}

/// Fails if `member_id` is on any row other than `except_index`.
fn check_member_free(
    session: &PlanningSession,
    member_id: MemberId,
    except_index: Option<usize>,
) -> Result<(), CoreError> {
    let taken: bool = session
        .rows()
        .iter()
        .enumerate()
        .any(|(i, row)| Some(i) != except_index && row.member_id == Some(member_id));
    if taken {
        return Err(CoreError::DomainViolation(DomainError::DuplicateMember {
            member_id,
        }));
    }
    Ok(())
}

fn check_unique_members(rows: &[MemberCapacityRow]) -> Result<(), CoreError> {
    let mut seen: HashSet<MemberId> = HashSet::new();
    for member_id in rows.iter().filter_map(|row| row.member_id) {
        if !seen.insert(member_id) {
            return Err(CoreError::DomainViolation(DomainError::DuplicateMember {
                member_id,
            }));
        }
    }
    Ok(())
}

fn apply_row_edit(row: &mut MemberCapacityRow, edit: RowEdit) {
    match edit {
        RowEdit::Member {
            member_id,
            display_name,
        } => {
            row.member_id = member_id;
            row.display_name = display_name;
        }
        RowEdit::CapacityPercentage(value) => row.capacity_percentage = value,
        RowEdit::LeaveDays(value) => row.leave_days = value,
        RowEdit::DailyWorkingHours(value) => row.daily_working_hours = value,
        RowEdit::AllocatedHours(value) => row.allocated_hours = value,
        RowEdit::Notes(value) => row.notes = value,
    }
}

const fn edit_parameters(mut parameters: SprintParameters, edit: ParameterEdit) -> SprintParameters {
    match edit {
        ParameterEdit::FromDate(value) => parameters.from_date = value,
        ParameterEdit::ToDate(value) => parameters.to_date = value,
        ParameterEdit::HolidayCount(value) => parameters.holiday_count = value,
        ParameterEdit::DefaultDailyHours(value) => parameters.default_daily_hours = value,
        ParameterEdit::Replace(value) => parameters = value,
    }
    parameters
}

/// Appends a default row for each member not yet on the roster and
/// recomputes only the new rows. The summary is left to the caller.
fn add_team_members(session: &mut PlanningSession, members: &[TeamMember]) -> usize {
    let mut present: HashSet<MemberId> = session
        .rows()
        .iter()
        .filter_map(|row| row.member_id)
        .collect();
    let first_new: usize = session.rows().len();

    for member in members {
        if present.insert(member.member_id) {
            session.rows_mut().push(MemberCapacityRow::for_member(member));
        }
    }

    let added: usize = session.rows().len() - first_new;
    for index in first_new..session.rows().len() {
        session.recompute_row(index);
    }
    if added < members.len() {
        debug!(
            skipped = members.len() - added,
            "Skipped team members already on the roster"
        );
    }
    added
}

/// Applies a details edit. Returns whether the roster was cleared because a
/// different team was selected.
fn edit_details(session: &mut PlanningSession, edit: DetailsEdit) -> bool {
    match edit {
        DetailsEdit::Name(value) => session.details_mut().name = value,
        DetailsEdit::Team(value) => {
            if session.details().team_id != value {
                session.details_mut().team_id = value;
                session.rows_mut().clear();
                return true;
            }
        }
        DetailsEdit::SprintPoint(value) => session.details_mut().sprint_point = value,
        DetailsEdit::Remark(value) => session.details_mut().details_remark = value,
        DetailsEdit::CreatedBy(value) => session.details_mut().created_by = value,
    }
    false
}
