// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planning operations at the API boundary.
//!
//! Each operation takes the caller's session by reference and returns a new
//! one. A failure leaves the caller's session as it was.

use crate::collaborators::{CollaboratorError, SprintStore, TeamDirectory};
use crate::error::ApiError;
use crate::request_response::{
    CreateSprintRequest, MemberCapacityRecord, MemberProgressResponse, SprintCapacityResponse,
    SprintProgressResponse, SprintSubmission, SubmitResponse, ViolationResponse,
};
use spark_capacity::{
    PlanningEvent, PlanningSession, SessionMode, Transition, ValidationOutcome, apply,
    confirm_valid, mark_submitted, selected_team,
};
use spark_capacity_domain::{
    MemberCapacityRow, SprintDetails, SprintParameters, TaskRecord, TeamMember, member_progress,
    parse_sprint_date,
};
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// The response of an operation together with the session it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The session after the operation.
    pub new_session: PlanningSession,
}

impl ApiResult<SprintCapacityResponse> {
    fn for_session(new_session: PlanningSession) -> Self {
        Self {
            response: SprintCapacityResponse::from_session(&new_session),
            new_session,
        }
    }
}

/// Starts a planning session from a request.
///
/// A request with `sprintId` opens that sprint in edit mode; otherwise a new
/// sprint is planned. The request's roster is recomputed in one batch.
///
/// # Arguments
///
/// * `request` - The planning request
/// * `fallback_daily_hours` - Default daily hours when the request has none
///
/// # Errors
///
/// Returns an error if:
/// - `sprintId` is not positive
/// - The roster names a member twice
pub fn start_session(
    request: &CreateSprintRequest,
    fallback_daily_hours: f64,
) -> Result<ApiResult<SprintCapacityResponse>, ApiError> {
    warn_on_unparsable_date("fromDate", request.from_date.as_deref(), request);
    warn_on_unparsable_date("toDate", request.to_date.as_deref(), request);

    let details: SprintDetails = request.details();
    let parameters: SprintParameters = request.parameters(fallback_daily_hours);

    let session: PlanningSession = match request.sprint_id {
        Some(sprint_id) if sprint_id <= 0 => {
            return Err(ApiError::InvalidInput {
                field: String::from("sprintId"),
                message: format!("Invalid sprint id: {sprint_id}. Must be greater than 0"),
            });
        }
        Some(sprint_id) => {
            PlanningSession::for_existing_sprint(sprint_id, details, parameters, Vec::new())
        }
        None => PlanningSession::for_new_sprint(details, parameters),
    };

    let session: PlanningSession = with_roster(session, request.rows())?;

    info!(
        sprint_id = ?request.sprint_id,
        team_id = ?request.tram_id,
        rows = session.rows().len(),
        working_days = session.duration().working_days,
        "Started planning session"
    );

    Ok(ApiResult::for_session(session))
}

/// Opens a stored sprint in edit mode.
///
/// # Arguments
///
/// * `store` - The sprint store
/// * `sprint_id` - The stored sprint
///
/// # Errors
///
/// Returns an error if the store cannot return the sprint or its rows name a
/// member twice.
pub fn open_sprint<S: SprintStore>(
    store: &S,
    sprint_id: i64,
) -> Result<ApiResult<SprintCapacityResponse>, ApiError> {
    let stored: SprintSubmission = store.fetch_sprint(sprint_id).map_err(|err| {
        error!(sprint_id, error = %err, "Failed to fetch sprint");
        ApiError::from(err)
    })?;

    let rows: Vec<MemberCapacityRow> = stored
        .user_capacities
        .iter()
        .map(MemberCapacityRecord::to_row)
        .collect();
    let session: PlanningSession = PlanningSession::for_existing_sprint(
        sprint_id,
        stored.details(),
        stored.parameters(),
        Vec::new(),
    );
    let session: PlanningSession = with_roster(session, rows)?;

    info!(sprint_id, rows = session.rows().len(), "Opened sprint for editing");

    Ok(ApiResult::for_session(session))
}

/// Fetches the selected team's members and adds them to the roster.
///
/// Members already on the roster are kept as they are. The session passes
/// through `Loading` while the directory is consulted.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `directory` - The team directory
///
/// # Errors
///
/// Returns an error if:
/// - No valid team is selected
/// - A roster load is already outstanding
/// - The directory fails; the caller's session is unchanged
pub fn load_team_roster<D: TeamDirectory>(
    session: &PlanningSession,
    directory: &D,
) -> Result<ApiResult<SprintCapacityResponse>, ApiError> {
    let team_id: i64 = selected_team(session)?;
    let loading: PlanningSession = apply(session, PlanningEvent::BeginRosterLoad)?.new_session;

    let members: Vec<TeamMember> = directory.get_team_members(team_id).map_err(|err| {
        error!(team_id, error = %err, "Failed to load team roster");
        ApiError::from(err)
    })?;

    let member_count: usize = members.len();
    let transition: Transition = apply(&loading, PlanningEvent::AddTeamMembers { members })?;

    info!(
        team_id,
        members = member_count,
        added = transition.report.rows_recomputed,
        "Loaded team roster"
    );

    Ok(ApiResult::for_session(transition.new_session))
}

/// Applies one caller edit.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `event` - The edit
///
/// # Errors
///
/// Returns an error if the engine rejects the edit.
pub fn apply_event(
    session: &PlanningSession,
    event: PlanningEvent,
) -> Result<ApiResult<SprintCapacityResponse>, ApiError> {
    let transition: Transition = apply(session, event)?;
    Ok(ApiResult::for_session(transition.new_session))
}

/// Validates and persists a session.
///
/// In create mode the sprint and all member rows go to the store in one
/// call. In edit mode each row with a member is upserted, then stored rows
/// of members no longer on the roster are deleted. Rows without a member
/// are never sent.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `store` - The sprint store
///
/// # Errors
///
/// Returns an error if:
/// - The plan has validation violations
/// - A roster load is outstanding
/// - The store fails; the caller's session is unchanged
pub fn submit<S: SprintStore>(
    session: &PlanningSession,
    store: &mut S,
) -> Result<ApiResult<SubmitResponse>, ApiError> {
    let valid: PlanningSession = match confirm_valid(session)? {
        ValidationOutcome::Valid(valid) => valid,
        ValidationOutcome::Invalid(violations) => {
            warn!(
                violations = violations.len(),
                first = violations.first().map_or("", |v| v.code.as_str()),
                "Rejected sprint submission"
            );
            return Err(ApiError::ValidationFailed {
                violations: violations.iter().map(ViolationResponse::from).collect(),
            });
        }
    };

    let submission: SprintSubmission = SprintSubmission::from_session(&valid);
    let rows_persisted: usize = submission.user_capacities.len();

    let (sprint_id, created, rows_removed): (i64, bool, usize) = match valid.mode() {
        SessionMode::Create => {
            let sprint_id: i64 = store
                .create_sprint_with_capacity(&submission)
                .map_err(|err| store_failure("create sprint", &err))?;
            (sprint_id, true, 0)
        }
        SessionMode::Edit { sprint_id } => {
            let rows_removed: usize = update_sprint(store, sprint_id, &submission)?;
            (sprint_id, false, rows_removed)
        }
    };

    let submitted: PlanningSession = mark_submitted(&valid, sprint_id)?;

    info!(
        sprint_id,
        created,
        rows_persisted,
        rows_removed,
        "Submitted sprint capacity"
    );

    let message: String = if created {
        format!("Sprint '{}' created with {rows_persisted} member row(s)", submission.sprint_name)
    } else {
        format!(
            "Sprint {sprint_id} capacity updated for {rows_persisted} member row(s), \
             {rows_removed} removed"
        )
    };

    Ok(ApiResult {
        response: SubmitResponse {
            sprint_id,
            created,
            rows_persisted,
            rows_removed,
            message,
        },
        new_session: submitted,
    })
}

/// Returns the response for a session without changing it.
#[must_use]
pub fn snapshot(session: &PlanningSession) -> SprintCapacityResponse {
    SprintCapacityResponse::from_session(session)
}

/// Joins the session's roster with the sprint's tasks.
///
/// # Arguments
///
/// * `session` - The session whose roster supplies capacity figures
/// * `tasks` - Tasks assigned within the sprint
#[must_use]
pub fn sprint_progress(session: &PlanningSession, tasks: &[TaskRecord]) -> SprintProgressResponse {
    let sprint_duration_days: u32 = session.duration().calendar_days;
    SprintProgressResponse {
        sprint_duration_days,
        members: member_progress(session.rows(), tasks, sprint_duration_days)
            .iter()
            .map(MemberProgressResponse::from)
            .collect(),
    }
}

fn with_roster(
    session: PlanningSession,
    rows: Vec<MemberCapacityRow>,
) -> Result<PlanningSession, ApiError> {
    if rows.is_empty() {
        return Ok(session);
    }
    Ok(apply(&session, PlanningEvent::ReplaceRoster { rows })?.new_session)
}

/// Upserts every submitted row, then deletes stored rows for members no
/// longer on the roster. Returns the number of rows deleted.
fn update_sprint<S: SprintStore>(
    store: &mut S,
    sprint_id: i64,
    submission: &SprintSubmission,
) -> Result<usize, ApiError> {
    let stored: SprintSubmission = store
        .fetch_sprint(sprint_id)
        .map_err(|err| store_failure("fetch sprint", &err))?;

    for record in &submission.user_capacities {
        store
            .upsert_member_capacity(sprint_id, record)
            .map_err(|err| store_failure("upsert member capacity", &err))?;
    }

    let kept: BTreeSet<i64> = submission
        .user_capacities
        .iter()
        .map(|record| record.user_id)
        .collect();
    let removed: Vec<i64> = stored
        .user_capacities
        .iter()
        .map(|record| record.user_id)
        .filter(|user_id| !kept.contains(user_id))
        .collect();

    for user_id in &removed {
        store
            .remove_member_capacity(sprint_id, *user_id)
            .map_err(|err| store_failure("remove member capacity", &err))?;
        debug!(sprint_id, user_id, "Removed member from sprint");
    }

    Ok(removed.len())
}

fn store_failure(operation: &str, err: &CollaboratorError) -> ApiError {
    error!(operation, error = %err, "Sprint store failed");
    ApiError::Collaborator(err.clone())
}

fn warn_on_unparsable_date(field: &str, text: Option<&str>, request: &CreateSprintRequest) {
    let Some(text) = text else {
        return;
    };
    if !text.trim().is_empty() && parse_sprint_date(text).is_none() {
        warn!(
            field,
            value = text,
            sprint = %request.sprint_name,
            "Unparsable sprint date; using fallback duration"
        );
    }
}
