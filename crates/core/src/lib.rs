// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod error;
mod event;
mod session;

#[cfg(test)]
mod tests;

use spark_capacity_domain::{DomainError, Violation, validate_sprint_plan};
use tracing::debug;

// Re-export public types and functions
pub use apply::{RecalcMode, RecomputeReport, Transition, apply, recalculate_roster};
pub use error::CoreError;
pub use event::{ChangeClass, DetailsEdit, ParameterEdit, PlanningEvent, RowEdit};
pub use session::{PlanningSession, SessionMode, SessionPhase};

/// The result of checking a session before submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The plan passed; the returned session is in the `Valid` phase.
    Valid(PlanningSession),
    /// The plan failed; the session is unchanged.
    Invalid(Vec<Violation>),
}

/// Validates a session's details, parameters and roster.
///
/// This is a read-only check; the session's phase is not changed.
///
/// # Arguments
///
/// * `session` - The session to check
///
/// # Returns
///
/// Every violation found, in sprint-then-roster order. Empty means valid.
#[must_use]
pub fn validate_session(session: &PlanningSession) -> Vec<Violation> {
    validate_sprint_plan(session.details(), session.parameters(), session.rows())
}

/// Validates a session and, if it passes, moves it to `Valid`.
///
/// # Arguments
///
/// * `session` - The session to check (immutable)
///
/// # Errors
///
/// Returns an error if a roster load is outstanding.
pub fn confirm_valid(session: &PlanningSession) -> Result<ValidationOutcome, CoreError> {
    if session.phase() == SessionPhase::Loading {
        return Err(CoreError::InvalidPhase {
            phase: session.phase(),
            operation: "validate",
        });
    }

    let violations: Vec<Violation> = validate_session(session);
    debug!(
        violations = violations.len(),
        phase = %session.phase(),
        "Validated planning session"
    );

    if violations.is_empty() {
        let mut next: PlanningSession = session.clone();
        next.set_phase(SessionPhase::Valid);
        Ok(ValidationOutcome::Valid(next))
    } else {
        Ok(ValidationOutcome::Invalid(violations))
    }
}

/// Records a successful persist and moves the session to `Submitted`.
///
/// A created sprint switches the session to edit mode for that sprint, so a
/// later submission upserts rather than creating a second sprint.
///
/// # Arguments
///
/// * `session` - A session in the `Valid` phase (immutable)
/// * `sprint_id` - The stored sprint's identifier
///
/// # Errors
///
/// Returns an error if the session is not `Valid`.
pub fn mark_submitted(session: &PlanningSession, sprint_id: i64) -> Result<PlanningSession, CoreError> {
    if session.phase() != SessionPhase::Valid {
        return Err(CoreError::InvalidPhase {
            phase: session.phase(),
            operation: "submit",
        });
    }

    let mut next: PlanningSession = session.clone();
    next.set_mode(SessionMode::Edit { sprint_id });
    next.set_phase(SessionPhase::Submitted);
    Ok(next)
}

/// Returns the session's selected team.
///
/// # Errors
///
/// Returns an error if no team is selected or the team id is not positive.
pub fn selected_team(session: &PlanningSession) -> Result<i64, CoreError> {
    match session.details().team_id {
        None => Err(CoreError::TeamNotSelected),
        Some(team_id) if team_id <= 0 => {
            Err(CoreError::DomainViolation(DomainError::InvalidTeamId(team_id)))
        }
        Some(team_id) => Ok(team_id),
    }
}
