// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::collaborators::CollaboratorError;
use crate::request_response::ViolationResponse;
use spark_capacity::CoreError;
use spark_capacity_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The plan failed validation and was not persisted.
    ValidationFailed {
        /// Every violation found.
        violations: Vec<ViolationResponse>,
    },
    /// The team directory or sprint store failed.
    Collaborator(CollaboratorError),
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The planning engine refused the operation.
    Engine {
        /// The rule that refused it.
        rule: String,
        /// A human-readable description.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { violations } => {
                write!(f, "Validation failed with {} violation(s)", violations.len())?;
                for violation in violations {
                    write!(f, "; {}", violation.message)?;
                }
                Ok(())
            }
            Self::Collaborator(err) => write!(f, "Collaborator failure: {err}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Engine { rule, message } => {
                write!(f, "Planning rule violation ({rule}): {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collaborator(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CollaboratorError> for ApiError {
    fn from(err: CollaboratorError) -> Self {
        Self::Collaborator(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::DuplicateMember { member_id } => ApiError::Engine {
            rule: String::from("unique_member"),
            message: format!("Member {member_id} is already on the sprint roster"),
        },
        DomainError::RowIndexOutOfRange { index, len } => ApiError::InvalidInput {
            field: String::from("index"),
            message: format!("Roster row {index} does not exist (roster has {len} rows)"),
        },
        DomainError::InvalidTeamId(team_id) => ApiError::InvalidInput {
            field: String::from("tramId"),
            message: format!("Invalid team id: {team_id}. Must be greater than 0"),
        },
        DomainError::UnknownUtilizationBand(name) => ApiError::InvalidInput {
            field: String::from("utilizationBand"),
            message: format!("Unknown utilization band '{name}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RosterLoading => ApiError::Engine {
            rule: String::from("roster_loading"),
            message: String::from("Team roster is still loading"),
        },
        CoreError::NotLoading => ApiError::Engine {
            rule: String::from("roster_loading"),
            message: String::from("No team roster load is outstanding"),
        },
        CoreError::InvalidPhase { phase, operation } => ApiError::Engine {
            rule: String::from("session_phase"),
            message: format!("Cannot {operation} while the session is {phase}"),
        },
        CoreError::TeamNotSelected => ApiError::InvalidInput {
            field: String::from("tramId"),
            message: String::from("A team must be selected"),
        },
    }
}
