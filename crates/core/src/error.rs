// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::session::SessionPhase;
use spark_capacity_domain::DomainError;

/// Errors that can occur during session transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Row edits are not accepted while a roster fetch is outstanding.
    RosterLoading,
    /// A roster load was resolved or aborted but none was outstanding.
    NotLoading,
    /// The operation is not allowed in the session's current phase.
    InvalidPhase {
        /// The phase the session was in.
        phase: SessionPhase,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The operation needs a selected team.
    TeamNotSelected,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RosterLoading => {
                write!(f, "Team roster is still loading; row edits are disabled")
            }
            Self::NotLoading => write!(f, "No team roster load is outstanding"),
            Self::InvalidPhase { phase, operation } => {
                write!(f, "Cannot {operation} while the session is {phase}")
            }
            Self::TeamNotSelected => write!(f, "No team has been selected"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
