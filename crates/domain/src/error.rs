// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::MemberId;

/// Errors raised by roster-level domain rules.
///
/// Range and structural problems in a submission are not errors; they are
/// reported as [`crate::Violation`] entries by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A member already has a row in the roster.
    DuplicateMember {
        /// The member that is already present.
        member_id: MemberId,
    },
    /// A roster row index does not exist.
    RowIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of rows in the roster.
        len: usize,
    },
    /// A team identifier is not a positive number.
    InvalidTeamId(i64),
    /// A utilization band name is not recognised.
    UnknownUtilizationBand(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateMember { member_id } => {
                write!(f, "Member {member_id} is already on the sprint roster")
            }
            Self::RowIndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Roster row {index} does not exist (roster has {len} rows)"
                )
            }
            Self::InvalidTeamId(team_id) => {
                write!(f, "Invalid team id: {team_id}. Must be greater than 0")
            }
            Self::UnknownUtilizationBand(name) => {
                write!(f, "Unknown utilization band: {name}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
