// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interfaces to the systems the planner talks to.
//!
//! The planner never reaches a directory or a database directly. Callers
//! pass implementations of these traits into the service operations.

use crate::request_response::{MemberCapacityRecord, SprintSubmission};
use spark_capacity_domain::TeamMember;
use thiserror::Error;

/// Failures reported by the team directory or the sprint store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The team is unknown to the directory.
    #[error("Team {team_id} was not found")]
    TeamNotFound { team_id: i64 },

    /// The directory could not be reached or answered with an error.
    #[error("Team directory failed: {message}")]
    DirectoryFailed { message: String },

    /// The sprint is unknown to the store.
    #[error("Sprint {sprint_id} was not found")]
    SprintNotFound { sprint_id: i64 },

    /// The store rejected or failed a write.
    #[error("Sprint store failed: {message}")]
    StoreFailed { message: String },
}

/// Looks up team membership.
pub trait TeamDirectory {
    /// Returns the members of a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the team is unknown or the directory fails.
    fn get_team_members(&self, team_id: i64) -> Result<Vec<TeamMember>, CollaboratorError>;
}

/// Persists sprints and their member capacity rows.
pub trait SprintStore {
    /// Creates a sprint together with its capacity rows.
    ///
    /// # Returns
    ///
    /// The new sprint's identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the submission.
    fn create_sprint_with_capacity(
        &mut self,
        submission: &SprintSubmission,
    ) -> Result<i64, CollaboratorError>;

    /// Creates or updates one member's capacity row for a sprint.
    ///
    /// # Returns
    ///
    /// The row as persisted, with its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the sprint is unknown or the write fails.
    fn upsert_member_capacity(
        &mut self,
        sprint_id: i64,
        record: &MemberCapacityRecord,
    ) -> Result<MemberCapacityRecord, CollaboratorError>;

    /// Deletes one member's capacity row from a sprint. Deleting a member
    /// that has no row is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the sprint is unknown or the write fails.
    fn remove_member_capacity(&mut self, sprint_id: i64, user_id: i64)
    -> Result<(), CollaboratorError>;

    /// Returns a stored sprint with its current capacity rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the sprint is unknown.
    fn fetch_sprint(&self, sprint_id: i64) -> Result<SprintSubmission, CollaboratorError>;
}
