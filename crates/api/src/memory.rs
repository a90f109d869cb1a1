// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory collaborators for hosts without a backing service.

use crate::collaborators::{CollaboratorError, SprintStore, TeamDirectory};
use crate::request_response::{MemberCapacityRecord, SprintSubmission, TeamMemberRecord};
use serde::{Deserialize, Serialize};
use spark_capacity_domain::TeamMember;
use std::collections::BTreeMap;

/// A team directory backed by a fixed map of teams. It loads from JSON as
/// `{"teams": {"<teamId>": [{"userId": .., "userName": ..}]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryTeamDirectory {
    teams: BTreeMap<i64, Vec<TeamMemberRecord>>,
    #[serde(skip)]
    outage: Option<String>,
}

impl InMemoryTeamDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a team.
    #[must_use]
    pub fn with_team(mut self, team_id: i64, members: &[TeamMember]) -> Self {
        self.teams
            .insert(team_id, members.iter().map(TeamMemberRecord::from).collect());
        self
    }

    /// Creates a directory whose every lookup fails with `message`.
    #[must_use]
    pub fn unavailable(message: &str) -> Self {
        Self {
            teams: BTreeMap::new(),
            outage: Some(message.to_string()),
        }
    }
}

impl TeamDirectory for InMemoryTeamDirectory {
    fn get_team_members(&self, team_id: i64) -> Result<Vec<TeamMember>, CollaboratorError> {
        if let Some(message) = &self.outage {
            return Err(CollaboratorError::DirectoryFailed {
                message: message.clone(),
            });
        }
        self.teams
            .get(&team_id)
            .map(|records| records.iter().map(TeamMemberRecord::to_member).collect())
            .ok_or(CollaboratorError::TeamNotFound { team_id })
    }
}

/// A sprint store that keeps sprints in a map.
///
/// Identifiers are assigned sequentially from 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemorySprintStore {
    sprints: BTreeMap<i64, SprintSubmission>,
    last_sprint_id: i64,
    last_record_id: i64,
    outage: Option<String>,
}

impl InMemorySprintStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every write fails with `message`.
    #[must_use]
    pub fn unavailable(message: &str) -> Self {
        Self {
            outage: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Returns a stored sprint.
    #[must_use]
    pub fn sprint(&self, sprint_id: i64) -> Option<&SprintSubmission> {
        self.sprints.get(&sprint_id)
    }

    /// Number of stored sprints.
    #[must_use]
    pub fn sprint_count(&self) -> usize {
        self.sprints.len()
    }

    fn check_available(&self) -> Result<(), CollaboratorError> {
        match &self.outage {
            Some(message) => Err(CollaboratorError::StoreFailed {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    const fn next_record_id(&mut self) -> i64 {
        self.last_record_id += 1;
        self.last_record_id
    }
}

impl SprintStore for InMemorySprintStore {
    fn create_sprint_with_capacity(
        &mut self,
        submission: &SprintSubmission,
    ) -> Result<i64, CollaboratorError> {
        self.check_available()?;

        self.last_sprint_id += 1;
        let sprint_id: i64 = self.last_sprint_id;

        let mut stored: SprintSubmission = submission.clone();
        for record in &mut stored.user_capacities {
            record.id = Some(self.next_record_id());
            record.sprint_id = Some(sprint_id);
        }
        self.sprints.insert(sprint_id, stored);
        Ok(sprint_id)
    }

    fn upsert_member_capacity(
        &mut self,
        sprint_id: i64,
        record: &MemberCapacityRecord,
    ) -> Result<MemberCapacityRecord, CollaboratorError> {
        self.check_available()?;
        if !self.sprints.contains_key(&sprint_id) {
            return Err(CollaboratorError::SprintNotFound { sprint_id });
        }

        let existing_id: Option<i64> = self
            .sprints
            .get(&sprint_id)
            .and_then(|sprint| {
                sprint
                    .user_capacities
                    .iter()
                    .find(|stored| stored.user_id == record.user_id)
            })
            .and_then(|stored| stored.id);
        let record_id: i64 = match existing_id {
            Some(id) => id,
            None => self.next_record_id(),
        };

        let mut persisted: MemberCapacityRecord = record.clone();
        persisted.id = Some(record_id);
        persisted.sprint_id = Some(sprint_id);

        let sprint: &mut SprintSubmission = self
            .sprints
            .get_mut(&sprint_id)
            .ok_or(CollaboratorError::SprintNotFound { sprint_id })?;
        match sprint
            .user_capacities
            .iter_mut()
            .find(|stored| stored.user_id == record.user_id)
        {
            Some(stored) => *stored = persisted.clone(),
            None => sprint.user_capacities.push(persisted.clone()),
        }
        Ok(persisted)
    }

    fn remove_member_capacity(
        &mut self,
        sprint_id: i64,
        user_id: i64,
    ) -> Result<(), CollaboratorError> {
        self.check_available()?;
        let sprint: &mut SprintSubmission = self
            .sprints
            .get_mut(&sprint_id)
            .ok_or(CollaboratorError::SprintNotFound { sprint_id })?;
        sprint
            .user_capacities
            .retain(|stored| stored.user_id != user_id);
        Ok(())
    }

    fn fetch_sprint(&self, sprint_id: i64) -> Result<SprintSubmission, CollaboratorError> {
        self.check_available()?;
        self.sprints
            .get(&sprint_id)
            .cloned()
            .ok_or(CollaboratorError::SprintNotFound { sprint_id })
    }
}
