// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_input, create_test_request, create_test_session};
use crate::{
    ApiError, ApiResult, CollaboratorError, CreateSprintRequest, InMemorySprintStore,
    MemberCapacityInput, MemberCapacityRecord, SprintCapacityResponse, SprintStore,
    SprintSubmission, SubmitResponse, apply_event, open_sprint, start_session, submit,
};
use spark_capacity::{PlanningEvent, PlanningSession, RowEdit, SessionMode, SessionPhase};

/// Counts calls so tests can check which store operation ran.
#[derive(Default)]
struct RecordingStore {
    inner: InMemorySprintStore,
    creates: usize,
    upserts: Vec<(i64, i64)>,
    removals: Vec<(i64, i64)>,
}

impl SprintStore for RecordingStore {
    fn create_sprint_with_capacity(
        &mut self,
        submission: &SprintSubmission,
    ) -> Result<i64, CollaboratorError> {
        self.creates += 1;
        self.inner.create_sprint_with_capacity(submission)
    }

    fn upsert_member_capacity(
        &mut self,
        sprint_id: i64,
        record: &MemberCapacityRecord,
    ) -> Result<MemberCapacityRecord, CollaboratorError> {
        self.upserts.push((sprint_id, record.user_id));
        self.inner.upsert_member_capacity(sprint_id, record)
    }

    fn remove_member_capacity(
        &mut self,
        sprint_id: i64,
        user_id: i64,
    ) -> Result<(), CollaboratorError> {
        self.removals.push((sprint_id, user_id));
        self.inner.remove_member_capacity(sprint_id, user_id)
    }

    fn fetch_sprint(&self, sprint_id: i64) -> Result<SprintSubmission, CollaboratorError> {
        self.inner.fetch_sprint(sprint_id)
    }
}

#[test]
fn test_create_mode_submits_once() {
    let session: PlanningSession = create_test_session();
    let mut store: RecordingStore = RecordingStore::default();

    let result: ApiResult<SubmitResponse> = submit(&session, &mut store).unwrap();

    assert_eq!(store.creates, 1);
    assert!(store.upserts.is_empty());
    assert_eq!(result.response.sprint_id, 1);
    assert!(result.response.created);
    assert_eq!(result.response.rows_persisted, 2);
    assert_eq!(result.new_session.phase(), SessionPhase::Submitted);
    assert_eq!(result.new_session.mode(), SessionMode::Edit { sprint_id: 1 });

    let stored: &SprintSubmission = store.inner.sprint(1).unwrap();
    assert_eq!(stored.sprint_name, "Sprint 34");
    assert_eq!(stored.sprint_duration_days, 14);
    assert_eq!(stored.user_capacities[0].id, Some(1));
    assert_eq!(stored.user_capacities[1].sprint_id, Some(1));
    assert_eq!(
        stored.capacity_summary.as_ref().unwrap().total_allocated_hours,
        60.0
    );
}

#[test]
fn test_rows_without_member_are_not_sent() {
    let mut request: CreateSprintRequest = create_test_request();
    request.user_capacities = vec![
        create_test_input(11, "Farhana Akter", 10.0),
        MemberCapacityInput {
            user_name: String::from("To be hired"),
            ..MemberCapacityInput::default()
        },
    ];
    let session: PlanningSession = start_session(&request, 8.0).unwrap().new_session;
    let mut store: InMemorySprintStore = InMemorySprintStore::new();

    let result: ApiResult<SubmitResponse> = submit(&session, &mut store).unwrap();

    assert_eq!(result.response.rows_persisted, 1);
    assert_eq!(store.sprint(1).unwrap().user_capacities.len(), 1);
}

#[test]
fn test_edit_mode_upserts_each_member_row() {
    let mut store: RecordingStore = RecordingStore::default();
    let created: ApiResult<SubmitResponse> =
        submit(&create_test_session(), &mut store).unwrap();

    let edited: PlanningSession = apply_event(
        &created.new_session,
        PlanningEvent::EditRow {
            index: 1,
            edit: RowEdit::LeaveDays(2),
        },
    )
    .unwrap()
    .new_session;
    assert_eq!(edited.phase(), SessionPhase::Populating);

    let result: ApiResult<SubmitResponse> = submit(&edited, &mut store).unwrap();

    assert_eq!(store.creates, 1);
    assert_eq!(store.upserts, vec![(1, 11), (1, 12)]);
    assert!(store.removals.is_empty());
    assert!(!result.response.created);
    assert_eq!(result.response.rows_removed, 0);
    assert_eq!(store.inner.sprint_count(), 1);

    let stored: &SprintSubmission = store.inner.sprint(1).unwrap();
    assert_eq!(stored.user_capacities.len(), 2);
    assert_eq!(stored.user_capacities[1].leave_days, 2);
    assert_eq!(stored.user_capacities[1].available_working_hours, 80.0);
    assert_eq!(stored.user_capacities[1].id, Some(2));
}

#[test]
fn test_edit_mode_deletes_members_removed_from_roster() {
    let mut store: RecordingStore = RecordingStore::default();
    let created: ApiResult<SubmitResponse> =
        submit(&create_test_session(), &mut store).unwrap();
    let edited: PlanningSession = apply_event(
        &created.new_session,
        PlanningEvent::RemoveRow { index: 0 },
    )
    .unwrap()
    .new_session;

    let result: ApiResult<SubmitResponse> = submit(&edited, &mut store).unwrap();

    assert_eq!(store.upserts, vec![(1, 12)]);
    assert_eq!(store.removals, vec![(1, 11)]);
    assert_eq!(result.response.rows_persisted, 1);
    assert_eq!(result.response.rows_removed, 1);

    let stored: &SprintSubmission = store.inner.sprint(1).unwrap();
    assert_eq!(stored.user_capacities.len(), 1);
    assert_eq!(stored.user_capacities[0].user_id, 12);

    let reopened: ApiResult<SprintCapacityResponse> = open_sprint(&store.inner, 1).unwrap();
    assert_eq!(reopened.new_session.rows().len(), 1);
    assert_eq!(reopened.response.user_capacities[0].user_id, Some(12));
}

#[test]
fn test_invalid_plan_is_not_persisted() {
    let mut request: CreateSprintRequest = create_test_request();
    request.sprint_name = String::new();
    request.to_date = None;
    let session: PlanningSession = start_session(&request, 8.0).unwrap().new_session;
    let mut store: RecordingStore = RecordingStore::default();

    let result: Result<ApiResult<SubmitResponse>, ApiError> = submit(&session, &mut store);

    let Err(ApiError::ValidationFailed { violations }) = result else {
        panic!("expected validation failure");
    };
    let codes: Vec<&str> = violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, vec!["sprint_name_required", "to_date_required"]);
    assert_eq!(store.creates, 0);
}

#[test]
fn test_store_failure_leaves_session_untouched() {
    let session: PlanningSession = create_test_session();
    let before: PlanningSession = session.clone();
    let mut store: InMemorySprintStore = InMemorySprintStore::unavailable("disk full");

    let result: Result<ApiResult<SubmitResponse>, ApiError> = submit(&session, &mut store);

    assert_eq!(
        result.unwrap_err(),
        ApiError::Collaborator(CollaboratorError::StoreFailed {
            message: String::from("disk full")
        })
    );
    assert_eq!(session, before);
    assert_eq!(session.phase(), SessionPhase::Populating);
}

#[test]
fn test_edit_of_unknown_sprint_fails() {
    let mut request: CreateSprintRequest = create_test_request();
    request.sprint_id = Some(42);
    request.user_capacities = vec![create_test_input(11, "Farhana Akter", 10.0)];
    let session: PlanningSession = start_session(&request, 8.0).unwrap().new_session;
    let mut store: InMemorySprintStore = InMemorySprintStore::new();

    let result: Result<ApiResult<SubmitResponse>, ApiError> = submit(&session, &mut store);

    assert_eq!(
        result.unwrap_err(),
        ApiError::Collaborator(CollaboratorError::SprintNotFound { sprint_id: 42 })
    );
}

#[test]
fn test_open_sprint_restores_stored_plan() {
    let mut store: InMemorySprintStore = InMemorySprintStore::new();
    let created: ApiResult<SubmitResponse> =
        submit(&create_test_session(), &mut store).unwrap();

    let opened: ApiResult<SprintCapacityResponse> =
        open_sprint(&store, created.response.sprint_id).unwrap();

    assert_eq!(opened.response.sprint_id, Some(1));
    assert_eq!(opened.response.phase, "populating");
    assert_eq!(opened.response.working_days, 12);
    assert_eq!(opened.response.user_capacities.len(), 2);
    assert_eq!(
        opened.response.capacity_summary.unwrap().total_allocated_hours,
        60.0
    );
}

#[test]
fn test_open_unknown_sprint_fails() {
    let store: InMemorySprintStore = InMemorySprintStore::new();

    let result: Result<ApiResult<SprintCapacityResponse>, ApiError> = open_sprint(&store, 7);

    assert!(matches!(
        result,
        Err(ApiError::Collaborator(CollaboratorError::SprintNotFound {
            sprint_id: 7
        }))
    ));
}
