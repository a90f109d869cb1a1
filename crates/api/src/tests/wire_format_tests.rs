// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_directory, create_test_session};
use crate::{
    ApiError, CreateSprintRequest, InMemoryTeamDirectory, SprintCapacityResponse,
    SprintProgressResponse, SprintSubmission, TeamDirectory, ViolationResponse, snapshot,
    sprint_progress,
};
use serde_json::{Value, json};
use spark_capacity_domain::{MemberId, TaskRecord, TeamMember};

#[test]
fn test_request_accepts_console_field_names() {
    let request: CreateSprintRequest = serde_json::from_value(json!({
        "sprintName": "Sprint 34",
        "fromDate": "2025-08-01",
        "toDate": "2025-08-14",
        "tramId": 3,
        "noOfHolidays": 2,
        "defaultDailyHours": 7.5,
        "userCapacities": [
            { "userId": 11, "userName": "Farhana Akter", "userCapacityPercentage": 80, "allocatedHours": 30 }
        ]
    }))
    .unwrap();

    assert_eq!(request.tram_id, Some(3));
    assert_eq!(request.no_of_holidays, Some(2));
    assert_eq!(request.user_capacities[0].user_capacity_percentage, Some(80.0));
    assert_eq!(request.user_capacities[0].leave_days, None);
    assert_eq!(request.rows()[0].member_id, Some(MemberId::new(11)));
    assert_eq!(request.rows()[0].leave_days, 0);
}

#[test]
fn test_request_accepts_team_id_alias() {
    let request: CreateSprintRequest =
        serde_json::from_value(json!({ "sprintName": "S", "teamId": 5 })).unwrap();

    assert_eq!(request.tram_id, Some(5));
    assert!(request.user_capacities.is_empty());
}

#[test]
fn test_response_serializes_dates_and_camel_case() {
    let response: SprintCapacityResponse = snapshot(&create_test_session());

    let value: Value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["fromDate"], "2025-08-01");
    assert_eq!(value["toDate"], "2025-08-14");
    assert_eq!(value["tramId"], 3);
    assert_eq!(value["userCapacities"][0]["userName"], "Farhana Akter");
    assert_eq!(value["userCapacities"][1]["utilizationBand"], "under-utilized");
    assert_eq!(value["capacitySummary"]["totalCapacityHours"], 192.0);
    assert_eq!(value["capacitySummary"]["workingDays"], 12);
}

#[test]
fn test_submission_round_trips_through_json() {
    let submission: SprintSubmission = SprintSubmission::from_session(&create_test_session());

    let text: String = serde_json::to_string(&submission).unwrap();
    let parsed: SprintSubmission = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, submission);
}

#[test]
fn test_team_directory_fixture_parses() {
    let directory: InMemoryTeamDirectory = serde_json::from_value(json!({
        "teams": {
            "3": [ { "userId": 11, "userName": "Farhana Akter" } ]
        }
    }))
    .unwrap();

    assert_eq!(
        directory,
        InMemoryTeamDirectory::new()
            .with_team(3, &[TeamMember::new(MemberId::new(11), "Farhana Akter")])
    );
    assert_eq!(
        directory.get_team_members(3).unwrap(),
        vec![TeamMember::new(MemberId::new(11), "Farhana Akter")]
    );
}

#[test]
fn test_team_directory_serializes_camel_case() {
    let directory: InMemoryTeamDirectory = create_test_directory();

    let value: Value = serde_json::to_value(&directory).unwrap();

    assert_eq!(value["teams"]["3"][0]["userId"], 11);
    assert_eq!(value["teams"]["3"][1]["userName"], "Tanvir Hossain");
    assert!(value["teams"]["3"][0].get("member_id").is_none());
}

#[test]
fn test_progress_response_uses_camel_case() {
    let tasks: Vec<TaskRecord> = vec![TaskRecord::new(Some(MemberId::new(11)), Some(5), "DONE")];
    let progress: SprintProgressResponse = sprint_progress(&create_test_session(), &tasks);

    let value: Value = serde_json::to_value(&progress).unwrap();

    assert_eq!(value["sprintDurationDays"], 14);
    assert_eq!(value["members"][0]["userId"], 11);
    assert_eq!(value["members"][0]["userName"], "Farhana Akter");
    assert_eq!(value["members"][0]["pointsDone"], 5);
    assert_eq!(value["members"][0]["isOverAllocated"], false);
    assert!(value["members"][0].get("display_name").is_none());
}

#[test]
fn test_validation_error_display_lists_messages() {
    let err: ApiError = ApiError::ValidationFailed {
        violations: vec![ViolationResponse {
            code: String::from("team_required"),
            field: String::from("tramId"),
            row_index: None,
            message: String::from("A team must be selected"),
        }],
    };

    assert_eq!(
        err.to_string(),
        "Validation failed with 1 violation(s); A team must be selected"
    );
}
