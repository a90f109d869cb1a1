// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiResult, CreateSprintRequest, InMemoryTeamDirectory, MemberCapacityInput,
    SprintCapacityResponse, start_session,
};
use spark_capacity::PlanningSession;
use spark_capacity_domain::{MemberId, TeamMember};

pub fn create_test_request() -> CreateSprintRequest {
    CreateSprintRequest {
        sprint_id: None,
        sprint_name: String::from("Sprint 34"),
        from_date: Some(String::from("2025-08-01")),
        to_date: Some(String::from("2025-08-14T00:00:00.000Z")),
        tram_id: Some(3),
        sprint_point: Some(40),
        details_remark: None,
        create_by: Some(String::from("pm-01")),
        no_of_holidays: Some(2),
        default_daily_hours: Some(8.0),
        user_capacities: Vec::new(),
    }
}

pub fn create_test_input(user_id: i64, name: &str, allocated_hours: f64) -> MemberCapacityInput {
    MemberCapacityInput {
        user_id: Some(user_id),
        user_name: name.to_string(),
        allocated_hours: Some(allocated_hours),
        ..MemberCapacityInput::default()
    }
}

pub fn create_test_directory() -> InMemoryTeamDirectory {
    InMemoryTeamDirectory::new().with_team(
        3,
        &[
            TeamMember::new(MemberId::new(11), "Farhana Akter"),
            TeamMember::new(MemberId::new(12), "Tanvir Hossain"),
        ],
    )
}

/// A started session with two members: 50 and 10 allocated hours.
pub fn create_test_session() -> PlanningSession {
    let mut request: CreateSprintRequest = create_test_request();
    request.user_capacities = vec![
        create_test_input(11, "Farhana Akter", 50.0),
        create_test_input(12, "Tanvir Hossain", 10.0),
    ];
    let result: ApiResult<SprintCapacityResponse> = start_session(&request, 8.0).unwrap();
    result.new_session
}
