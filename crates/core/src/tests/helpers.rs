// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DetailsEdit, PlanningEvent, PlanningSession, Transition, apply};
use spark_capacity_domain::{
    MemberCapacityRow, MemberId, SprintDetails, SprintParameters, TeamMember,
};
use time::macros::date;

pub fn create_test_parameters() -> SprintParameters {
    SprintParameters::new(
        Some(date!(2025 - 08 - 01)),
        Some(date!(2025 - 08 - 14)),
        2,
        8.0,
    )
}

pub fn create_test_details() -> SprintDetails {
    SprintDetails {
        name: String::from("Sprint 34"),
        team_id: Some(3),
        sprint_point: 40,
        details_remark: None,
        created_by: Some(String::from("pm-01")),
    }
}

pub fn create_test_members() -> Vec<TeamMember> {
    vec![
        TeamMember::new(MemberId::new(11), "Farhana Akter"),
        TeamMember::new(MemberId::new(12), "Tanvir Hossain"),
        TeamMember::new(MemberId::new(13), "Rafiq Islam"),
    ]
}

pub fn create_test_row(id: i64, name: &str) -> MemberCapacityRow {
    MemberCapacityRow::new(Some(MemberId::new(id)), name)
}

/// Applies `event`, panicking on rejection.
pub fn step(session: &PlanningSession, event: PlanningEvent) -> Transition {
    apply(session, event).unwrap()
}

/// A session with the test parameters, a name, team 3 and the three test
/// members at default capacity.
pub fn create_populated_session() -> PlanningSession {
    let mut session: PlanningSession = PlanningSession::new(create_test_parameters());
    for edit in [
        DetailsEdit::Name(String::from("Sprint 34")),
        DetailsEdit::Team(Some(3)),
    ] {
        session = step(&session, PlanningEvent::EditDetails(edit)).new_session;
    }
    step(
        &session,
        PlanningEvent::AddTeamMembers {
            members: create_test_members(),
        },
    )
    .new_session
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
