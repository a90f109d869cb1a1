// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MemberCapacityRow, MemberId, SprintDetails, SprintParameters};
use time::macros::date;

pub fn create_test_details() -> SprintDetails {
    SprintDetails {
        name: String::from("Sprint 34"),
        team_id: Some(3),
        sprint_point: 40,
        details_remark: Some(String::from("Payments hardening")),
        created_by: Some(String::from("pm-01")),
    }
}

pub fn create_test_parameters() -> SprintParameters {
    SprintParameters::new(
        Some(date!(2025 - 08 - 01)),
        Some(date!(2025 - 08 - 14)),
        2,
        8.0,
    )
}

pub fn create_test_row(id: i64, name: &str) -> MemberCapacityRow {
    MemberCapacityRow::new(Some(MemberId::new(id)), name)
}

/// Two recomputed rows: 96 h available with 50 allocated, and 48 h
/// available (50% capacity) with 10 allocated.
pub fn create_test_roster() -> Vec<MemberCapacityRow> {
    let mut rows: Vec<MemberCapacityRow> = vec![
        create_test_row(1, "Farhana Akter").with_allocated_hours(50.0),
        create_test_row(2, "Tanvir Hossain")
            .with_capacity_percentage(50.0)
            .with_allocated_hours(10.0),
    ];
    for row in &mut rows {
        row.recompute(12, 8.0);
    }
    rows
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
