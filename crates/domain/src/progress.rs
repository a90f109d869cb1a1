// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planned capacity joined with delivered work.
//!
//! Capacity rows describe what a member can take on; task records describe
//! what was assigned and finished. This module combines the two into one
//! per-member progress line.

use crate::row_capacity::DerivedFields;
use crate::types::{MemberCapacityRow, MemberId};
use crate::utilization::round_to_hundredths;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A task assigned within the sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// The assigned member, if any.
    pub assignee: Option<MemberId>,
    /// Story points, if estimated.
    pub points: Option<u32>,
    /// Workflow status as stored by the task board.
    pub status: String,
}

impl TaskRecord {
    /// Creates a new `TaskRecord`.
    #[must_use]
    pub fn new(assignee: Option<MemberId>, points: Option<u32>, status: &str) -> Self {
        Self {
            assignee,
            points,
            status: status.to_string(),
        }
    }

    /// Whether the task is finished. Status comparison ignores case.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status.eq_ignore_ascii_case("DONE")
    }
}

/// One member's capacity and delivery figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberProgress {
    /// The member.
    pub member_id: MemberId,
    /// Display name from the roster, or `Member <id>` when the member has
    /// tasks but no capacity row.
    pub display_name: String,
    /// Total working hours before leave.
    pub total_working_hours: f64,
    /// Hours available after leave and capacity.
    pub available_working_hours: f64,
    /// Hours allocated.
    pub allocated_hours: f64,
    /// Available minus allocated.
    pub remaining_hours: f64,
    /// Utilization rounded to two decimals.
    pub utilization_percentage: f64,
    /// Over-allocation flag from the capacity row.
    pub over_allocated: bool,
    /// Tasks assigned.
    pub tasks_total: u32,
    /// Tasks finished.
    pub tasks_done: u32,
    /// Points assigned.
    pub points_total: u32,
    /// Points finished.
    pub points_done: u32,
    /// Finished tasks as a whole percentage.
    pub completion_percentage: u32,
    /// Finished points as a whole percentage.
    pub points_completion_percentage: u32,
    /// Finished points per sprint day, two decimals.
    pub velocity_points_per_day: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct TaskTally {
    tasks_total: u32,
    tasks_done: u32,
    points_total: u32,
    points_done: u32,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) * 100.0 / f64::from(whole)).round() as u32
}

/// Builds per-member progress for a sprint.
///
/// Members are the union of roster members and task assignees. Rows without
/// a member and unassigned tasks are skipped. Output is sorted by display
/// name, then member id.
///
/// # Arguments
///
/// * `rows` - The recomputed capacity roster
/// * `tasks` - Tasks assigned within the sprint
/// * `sprint_duration_days` - Calendar days of the sprint, for velocity
#[must_use]
pub fn member_progress(
    rows: &[MemberCapacityRow],
    tasks: &[TaskRecord],
    sprint_duration_days: u32,
) -> Vec<MemberProgress> {
    let rows_by_member: BTreeMap<MemberId, &MemberCapacityRow> = rows
        .iter()
        .filter_map(|row| row.member_id.map(|id| (id, row)))
        .collect();

    let mut tallies: BTreeMap<MemberId, TaskTally> = BTreeMap::new();
    for task in tasks {
        let Some(assignee) = task.assignee else {
            continue;
        };
        let tally: &mut TaskTally = tallies.entry(assignee).or_default();
        let points: u32 = task.points.unwrap_or(0);
        tally.tasks_total += 1;
        tally.points_total = tally.points_total.saturating_add(points);
        if task.is_done() {
            tally.tasks_done += 1;
            tally.points_done = tally.points_done.saturating_add(points);
        }
    }

    let members: BTreeSet<MemberId> = rows_by_member
        .keys()
        .chain(tallies.keys())
        .copied()
        .collect();

    let mut progress: Vec<MemberProgress> = members
        .into_iter()
        .map(|member_id| {
            let tally: TaskTally = tallies.get(&member_id).copied().unwrap_or_default();
            let velocity: f64 = if sprint_duration_days > 0 {
                round_to_hundredths(f64::from(tally.points_done) / f64::from(sprint_duration_days))
            } else {
                0.0
            };

            let (display_name, derived): (String, Option<DerivedFields>) =
                match rows_by_member.get(&member_id) {
                    Some(row) => (row.display_name.clone(), Some(*row.derived())),
                    None => (format!("Member {member_id}"), None),
                };
            let available: f64 = derived.map_or(0.0, |d| d.available_working_hours());
            let allocated: f64 = derived.map_or(0.0, |d| d.allocated_hours());

            MemberProgress {
                member_id,
                display_name,
                total_working_hours: derived.map_or(0.0, |d| d.total_working_hours()),
                available_working_hours: available,
                allocated_hours: allocated,
                remaining_hours: available - allocated,
                utilization_percentage: derived.map_or(0.0, |d| d.utilization_display()),
                over_allocated: derived.is_some_and(|d| d.is_over_allocated()),
                tasks_total: tally.tasks_total,
                tasks_done: tally.tasks_done,
                points_total: tally.points_total,
                points_done: tally.points_done,
                completion_percentage: whole_percentage(tally.tasks_done, tally.tasks_total),
                points_completion_percentage: whole_percentage(
                    tally.points_done,
                    tally.points_total,
                ),
                velocity_points_per_day: velocity,
            }
        })
        .collect();

    progress.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then(a.member_id.cmp(&b.member_id))
    });
    progress
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, allocated: f64) -> MemberCapacityRow {
        let mut row: MemberCapacityRow =
            MemberCapacityRow::new(Some(MemberId::new(id)), name).with_allocated_hours(allocated);
        row.recompute(10, 8.0);
        row
    }

    #[test]
    fn test_progress_combines_rows_and_tasks() {
        let rows: Vec<MemberCapacityRow> = vec![row(1, "Zara", 40.0), row(2, "Adil", 100.0)];
        let tasks: Vec<TaskRecord> = vec![
            TaskRecord::new(Some(MemberId::new(1)), Some(5), "DONE"),
            TaskRecord::new(Some(MemberId::new(1)), Some(3), "In Progress"),
            TaskRecord::new(Some(MemberId::new(1)), None, "done"),
            TaskRecord::new(Some(MemberId::new(2)), Some(8), "To Do"),
        ];

        let progress: Vec<MemberProgress> = member_progress(&rows, &tasks, 14);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].display_name, "Adil");
        assert!(progress[0].over_allocated);
        assert_eq!(progress[0].completion_percentage, 0);

        let zara: &MemberProgress = &progress[1];
        assert_eq!(zara.tasks_total, 3);
        assert_eq!(zara.tasks_done, 2);
        assert_eq!(zara.points_total, 8);
        assert_eq!(zara.points_done, 5);
        assert_eq!(zara.completion_percentage, 67);
        assert_eq!(zara.points_completion_percentage, 63);
        assert!((zara.velocity_points_per_day - 0.36).abs() < 1e-9);
        assert!((zara.utilization_percentage - 50.0).abs() < 1e-9);
        assert!((zara.remaining_hours - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_assignee_without_row_gets_placeholder_name() {
        let tasks: Vec<TaskRecord> = vec![TaskRecord::new(Some(MemberId::new(42)), Some(2), "DONE")];

        let progress: Vec<MemberProgress> = member_progress(&[], &tasks, 10);

        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].display_name, "Member 42");
        assert!((progress[0].available_working_hours).abs() < 1e-9);
        assert_eq!(progress[0].points_done, 2);
    }

    #[test]
    fn test_unassigned_tasks_are_skipped() {
        let rows: Vec<MemberCapacityRow> = vec![row(1, "Zara", 0.0)];
        let tasks: Vec<TaskRecord> = vec![TaskRecord::new(None, Some(13), "DONE")];

        let progress: Vec<MemberProgress> = member_progress(&rows, &tasks, 10);

        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].tasks_total, 0);
        assert_eq!(progress[0].completion_percentage, 0);
    }

    #[test]
    fn test_zero_duration_has_zero_velocity() {
        let tasks: Vec<TaskRecord> = vec![TaskRecord::new(Some(MemberId::new(1)), Some(5), "DONE")];
        let progress: Vec<MemberProgress> = member_progress(&[], &tasks, 0);
        assert!((progress[0].velocity_points_per_day).abs() < 1e-9);
    }
}
