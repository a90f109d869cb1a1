// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team-level capacity roll-up.
//!
//! The summary is a pure view over the roster's derived fields. It is never
//! stored independently and never re-derives row figures from raw inputs,
//! so the summary and the per-row figures a user sees cannot disagree.

use crate::policy::{OVER_ALLOCATION_THRESHOLD, UNDER_UTILIZATION_THRESHOLD};
use crate::row_capacity::DerivedFields;
use crate::types::MemberCapacityRow;
use crate::utilization::round_to_hundredths;
use serde::Serialize;

/// Aggregate capacity and risk figures for a sprint roster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacitySummary {
    /// Rows in the roster.
    pub total_members: usize,
    /// Rows with a capacity percentage above zero.
    pub active_members: usize,
    /// Rows with at least one leave day.
    pub members_on_leave: usize,
    /// Sum of available working hours.
    pub total_capacity_hours: f64,
    /// Sum of allocated hours.
    pub total_allocated_hours: f64,
    /// Capacity minus allocation.
    pub total_remaining_hours: f64,
    /// Allocated hours as a percentage of capacity (0 without capacity).
    pub average_utilization: f64,
    /// Rows flagged as over-allocated.
    pub over_allocated_members: usize,
    /// Rows whose displayed utilization is below 50%.
    pub under_utilized_members: usize,
    /// Team over 100% or any member over-allocated.
    pub has_capacity_risks: bool,
    /// `100 - |100 - average_utilization|`.
    pub team_efficiency: f64,
    /// Sum of total working hours before leave and capacity.
    pub total_potential_hours: f64,
    /// Hours removed by leave days.
    pub total_lost_hours_to_leave: f64,
    /// Hours removed by capacity percentages below 100.
    pub total_lost_hours_to_capacity: f64,
    /// Sum of leave days.
    pub total_leave_days: u32,
}

impl CapacitySummary {
    /// Returns a copy with every hour and percentage rounded for display.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            total_capacity_hours: round_to_hundredths(self.total_capacity_hours),
            total_allocated_hours: round_to_hundredths(self.total_allocated_hours),
            total_remaining_hours: round_to_hundredths(self.total_remaining_hours),
            average_utilization: round_to_hundredths(self.average_utilization),
            team_efficiency: round_to_hundredths(self.team_efficiency),
            total_potential_hours: round_to_hundredths(self.total_potential_hours),
            total_lost_hours_to_leave: round_to_hundredths(self.total_lost_hours_to_leave),
            total_lost_hours_to_capacity: round_to_hundredths(self.total_lost_hours_to_capacity),
            ..*self
        }
    }
}

/// Aggregates a roster into a capacity summary.
///
/// Returns `None` for an empty roster: "nothing to plan yet" is distinct
/// from a team at 0% utilization.
///
/// # Arguments
///
/// * `rows` - The roster, each row already recomputed
#[must_use]
pub fn aggregate(rows: &[MemberCapacityRow]) -> Option<CapacitySummary> {
    if rows.is_empty() {
        return None;
    }

    let mut total_capacity_hours: f64 = 0.0;
    let mut total_allocated_hours: f64 = 0.0;
    let mut total_potential_hours: f64 = 0.0;
    let mut total_lost_hours_to_leave: f64 = 0.0;
    let mut total_lost_hours_to_capacity: f64 = 0.0;
    let mut total_leave_days: u32 = 0;
    let mut active_members: usize = 0;
    let mut members_on_leave: usize = 0;
    let mut over_allocated_members: usize = 0;
    let mut under_utilized_members: usize = 0;

    for row in rows {
        let derived: &DerivedFields = row.derived();

        total_capacity_hours += derived.available_working_hours();
        total_allocated_hours += derived.allocated_hours();
        total_potential_hours += derived.total_working_hours();
        total_lost_hours_to_leave += derived.total_working_hours() - derived.hours_after_leave();
        total_lost_hours_to_capacity +=
            derived.hours_after_leave() - derived.available_working_hours();
        total_leave_days = total_leave_days.saturating_add(row.effective_leave_days());

        if row.capacity_percentage > 0.0 {
            active_members += 1;
        }
        if row.leave_days > 0 {
            members_on_leave += 1;
        }
        if derived.is_over_allocated() {
            over_allocated_members += 1;
        }
        if derived.utilization_display() < UNDER_UTILIZATION_THRESHOLD {
            under_utilized_members += 1;
        }
    }

    let average_utilization: f64 = if total_capacity_hours > 0.0 {
        (total_allocated_hours / total_capacity_hours) * 100.0
    } else {
        0.0
    };

    Some(CapacitySummary {
        total_members: rows.len(),
        active_members,
        members_on_leave,
        total_capacity_hours,
        total_allocated_hours,
        total_remaining_hours: total_capacity_hours - total_allocated_hours,
        average_utilization,
        over_allocated_members,
        under_utilized_members,
        has_capacity_risks: average_utilization > OVER_ALLOCATION_THRESHOLD
            || over_allocated_members > 0,
        team_efficiency: 100.0 - (100.0 - average_utilization).abs(),
        total_potential_hours,
        total_lost_hours_to_leave,
        total_lost_hours_to_capacity,
        total_leave_days,
    })
}
