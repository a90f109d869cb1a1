// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-member capacity derivation.

use crate::policy::{DEFAULT_CAPACITY_PERCENTAGE, DEFAULT_DAILY_HOURS, OVER_ALLOCATION_THRESHOLD};
use crate::types::MemberCapacityRow;
use crate::utilization::{UtilizationBand, round_to_hundredths};
use serde::Serialize;

/// Figures derived from a row's inputs and the sprint's working days.
///
/// Values are kept unrounded; use the `*_display` accessors for the two
/// decimal place figures shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedFields {
    working_days: u32,
    effective_daily_hours: f64,
    total_working_hours: f64,
    hours_after_leave: f64,
    available_working_hours: f64,
    allocated_hours: f64,
    remaining_hours: f64,
    utilization_percentage: f64,
    is_over_allocated: bool,
}

impl DerivedFields {
    /// Sprint working days the row was computed against.
    #[must_use]
    pub const fn working_days(&self) -> u32 {
        self.working_days
    }

    /// The daily hours actually used (row override or sprint default).
    #[must_use]
    pub const fn effective_daily_hours(&self) -> f64 {
        self.effective_daily_hours
    }

    /// Working days times daily hours, before leave and capacity.
    #[must_use]
    pub const fn total_working_hours(&self) -> f64 {
        self.total_working_hours
    }

    /// Hours left after leave, before the capacity percentage is applied.
    #[must_use]
    pub const fn hours_after_leave(&self) -> f64 {
        self.hours_after_leave
    }

    /// Hours the member can contribute to the sprint.
    #[must_use]
    pub const fn available_working_hours(&self) -> f64 {
        self.available_working_hours
    }

    /// Allocated hours as used by the arithmetic.
    #[must_use]
    pub const fn allocated_hours(&self) -> f64 {
        self.allocated_hours
    }

    /// Available minus allocated hours. Negative when over-allocated.
    #[must_use]
    pub const fn remaining_hours(&self) -> f64 {
        self.remaining_hours
    }

    /// Allocated hours as a percentage of available hours, unrounded.
    #[must_use]
    pub const fn utilization_percentage(&self) -> f64 {
        self.utilization_percentage
    }

    /// Utilization rounded to two decimal places.
    #[must_use]
    pub fn utilization_display(&self) -> f64 {
        round_to_hundredths(self.utilization_percentage)
    }

    /// Whether more hours are allocated than are available.
    #[must_use]
    pub const fn is_over_allocated(&self) -> bool {
        self.is_over_allocated
    }

    /// Display band for the utilization.
    #[must_use]
    pub fn band(&self) -> UtilizationBand {
        UtilizationBand::classify(self.utilization_percentage)
    }
}

/// Resolves the daily hours for a row.
///
/// An override that is absent, not finite or not positive falls back to the
/// sprint default; a default with the same problems falls back to
/// [`DEFAULT_DAILY_HOURS`].
#[must_use]
pub fn effective_daily_hours(row_override: Option<f64>, default_daily_hours: f64) -> f64 {
    let usable = |hours: f64| hours.is_finite() && hours > 0.0;

    match row_override {
        Some(hours) if usable(hours) => hours,
        _ if usable(default_daily_hours) => default_daily_hours,
        _ => DEFAULT_DAILY_HOURS,
    }
}

/// Computes the derived fields for one row.
///
/// Non-numeric capacity counts as [`DEFAULT_CAPACITY_PERCENTAGE`] and
/// non-numeric allocation as zero. Negative capacity, leave or allocation
/// count as zero in the arithmetic; the validator still reports them.
///
/// # Arguments
///
/// * `row` - The row whose inputs are used
/// * `working_days` - Sprint working days (after holidays)
/// * `default_daily_hours` - The sprint's default daily hours
#[must_use]
pub fn compute_row(
    row: &MemberCapacityRow,
    working_days: u32,
    default_daily_hours: f64,
) -> DerivedFields {
    let daily_hours: f64 = effective_daily_hours(row.daily_working_hours, default_daily_hours);

    let capacity_percentage: f64 = if row.capacity_percentage.is_finite() {
        row.capacity_percentage.max(0.0)
    } else {
        DEFAULT_CAPACITY_PERCENTAGE
    };
    let allocated_hours: f64 = if row.allocated_hours.is_finite() {
        row.allocated_hours.max(0.0)
    } else {
        0.0
    };

    let days_present: u32 = working_days.saturating_sub(row.effective_leave_days());

    let total_working_hours: f64 = f64::from(working_days) * daily_hours;
    let hours_after_leave: f64 = f64::from(days_present) * daily_hours;
    let available_working_hours: f64 = hours_after_leave * (capacity_percentage / 100.0);

    let utilization_percentage: f64 = if available_working_hours > 0.0 {
        (allocated_hours / available_working_hours) * 100.0
    } else {
        0.0
    };

    DerivedFields {
        working_days,
        effective_daily_hours: daily_hours,
        total_working_hours,
        hours_after_leave,
        available_working_hours,
        allocated_hours,
        remaining_hours: available_working_hours - allocated_hours,
        utilization_percentage,
        is_over_allocated: utilization_percentage > OVER_ALLOCATION_THRESHOLD,
    }
}
