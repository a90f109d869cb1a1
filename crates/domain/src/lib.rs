// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod duration;
mod error;
mod policy;
mod progress;
mod row_capacity;
mod summary;
mod types;
mod utilization;
mod validation;

#[cfg(test)]
mod tests;

pub use duration::{
    SprintDuration, calendar_days_between, parse_sprint_date, sprint_duration, working_days,
};
pub use progress::{MemberProgress, TaskRecord, member_progress};
pub use row_capacity::{DerivedFields, compute_row, effective_daily_hours};
pub use summary::{CapacitySummary, aggregate};
pub use utilization::{UtilizationBand, round_to_hundredths};

// Re-export public types
pub use error::DomainError;
pub use policy::{
    DEFAULT_CAPACITY_PERCENTAGE, DEFAULT_DAILY_HOURS, FALLBACK_WORKING_DAYS,
    HIGH_UTILIZATION_THRESHOLD, MAX_CAPACITY_PERCENTAGE, MAX_DAILY_WORKING_HOURS,
    MAX_REMARK_LENGTH, MAX_SPRINT_NAME_LENGTH, MIN_CAPACITY_PERCENTAGE, MIN_DEFAULT_DAILY_HOURS,
    OVER_ALLOCATION_THRESHOLD, UNDER_UTILIZATION_THRESHOLD,
};
pub use types::{MemberCapacityRow, MemberId, SprintDetails, SprintParameters, TeamMember};
pub use validation::{Violation, ViolationCode, validate_sprint_plan};
