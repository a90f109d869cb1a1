// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity planning policy values.
//!
//! These are the fixed numbers the calculators and the validator agree on.
//! They are not scheduling defaults; `FALLBACK_WORKING_DAYS` in particular
//! only keeps derived figures meaningful while a date range is incomplete.

/// Working days assumed while the sprint date range is absent or unparsable.
pub const FALLBACK_WORKING_DAYS: u32 = 10;

/// Hours per day used when neither the row nor the sprint supplies a usable value.
pub const DEFAULT_DAILY_HOURS: f64 = 8.0;

/// Capacity percentage assigned to new rows and to non-numeric input.
pub const DEFAULT_CAPACITY_PERCENTAGE: f64 = 100.0;

/// Members below this utilization are counted as under-utilized.
pub const UNDER_UTILIZATION_THRESHOLD: f64 = 50.0;

/// Members above this utilization are shown as highly utilized.
pub const HIGH_UTILIZATION_THRESHOLD: f64 = 80.0;

/// Utilization above this value marks a member as over-allocated.
pub const OVER_ALLOCATION_THRESHOLD: f64 = 100.0;

/// Maximum sprint name length, in characters.
pub const MAX_SPRINT_NAME_LENGTH: usize = 100;

/// Maximum sprint remark length, in characters.
pub const MAX_REMARK_LENGTH: usize = 1000;

/// Upper bound for any daily working hours value.
pub const MAX_DAILY_WORKING_HOURS: f64 = 24.0;

/// Lower bound for the sprint-wide default daily hours.
pub const MIN_DEFAULT_DAILY_HOURS: f64 = 1.0;

/// Capacity percentage bounds accepted by the validator.
pub const MIN_CAPACITY_PERCENTAGE: f64 = 1.0;

/// See [`MIN_CAPACITY_PERCENTAGE`].
pub const MAX_CAPACITY_PERCENTAGE: f64 = 100.0;
