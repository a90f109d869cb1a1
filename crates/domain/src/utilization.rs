// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::policy::{
    HIGH_UTILIZATION_THRESHOLD, OVER_ALLOCATION_THRESHOLD, UNDER_UTILIZATION_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rounds a value to two decimal places for display.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display classification of a member's utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilizationBand {
    /// Above 100%.
    OverAllocated,
    /// Above 80%, up to 100%.
    #[serde(rename = "high-utilization")]
    High,
    /// Between 50% and 80%.
    Optimal,
    /// Below 50%.
    UnderUtilized,
}

impl UtilizationBand {
    /// Classifies a utilization percentage.
    #[must_use]
    pub fn classify(utilization_percentage: f64) -> Self {
        if utilization_percentage > OVER_ALLOCATION_THRESHOLD {
            Self::OverAllocated
        } else if utilization_percentage > HIGH_UTILIZATION_THRESHOLD {
            Self::High
        } else if utilization_percentage < UNDER_UTILIZATION_THRESHOLD {
            Self::UnderUtilized
        } else {
            Self::Optimal
        }
    }

    /// Returns the stable display name of this band.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OverAllocated => "over-allocated",
            Self::High => "high-utilization",
            Self::Optimal => "optimal",
            Self::UnderUtilized => "under-utilized",
        }
    }
}

impl std::fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UtilizationBand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "over-allocated" => Ok(Self::OverAllocated),
            "high-utilization" => Ok(Self::High),
            "optimal" => Ok(Self::Optimal),
            "under-utilized" => Ok(Self::UnderUtilized),
            _ => Err(DomainError::UnknownUtilizationBand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(UtilizationBand::classify(125.0), UtilizationBand::OverAllocated);
        assert_eq!(UtilizationBand::classify(100.0), UtilizationBand::High);
        assert_eq!(UtilizationBand::classify(80.01), UtilizationBand::High);
        assert_eq!(UtilizationBand::classify(80.0), UtilizationBand::Optimal);
        assert_eq!(UtilizationBand::classify(50.0), UtilizationBand::Optimal);
        assert_eq!(UtilizationBand::classify(49.99), UtilizationBand::UnderUtilized);
        assert_eq!(UtilizationBand::classify(0.0), UtilizationBand::UnderUtilized);
    }

    #[test]
    fn test_band_string_round_trip() {
        for band in [
            UtilizationBand::OverAllocated,
            UtilizationBand::High,
            UtilizationBand::Optimal,
            UtilizationBand::UnderUtilized,
        ] {
            assert_eq!(band.as_str().parse::<UtilizationBand>(), Ok(band));
        }
        assert!("busy".parse::<UtilizationBand>().is_err());
    }

    #[test]
    fn test_round_to_hundredths() {
        assert!((round_to_hundredths(41.666_666) - 41.67).abs() < 1e-12);
        assert!((round_to_hundredths(125.0) - 125.0).abs() < 1e-12);
        assert!((round_to_hundredths(-7.12345) + 7.12).abs() < 1e-12);
    }
}
