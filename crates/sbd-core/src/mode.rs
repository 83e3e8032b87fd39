// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SbdError;
use std::str::FromStr;

/// Per-segment regression specification.
///
/// Fixed for a whole run; it determines the design matrix of every segment
/// fit and the parameter count charged by the BIC penalty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegressionMode {
    /// Fit a level only.
    Constant,
    /// Fit a level and a linear time trend.
    ConstantTrend,
}

impl RegressionMode {
    /// Parses the external mode string, case-insensitively: `"c"` or `"ct"`.
    pub fn parse(raw: &str) -> Result<Self, SbdError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Self::Constant),
            "ct" => Ok(Self::ConstantTrend),
            _ => Err(SbdError::invalid_regression_mode(raw)),
        }
    }

    /// Free parameters estimated per segment: 1 for `c`, 2 for `ct`.
    pub const fn params_per_segment(&self) -> usize {
        match self {
            Self::Constant => 1,
            Self::ConstantTrend => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "c",
            Self::ConstantTrend => "ct",
        }
    }
}

impl FromStr for RegressionMode {
    type Err = SbdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
