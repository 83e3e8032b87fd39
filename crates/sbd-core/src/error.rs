// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::fmt;

/// Error taxonomy shared by every sbd crate.
///
/// `SeriesTooShort` is recoverable at batch granularity: the batch driver
/// records it per series and keeps going. Everything else aborts the call it
/// occurred in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SbdError {
    /// Shape or configuration validation failure.
    InvalidInput(String),
    /// Regression mode string outside `{"c", "ct"}`. Fatal, configuration-level.
    InvalidRegressionMode(String),
    /// Series shorter than the minimum segment length; no partition is feasible.
    SeriesTooShort { n: usize, min_segment_len: usize },
    /// Internal invariant violation: a queried segment produced a non-finite cost.
    DegenerateSegment(String),
    /// Cooperative cancellation was requested.
    Cancelled,
}

impl SbdError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_regression_mode(raw: impl Into<String>) -> Self {
        Self::InvalidRegressionMode(raw.into())
    }

    pub fn series_too_short(n: usize, min_segment_len: usize) -> Self {
        Self::SeriesTooShort { n, min_segment_len }
    }

    pub fn degenerate_segment(message: impl Into<String>) -> Self {
        Self::DegenerateSegment(message.into())
    }

    pub const fn cancelled() -> Self {
        Self::Cancelled
    }
}

impl fmt::Display for SbdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::InvalidRegressionMode(raw) => {
                write!(f, "invalid regression mode: {raw:?}; expected \"c\" or \"ct\"")
            }
            Self::SeriesTooShort { n, min_segment_len } => write!(
                f,
                "series too short: n={n}, min_segment_len={min_segment_len}"
            ),
            Self::DegenerateSegment(message) => write!(f, "degenerate segment: {message}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for SbdError {}
