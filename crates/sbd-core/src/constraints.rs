// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SbdError;

/// Search constraints shared by all segmentation runs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraints {
    /// Minimum admissible segment length, `>= 1`.
    pub min_segment_len: usize,
    /// Maximum number of interior breaks the sweep evaluates, `>= 0`.
    pub max_breaks: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_segment_len: 1,
            max_breaks: 5,
        }
    }
}

/// Constraints resolved against a concrete series length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConstraints {
    pub min_segment_len: usize,
    /// Largest segment count the sweep evaluates: every `m` in
    /// `1..=max_segments` satisfies `m * min_segment_len <= n`.
    pub max_segments: usize,
}

/// Validates `constraints` against series length `n`.
///
/// A series shorter than `min_segment_len` admits no partition at all and
/// fails with `SeriesTooShort`; larger `max_breaks` values are clamped to the
/// counts `n` can actually hold rather than erroring.
pub fn validate_constraints(
    constraints: &Constraints,
    n: usize,
) -> Result<ValidatedConstraints, SbdError> {
    if constraints.min_segment_len == 0 {
        return Err(SbdError::invalid_input(
            "constraints.min_segment_len must be >= 1; got 0",
        ));
    }
    if n < constraints.min_segment_len {
        return Err(SbdError::series_too_short(n, constraints.min_segment_len));
    }

    let requested_segments = constraints.max_breaks.checked_add(1).ok_or_else(|| {
        SbdError::invalid_input(format!(
            "constraints.max_breaks overflow: {}",
            constraints.max_breaks
        ))
    })?;
    let feasible_segments = n / constraints.min_segment_len;

    Ok(ValidatedConstraints {
        min_segment_len: constraints.min_segment_len,
        max_segments: requested_segments.min(feasible_segments),
    })
}
