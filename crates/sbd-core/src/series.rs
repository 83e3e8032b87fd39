// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SbdError;

/// Borrowed univariate series of length `n >= 1`, indexed `0..n`.
///
/// The view validates shape only. Finiteness of the observations is the
/// caller's contract; a non-finite value that reaches a cost query is
/// surfaced by the engine as `DegenerateSegment` rather than silently
/// producing garbage.
#[derive(Clone, Copy, Debug)]
pub struct SeriesView<'a> {
    pub values: &'a [f64],
    pub n: usize,
}

impl<'a> SeriesView<'a> {
    /// Constructs a validated `SeriesView`.
    pub fn new(values: &'a [f64]) -> Result<Self, SbdError> {
        if values.is_empty() {
            return Err(SbdError::invalid_input(
                "series must contain at least one observation",
            ));
        }
        Ok(Self {
            values,
            n: values.len(),
        })
    }
}
