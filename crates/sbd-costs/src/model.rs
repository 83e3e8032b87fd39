// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sbd_core::{SbdError, SeriesView};

/// Segment cost contract: least-squares RSS over arbitrary sub-intervals.
///
/// `precompute` builds a per-series read-only cache once; `segment_cost` then
/// answers `[start, end)` queries in O(1) from that cache. Costs are pure:
/// the result depends only on the cache and the interval bounds.
pub trait SegmentCost {
    type Cache;

    fn name(&self) -> &'static str;

    /// Free parameters fitted per segment, charged by the BIC penalty.
    fn params_per_segment(&self) -> usize;

    /// Validates a series before any cache is built.
    fn validate(&self, x: &SeriesView<'_>) -> Result<(), SbdError>;

    /// Builds the prefix-moment cache for `x`.
    fn precompute(&self, x: &SeriesView<'_>) -> Result<Self::Cache, SbdError>;

    /// RSS of the model's least-squares fit over `[start, end)`.
    ///
    /// Valid for `0 <= start < end <= n`; a single point costs 0. The engine
    /// treats a non-finite return as a degenerate-segment invariant
    /// violation.
    fn segment_cost(&self, cache: &Self::Cache, start: usize, end: usize) -> f64;
}
