// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::SegmentCost;
use sbd_core::{SbdError, SeriesView, prefix_sum_squares, prefix_sums};

/// Constant-level least-squares segment cost (`"c"` mode).
///
/// RSS over `[start, end)` is the sum of squared deviations of the window
/// from its own mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostLevel;

/// Prefix-moment cache for O(1) level segment-cost queries.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelCache {
    prefix_x: Vec<f64>,
    prefix_x_sq: Vec<f64>,
    n: usize,
}

pub(crate) fn mean_only_sse(sum_x: f64, sum_x_sq: f64, m: f64) -> f64 {
    let centered = sum_x_sq - (sum_x * sum_x) / m;
    // Clamp cancellation noise at zero while letting NaN from non-finite
    // observations through for the engine's finiteness gate.
    if centered < 0.0 { 0.0 } else { centered }
}

impl SegmentCost for CostLevel {
    type Cache = LevelCache;

    fn name(&self) -> &'static str {
        "level"
    }

    fn params_per_segment(&self) -> usize {
        1
    }

    fn validate(&self, x: &SeriesView<'_>) -> Result<(), SbdError> {
        debug_assert!(x.n >= 1, "SeriesView guarantees n >= 1");
        Ok(())
    }

    fn precompute(&self, x: &SeriesView<'_>) -> Result<Self::Cache, SbdError> {
        Ok(LevelCache {
            prefix_x: prefix_sums(x.values),
            prefix_x_sq: prefix_sum_squares(x.values),
            n: x.n,
        })
    }

    fn segment_cost(&self, cache: &Self::Cache, start: usize, end: usize) -> f64 {
        assert!(
            start < end,
            "segment_cost requires start < end; got start={start}, end={end}"
        );
        assert!(
            end <= cache.n,
            "segment_cost end out of bounds: end={end}, n={}",
            cache.n
        );

        let m = (end - start) as f64;
        if m <= 1.0 {
            return 0.0;
        }

        let sum_x = cache.prefix_x[end] - cache.prefix_x[start];
        let sum_x_sq = cache.prefix_x_sq[end] - cache.prefix_x_sq[start];
        mean_only_sse(sum_x, sum_x_sq, m)
    }
}
