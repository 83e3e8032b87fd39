// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::level::mean_only_sse;
use crate::model::SegmentCost;
use sbd_core::{SbdError, SeriesView, prefix_sum_squares, prefix_sums};

/// Constant-plus-trend least-squares segment cost (`"ct"` mode).
///
/// Each window is fit by a level and a linear time trend through centered
/// moments: slope = cov(t, x) / var(t), intercept from the centered means.
/// Centering makes the RSS invariant to the time origin, so the fit behaves
/// as if the time index restarted at zero inside every segment, without any
/// per-segment re-indexing or matrix inversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostLevelTrend;

/// Prefix-moment cache for O(1) level-plus-trend segment-cost queries.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendCache {
    prefix_t: Vec<f64>,
    prefix_t_sq: Vec<f64>,
    prefix_x: Vec<f64>,
    prefix_x_sq: Vec<f64>,
    prefix_t_x: Vec<f64>,
    n: usize,
}

fn time_variance_tolerance(sum_t: f64, sum_t_sq: f64, m: f64) -> f64 {
    let cross = if m > 0.0 { (sum_t * sum_t) / m } else { 0.0 };
    let scale = sum_t_sq.abs().max(cross.abs()).max(1.0);
    32.0 * f64::EPSILON * scale
}

impl SegmentCost for CostLevelTrend {
    type Cache = TrendCache;

    fn name(&self) -> &'static str {
        "level-trend"
    }

    fn params_per_segment(&self) -> usize {
        2
    }

    fn validate(&self, x: &SeriesView<'_>) -> Result<(), SbdError> {
        debug_assert!(x.n >= 1, "SeriesView guarantees n >= 1");
        Ok(())
    }

    fn precompute(&self, x: &SeriesView<'_>) -> Result<Self::Cache, SbdError> {
        let mut t_values = Vec::with_capacity(x.n);
        let mut t_x_values = Vec::with_capacity(x.n);
        for (t, &value) in x.values.iter().enumerate() {
            let t_f = t as f64;
            t_values.push(t_f);
            t_x_values.push(t_f * value);
        }

        Ok(TrendCache {
            prefix_t: prefix_sums(&t_values),
            prefix_t_sq: prefix_sum_squares(&t_values),
            prefix_x: prefix_sums(x.values),
            prefix_x_sq: prefix_sum_squares(x.values),
            prefix_t_x: prefix_sums(&t_x_values),
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

        let sum_t = cache.prefix_t[end] - cache.prefix_t[start];
        let sum_t_sq = cache.prefix_t_sq[end] - cache.prefix_t_sq[start];
        let time_centered_ss = sum_t_sq - (sum_t * sum_t) / m;

        // A contiguous window of length >= 2 always has positive time
        // variance; anything at or below the cancellation tolerance is an
        // invariant violation that the engine surfaces as DegenerateSegment.
        if time_centered_ss <= time_variance_tolerance(sum_t, sum_t_sq, m) {
            return f64::NAN;
        }

        let sum_x = cache.prefix_x[end] - cache.prefix_x[start];
        let sum_x_sq = cache.prefix_x_sq[end] - cache.prefix_x_sq[start];
        let base_sse = mean_only_sse(sum_x, sum_x_sq, m);

        let sum_t_x = cache.prefix_t_x[end] - cache.prefix_t_x[start];
        let cov_t_x = sum_t_x - (sum_t * sum_x) / m;
        let explained = (cov_t_x * cov_t_x) / time_centered_ss;

        let sse = base_sse - explained;
        if sse < 0.0 { 0.0 } else { sse }
    }
}
