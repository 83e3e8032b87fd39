// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sbd_core::{
    Diagnostics, ExecutionContext, SbdError, SegmentationResult, Segmenter, SeriesView,
    ValidatedConstraints, validate_constraints,
};
use sbd_costs::SegmentCost;
use std::borrow::Cow;
use std::time::Instant;

const DEFAULT_CANCEL_CHECK_EVERY: usize = 1000;

/// Configuration for [`BaiPerron`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaiPerronConfig {
    /// Cancellation poll cadence in DP transitions; zero means every transition.
    pub cancel_check_every: usize,
}

impl Default for BaiPerronConfig {
    fn default() -> Self {
        Self {
            cancel_check_every: DEFAULT_CANCEL_CHECK_EVERY,
        }
    }
}

impl BaiPerronConfig {
    fn normalized_cancel_check_every(&self) -> usize {
        self.cancel_check_every.max(1)
    }
}

/// Exact multiple-structural-break detector.
///
/// Sweeps a dynamic program over every admissible segment count, then selects
/// the count by a BIC-type criterion and reconstructs the break indices from
/// backpointers.
#[derive(Debug)]
pub struct BaiPerron<C: SegmentCost> {
    cost_model: C,
    config: BaiPerronConfig,
}

impl<C: SegmentCost> BaiPerron<C> {
    pub fn new(cost_model: C, config: BaiPerronConfig) -> Self {
        Self { cost_model, config }
    }

    pub fn cost_model(&self) -> &C {
        &self.cost_model
    }

    pub fn config(&self) -> &BaiPerronConfig {
        &self.config
    }
}

/// Filled DP state: `backpointers[m][j]` is the optimal previous boundary of
/// the last of `m` segments covering `[0, j)`; `rss_by_segment_count[m]` is
/// `dp[m][n]`, `+inf` where `m` is infeasible.
#[derive(Clone, Debug)]
struct SweepResult {
    backpointers: Vec<Vec<usize>>,
    rss_by_segment_count: Vec<f64>,
}

#[derive(Clone, Copy, Debug)]
struct Selection {
    segment_count: usize,
    total_rss: f64,
    bic: f64,
}

fn evaluate_segment_cost<C: SegmentCost>(
    model: &C,
    cache: &C::Cache,
    start: usize,
    end: usize,
) -> Result<f64, SbdError> {
    let segment_cost = model.segment_cost(cache, start, end);
    if !segment_cost.is_finite() {
        return Err(SbdError::degenerate_segment(format!(
            "non-finite segment cost at [{start}, {end}): {segment_cost}"
        )));
    }
    Ok(segment_cost)
}

/// Interval-partition DP over exact segment counts `1..=max_segments`.
///
/// `dp[m][j]` is finite only when `j >= m * min_segment_len`; the recurrence
/// scans previous boundaries in ascending order with a strict comparison, so
/// RSS ties resolve to the smallest boundary.
fn run_sweep<C: SegmentCost>(
    model: &C,
    cache: &C::Cache,
    n: usize,
    validated: &ValidatedConstraints,
    cancel_check_every: usize,
    ctx: &ExecutionContext<'_>,
) -> Result<SweepResult, SbdError> {
    let min_seg = validated.min_segment_len;
    let max_segments = validated.max_segments;
    let inf = f64::INFINITY;

    let mut backpointers = vec![vec![usize::MAX; n + 1]; max_segments + 1];
    let mut rss_by_segment_count = vec![inf; max_segments + 1];
    let mut dp_prev = vec![inf; n + 1];
    dp_prev[0] = 0.0;
    let mut iteration = 0usize;

    for (segment_count, backpointer_row) in backpointers.iter_mut().enumerate().skip(1) {
        let mut dp_curr = vec![inf; n + 1];

        for end in (segment_count * min_seg)..=n {
            let mut best_objective = inf;
            let mut best_prev = usize::MAX;

            // dp_prev is finite only on boundaries reachable with exactly
            // segment_count - 1 segments, so infeasible starts fall out here.
            for start in ((segment_count - 1) * min_seg)..=(end - min_seg) {
                iteration += 1;
                ctx.check_cancelled_every(iteration, cancel_check_every)?;

                if !dp_prev[start].is_finite() {
                    continue;
                }

                let segment_cost = evaluate_segment_cost(model, cache, start, end)?;
                let objective = dp_prev[start] + segment_cost;
                if objective < best_objective {
                    best_objective = objective;
                    best_prev = start;
                }
            }

            if best_prev != usize::MAX {
                dp_curr[end] = best_objective;
                backpointer_row[end] = best_prev;
            }
        }

        rss_by_segment_count[segment_count] = dp_curr[n];
        dp_prev = dp_curr;
    }

    Ok(SweepResult {
        backpointers,
        rss_by_segment_count,
    })
}

/// BIC-type score: `n * ln(rss / n) + (segments * p) * ln(n)`.
///
/// A zero-RSS fit scores `-inf`, which stays comparable; the tie rule in the
/// selector keeps such degenerate-score ties on the smallest segment count.
fn bic_score(n: usize, rss: f64, segments: usize, params_per_segment: usize) -> f64 {
    let n_f = n as f64;
    n_f * (rss / n_f).ln() + (segments * params_per_segment) as f64 * n_f.ln()
}

fn select_by_bic(
    sweep: &SweepResult,
    n: usize,
    params_per_segment: usize,
    min_segment_len: usize,
) -> Result<Selection, SbdError> {
    let mut best: Option<Selection> = None;

    for segment_count in 1..sweep.rss_by_segment_count.len() {
        let rss = sweep.rss_by_segment_count[segment_count];
        if !rss.is_finite() {
            continue;
        }

        let bic = bic_score(n, rss, segment_count, params_per_segment);
        if bic.is_nan() {
            return Err(SbdError::degenerate_segment(format!(
                "NaN BIC for segment_count={segment_count}: rss={rss}"
            )));
        }

        // Strict comparison: equal scores keep the earlier, smaller count.
        let is_better = best.as_ref().is_none_or(|current| bic < current.bic);
        if is_better {
            best = Some(Selection {
                segment_count,
                total_rss: rss,
                bic,
            });
        }
    }

    best.ok_or_else(|| SbdError::series_too_short(n, min_segment_len))
}

/// Walks backpointers from `(segment_count, n)` down to one segment, emitting
/// interior break indices in ascending order.
fn reconstruct_breakpoints(
    sweep: &SweepResult,
    segment_count: usize,
    n: usize,
) -> Result<Vec<usize>, SbdError> {
    if segment_count == 0 || segment_count >= sweep.backpointers.len() {
        return Err(SbdError::invalid_input(format!(
            "invalid segment_count={segment_count} for backtracking"
        )));
    }

    if segment_count == 1 {
        return Ok(vec![]);
    }

    let mut breakpoints = Vec::with_capacity(segment_count - 1);
    let mut cursor = n;
    for current_segment_count in (2..=segment_count).rev() {
        let split = sweep.backpointers[current_segment_count][cursor];
        if split == usize::MAX {
            return Err(SbdError::invalid_input(format!(
                "backtracking failed at segment_count={current_segment_count}, boundary={cursor}"
            )));
        }
        if split == 0 || split >= cursor {
            return Err(SbdError::invalid_input(format!(
                "invalid split during backtracking at split={split}, boundary={cursor}"
            )));
        }
        breakpoints.push(split);
        cursor = split;
    }
    breakpoints.reverse();

    Ok(breakpoints)
}

impl<C: SegmentCost> Segmenter for BaiPerron<C> {
    fn segment(
        &self,
        x: &SeriesView<'_>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<SegmentationResult, SbdError> {
        let validated = validate_constraints(ctx.constraints, x.n)?;
        self.cost_model.validate(x)?;
        let cache = self.cost_model.precompute(x)?;

        let started_at = Instant::now();
        let sweep = run_sweep(
            &self.cost_model,
            &cache,
            x.n,
            &validated,
            self.config.normalized_cancel_check_every(),
            ctx,
        )?;
        let selection = select_by_bic(
            &sweep,
            x.n,
            self.cost_model.params_per_segment(),
            validated.min_segment_len,
        )?;
        let breakpoints = reconstruct_breakpoints(&sweep, selection.segment_count, x.n)?;
        let runtime_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);

        let notes = vec![
            format!(
                "max_segments_evaluated={}, min_segment_len={}, params_per_segment={}",
                validated.max_segments,
                validated.min_segment_len,
                self.cost_model.params_per_segment()
            ),
            format!(
                "selected_segment_count={}, total_rss={}, bic={}",
                selection.segment_count, selection.total_rss, selection.bic
            ),
        ];

        let diagnostics = Diagnostics {
            n: x.n,
            runtime_ms: Some(runtime_ms),
            notes,
            warnings: vec![],
            algorithm: Cow::Borrowed("bai-perron"),
            cost_model: Cow::Borrowed(self.cost_model.name()),
        };

        SegmentationResult::new(
            x.n,
            breakpoints,
            selection.total_rss,
            selection.bic,
            diagnostics,
        )
    }
}
