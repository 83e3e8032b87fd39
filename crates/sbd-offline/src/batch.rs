// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::baiperron::{BaiPerron, BaiPerronConfig};
use rayon::prelude::*;
use sbd_core::{
    CancelToken, Constraints, ExecutionContext, RegressionMode, SbdError, SegmentationResult,
    Segmenter, SeriesView,
};
use sbd_costs::{CostLevel, CostLevelTrend};

/// Per-series outcome slots in a batch run, in input order.
pub type BatchResult = Vec<Result<SegmentationResult, SbdError>>;

fn run_one(
    values: &[f64],
    mode: RegressionMode,
    constraints: &Constraints,
    cancel: Option<&CancelToken>,
) -> Result<SegmentationResult, SbdError> {
    let view = SeriesView::new(values)?;
    let mut ctx = ExecutionContext::new(constraints);
    if let Some(token) = cancel {
        ctx = ctx.with_cancel(token);
    }

    match mode {
        RegressionMode::Constant => {
            BaiPerron::new(CostLevel, BaiPerronConfig::default()).segment(&view, &ctx)
        }
        RegressionMode::ConstantTrend => {
            BaiPerron::new(CostLevelTrend, BaiPerronConfig::default()).segment(&view, &ctx)
        }
    }
}

/// Segments a single series with the mode string contract (`"c"` / `"ct"`,
/// case-insensitive).
pub fn segment_series(
    values: &[f64],
    mode: &str,
    constraints: &Constraints,
) -> Result<SegmentationResult, SbdError> {
    let mode = RegressionMode::parse(mode)?;
    run_one(values, mode, constraints, None)
}

/// Segments every series of a batch independently, in parallel.
///
/// A bad mode string is a configuration error and fails the whole call
/// before any per-series work starts. Per-series failures (for example
/// `SeriesTooShort`) occupy their slot in the output while the rest of the
/// batch proceeds; output order matches input order. A shared `cancel` token
/// aborts the remaining work, leaving `Cancelled` in unfinished slots.
pub fn segment_batch(
    batch: &[Vec<f64>],
    mode: &str,
    constraints: &Constraints,
    cancel: Option<&CancelToken>,
) -> Result<BatchResult, SbdError> {
    let mode = RegressionMode::parse(mode)?;
    Ok(batch
        .par_iter()
        .map(|series| run_one(series, mode, constraints, cancel))
        .collect())
}
