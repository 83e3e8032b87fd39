// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod constraints;
pub mod control;
pub mod error;
pub mod execution_context;
pub mod mode;
pub mod result;
pub mod series;
pub mod stats;

pub use constraints::{Constraints, ValidatedConstraints, validate_constraints};
pub use control::CancelToken;
pub use error::SbdError;
pub use execution_context::ExecutionContext;
pub use mode::RegressionMode;
pub use result::{Diagnostics, SegmentationResult, validate_breakpoints};
pub use series::SeriesView;
pub use stats::{prefix_sum_squares, prefix_sums};

/// Segmentation engine contract: full series in, one selected partition out.
pub trait Segmenter {
    fn segment(
        &self,
        x: &SeriesView<'_>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<SegmentationResult, SbdError>;
}

/// Core shared types and traits for sbd-rs.
pub fn crate_name() -> &'static str {
    "sbd-core"
}
