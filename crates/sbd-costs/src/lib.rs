// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod level;
pub mod model;
pub mod trend;

pub use level::{CostLevel, LevelCache};
pub use model::SegmentCost;
pub use trend::{CostLevelTrend, TrendCache};

/// Built-in cost model namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = sbd_core::crate_name();
    "sbd-costs"
}
