// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod baiperron;
pub mod batch;

pub use baiperron::{BaiPerron, BaiPerronConfig};
pub use batch::{segment_batch, segment_series};

/// Offline segmentation namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = (sbd_core::crate_name(), sbd_costs::crate_name());
    "sbd-offline"
}
