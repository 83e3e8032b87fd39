// SPDX-License-Identifier: MIT OR Apache-2.0

//! Criterion benchmarks for the segmentation stack. See `benches/`.

#![forbid(unsafe_code)]
