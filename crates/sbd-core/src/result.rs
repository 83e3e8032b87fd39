// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SbdError;
use std::borrow::Cow;

/// Structured diagnostics captured from a segmentation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub n: usize,
    pub runtime_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
    pub algorithm: Cow<'static, str>,
    pub cost_model: Cow<'static, str>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            runtime_ms: None,
            notes: vec![],
            warnings: vec![],
            algorithm: Cow::Borrowed(""),
            cost_model: Cow::Borrowed(""),
        }
    }
}

/// Final per-series output: the BIC-selected partition.
///
/// `breakpoints` holds interior boundaries only, strictly increasing and
/// strictly inside `(0, n)`; `num_segments == breakpoints.len() + 1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationResult {
    pub breakpoints: Vec<usize>,
    pub num_segments: usize,
    pub total_rss: f64,
    pub bic: f64,
    pub diagnostics: Diagnostics,
}

impl SegmentationResult {
    /// Constructs a validated result for a series of length `n`.
    pub fn new(
        n: usize,
        breakpoints: Vec<usize>,
        total_rss: f64,
        bic: f64,
        diagnostics: Diagnostics,
    ) -> Result<Self, SbdError> {
        validate_breakpoints(n, &breakpoints)?;
        if !total_rss.is_finite() || total_rss < 0.0 {
            return Err(SbdError::invalid_input(format!(
                "total_rss must be finite and >= 0; got {total_rss}"
            )));
        }
        // A zero-RSS fit legitimately scores -inf; only NaN is malformed.
        if bic.is_nan() {
            return Err(SbdError::invalid_input("bic must not be NaN"));
        }

        Ok(Self {
            num_segments: breakpoints.len() + 1,
            breakpoints,
            total_rss,
            bic,
            diagnostics,
        })
    }
}

/// Validates the interior-breakpoint contract for a series of length `n`.
pub fn validate_breakpoints(n: usize, breakpoints: &[usize]) -> Result<(), SbdError> {
    let mut previous = 0usize;
    for &bp in breakpoints {
        if bp == 0 || bp >= n {
            return Err(SbdError::invalid_input(format!(
                "breakpoint {bp} must lie strictly inside (0, {n})"
            )));
        }
        if bp <= previous {
            return Err(SbdError::invalid_input(format!(
                "breakpoints must be strictly increasing: {bp} follows {previous}"
            )));
        }
        previous = bp;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, SegmentationResult, validate_breakpoints};
    use std::borrow::Cow;

    #[test]
    fn validate_breakpoints_accepts_interior_increasing_sequences() {
        validate_breakpoints(10, &[]).expect("no breaks is valid");
        validate_breakpoints(10, &[3]).expect("single interior break is valid");
        validate_breakpoints(10, &[2, 5, 9]).expect("increasing interior breaks are valid");
    }

    #[test]
    fn validate_breakpoints_rejects_boundary_and_unordered_indices() {
        assert!(validate_breakpoints(10, &[0]).is_err());
        assert!(validate_breakpoints(10, &[10]).is_err());
        assert!(validate_breakpoints(10, &[11]).is_err());
        assert!(validate_breakpoints(10, &[5, 5]).is_err());
        assert!(validate_breakpoints(10, &[7, 3]).is_err());
    }

    #[test]
    fn new_counts_segments_from_breakpoints() {
        let result = SegmentationResult::new(20, vec![6, 13], 4.5, -12.0, Diagnostics::default())
            .expect("valid result should construct");
        assert_eq!(result.num_segments, 3);
        assert_eq!(result.breakpoints, vec![6, 13]);
    }

    #[test]
    fn new_allows_negative_infinite_bic_but_rejects_nan() {
        let zero_rss = SegmentationResult::new(
            5,
            vec![],
            0.0,
            f64::NEG_INFINITY,
            Diagnostics::default(),
        )
        .expect("zero-RSS fit with -inf BIC is valid");
        assert_eq!(zero_rss.num_segments, 1);

        let nan_bic =
            SegmentationResult::new(5, vec![], 1.0, f64::NAN, Diagnostics::default());
        assert!(nan_bic.is_err());
    }

    #[test]
    fn new_rejects_non_finite_or_negative_rss() {
        assert!(
            SegmentationResult::new(5, vec![], f64::NAN, 0.0, Diagnostics::default()).is_err()
        );
        assert!(
            SegmentationResult::new(5, vec![], f64::INFINITY, 0.0, Diagnostics::default())
                .is_err()
        );
        assert!(
            SegmentationResult::new(5, vec![], -1.0, 0.0, Diagnostics::default()).is_err()
        );
    }

    #[test]
    fn diagnostics_default_is_empty() {
        let diagnostics = Diagnostics::default();
        assert_eq!(diagnostics.n, 0);
        assert_eq!(diagnostics.algorithm, Cow::Borrowed(""));
        assert!(diagnostics.notes.is_empty());
        assert!(diagnostics.warnings.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn segmentation_result_serde_roundtrip() {
        let result = SegmentationResult::new(
            30,
            vec![10, 20],
            2.25,
            -40.5,
            Diagnostics {
                n: 30,
                algorithm: Cow::Borrowed("bai-perron"),
                cost_model: Cow::Borrowed("level"),
                ..Diagnostics::default()
            },
        )
        .expect("valid result should construct");

        let encoded = serde_json::to_string(&result).expect("serialize result");
        let decoded: SegmentationResult =
            serde_json::from_str(&encoded).expect("deserialize result");
        assert_eq!(decoded, result);
    }
}
