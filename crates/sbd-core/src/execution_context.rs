// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SbdError;
use crate::constraints::Constraints;
use crate::control::CancelToken;

/// Per-run execution context threaded through segmentation calls.
pub struct ExecutionContext<'a> {
    pub constraints: &'a Constraints,
    pub cancel: Option<&'a CancelToken>,
}

impl<'a> ExecutionContext<'a> {
    /// Creates a context with no cancellation hook.
    pub fn new(constraints: &'a Constraints) -> Self {
        Self {
            constraints,
            cancel: None,
        }
    }

    /// Sets the optional cancellation token.
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns true when cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    /// Returns a cancelled error when cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<(), SbdError> {
        if self.is_cancelled() {
            return Err(SbdError::cancelled());
        }
        Ok(())
    }

    /// Checks cancellation every `every` iterations.
    ///
    /// When `every` is zero, it is treated as one (always poll).
    pub fn check_cancelled_every(&self, iteration: usize, every: usize) -> Result<(), SbdError> {
        let every = every.max(1);
        if iteration % every != 0 {
            return Ok(());
        }
        self.check_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionContext;
    use crate::constraints::Constraints;
    use crate::control::CancelToken;

    #[test]
    fn new_context_has_no_cancel_hook() {
        let constraints = Constraints::default();
        let ctx = ExecutionContext::new(&constraints);

        assert!(std::ptr::eq(ctx.constraints, &constraints));
        assert!(ctx.cancel.is_none());
        assert!(!ctx.is_cancelled());
        assert!(ctx.check_cancelled().is_ok());
    }

    #[test]
    fn check_cancelled_reports_cancelled_token() {
        let constraints = Constraints::default();
        let cancel = CancelToken::new();
        let ctx = ExecutionContext::new(&constraints).with_cancel(&cancel);

        assert!(ctx.check_cancelled().is_ok());
        cancel.cancel();

        let err = ctx
            .check_cancelled()
            .expect_err("cancelled token should return an error");
        assert_eq!(err.to_string(), "cancelled");
    }

    #[test]
    fn check_cancelled_every_polls_on_cadence() {
        let constraints = Constraints::default();
        let cancel = CancelToken::new();
        let ctx = ExecutionContext::new(&constraints).with_cancel(&cancel);
        cancel.cancel();

        assert!(ctx.check_cancelled_every(1, 4).is_ok());
        assert!(ctx.check_cancelled_every(3, 4).is_ok());
        assert!(ctx.check_cancelled_every(4, 4).is_err());
    }

    #[test]
    fn check_cancelled_every_zero_interval_always_polls() {
        let constraints = Constraints::default();
        let cancel = CancelToken::new();
        let ctx = ExecutionContext::new(&constraints).with_cancel(&cancel);
        cancel.cancel();

        let err = ctx
            .check_cancelled_every(3, 0)
            .expect_err("every=0 should behave like every=1");
        assert_eq!(err.to_string(), "cancelled");
    }
}
