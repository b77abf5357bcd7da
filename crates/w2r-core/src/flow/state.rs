//! Per-flow request state: `Idle -> Busy -> {Success, Error}`.

use crate::error::FlowError;

/// Message for an activation while a request is still in flight.
pub(crate) const BUSY: &str = "A request is already in progress.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Busy,
    Success,
    Error(FlowError),
}

impl FlowState {
    pub fn is_busy(&self) -> bool {
        matches!(self, FlowState::Busy)
    }

    pub fn error(&self) -> Option<&FlowError> {
        match self {
            FlowState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Record the outcome of an attempt.
    pub(crate) fn finish<T>(&mut self, result: &Result<T, FlowError>) {
        *self = match result {
            Ok(_) => FlowState::Success,
            Err(e) => FlowState::Error(e.clone()),
        };
    }

    /// Leave the error state so the form can be used again.
    pub(crate) fn dismiss_error(&mut self) {
        if matches!(self, FlowState::Error(_)) {
            *self = FlowState::Idle;
        }
    }
}

/// Holds a flow in `Busy` while a request is in flight.
///
/// Dropping the guard without [`BusyGuard::finish`] (the request future was
/// cancelled) returns the flow to `Idle`.
pub(crate) struct BusyGuard<'a> {
    state: &'a mut FlowState,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn enter(state: &'a mut FlowState) -> Self {
        *state = FlowState::Busy;
        Self { state }
    }

    pub(crate) fn finish<T>(self, result: &Result<T, FlowError>) {
        self.state.finish(result);
    }

    pub(crate) fn settle(self, next: FlowState) {
        *self.state = next;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_busy() {
            *self.state = FlowState::Idle;
        }
    }
}
