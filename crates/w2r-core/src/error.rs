//! Errors surfaced to the user by the submission and selection flows.
//!
//! The `Display` text of each variant is exactly what the user sees.

use thiserror::Error;

/// Message shown when a download is attempted with nothing selected.
pub const EMPTY_SELECTION: &str = "Please select at least one book.";

/// Terminal failure of one flow attempt. The flow stays usable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Error reported by the backend, shown verbatim.
    #[error("{0}")]
    Server(String),
    /// The request never completed. The cause is logged, not shown.
    #[error("Could not reach the conversion service.")]
    Unreachable,
    /// The response matched neither expected shape.
    #[error("Unexpected response from the conversion service: {0}")]
    Malformed(String),
    /// Transport or save failure while downloading.
    #[error("Download failed: {0}")]
    DownloadFailed(String),
}

impl FlowError {
    /// Fallback message for an error status without a server-supplied error string.
    pub fn from_status(status: u32, reason: &str) -> Self {
        let reason = reason.trim();
        if reason.is_empty() {
            FlowError::Server(format!("Error: {status}"))
        } else {
            FlowError::Server(format!("Error: {status} {reason}"))
        }
    }

    pub fn empty_selection() -> Self {
        FlowError::Validation(EMPTY_SELECTION.to_string())
    }

    /// True for errors raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }
}
