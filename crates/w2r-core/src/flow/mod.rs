//! The two user flows and the typed hand-off between them.
//!
//! [`SubmissionFlow`] sends `{url, format}` and yields a [`Handoff`];
//! [`SelectionFlow`] is built from that hand-off (or loads candidates itself),
//! collects a selection and saves the downloaded file.

mod selection;
mod state;
mod submission;

pub use selection::{SelectionEntry, SelectionFlow};
pub use state::FlowState;
pub use submission::SubmissionFlow;

use crate::model::{BookCandidate, ConversionRequest};

/// Candidates produced by a successful submission, with the request that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub request: ConversionRequest,
    pub books: Vec<BookCandidate>,
}
