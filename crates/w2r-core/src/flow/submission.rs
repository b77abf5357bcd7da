//! Submission flow: collect `{url, format}`, call `/process`, hand off candidates.

use super::state::{BusyGuard, FlowState, BUSY};
use super::Handoff;
use crate::client::{BackendClient, HttpResponse};
use crate::error::FlowError;
use crate::model::{BackendReply, BookCandidate, BookFormat, ConversionRequest};

const INCOMPLETE_FORM: &str = "Enter a URL and choose a format.";

#[derive(Debug)]
pub struct SubmissionFlow {
    client: BackendClient,
    url: String,
    format: Option<BookFormat>,
    state: FlowState,
}

impl SubmissionFlow {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            url: String::new(),
            format: None,
            state: FlowState::Idle,
        }
    }

    /// No well-formedness check: any non-empty text is accepted.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_format(&mut self, format: Option<BookFormat>) {
        self.format = format;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn format(&self) -> Option<BookFormat> {
        self.format
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Both fields are filled in.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && self.format.is_some()
    }

    /// Submit is enabled iff the form is complete and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.is_complete() && !self.state.is_busy()
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    /// Sends the form to the conversion-initiation endpoint.
    ///
    /// Rejected locally (no request) when the form is incomplete or a
    /// submission is in flight. No retry on failure.
    pub async fn submit(&mut self) -> Result<Handoff, FlowError> {
        if self.state.is_busy() {
            return Err(FlowError::Validation(BUSY.to_string()));
        }
        let format = match self.format {
            Some(f) if !self.url.is_empty() => f,
            _ => {
                let err = FlowError::Validation(INCOMPLETE_FORM.to_string());
                self.state = FlowState::Error(err.clone());
                return Err(err);
            }
        };
        let request = ConversionRequest {
            url: self.url.clone(),
            format,
        };

        let guard = BusyGuard::enter(&mut self.state);
        let result = match self.client.process(&request).await {
            Ok(response) => interpret_books_response(&response),
            Err(e) => {
                tracing::warn!(error = %e, url = %request.url, "conversion request did not complete");
                Err(FlowError::Unreachable)
            }
        };
        guard.finish(&result);

        let books = result?;
        tracing::info!(count = books.len(), url = %request.url, "received candidates");
        Ok(Handoff { request, books })
    }
}

/// Interprets a `/process` or `/get_books` reply.
///
/// - 400..=599: the server's `error` string, else `Error: <status> <reason>`
/// - JSON with `books`: the candidates
/// - JSON with only `error`: server error
/// - anything else: malformed
pub(crate) fn interpret_books_response(
    response: &HttpResponse,
) -> Result<Vec<BookCandidate>, FlowError> {
    let reply = serde_json::from_slice::<BackendReply>(&response.body);

    if response.is_error_status() {
        let message = reply.as_ref().ok().and_then(BackendReply::error_message);
        return Err(match message {
            Some(m) => FlowError::Server(m.to_string()),
            None => FlowError::from_status(response.status, &response.reason),
        });
    }

    let reply = match reply {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, status = response.status, "reply is not JSON");
            return Err(FlowError::Malformed(format!(
                "expected JSON, got HTTP {} with {} bytes",
                response.status,
                response.body.len()
            )));
        }
    };
    if let Some(books) = reply.books {
        return Ok(books);
    }
    if let Some(m) = reply.error_message() {
        return Err(FlowError::Server(m.to_string()));
    }
    Err(FlowError::Malformed("reply has neither books nor error".to_string()))
}
