//! Selection flow: present candidates, collect a selection, download and save.

use chrono::Utc;

use super::state::{BusyGuard, FlowState, BUSY};
use super::submission::interpret_books_response;
use super::Handoff;
use crate::client::{BackendClient, HttpResponse};
use crate::error::FlowError;
use crate::filename::resolve_download_filename;
use crate::model::{BackendReply, BookCandidate, BookFormat, DownloadSelection};
use crate::save::{FileSink, SavedFile};

/// One checkable row of the selection form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    /// Sent to the backend when checked.
    pub value: String,
    pub label: String,
    pub author: Option<String>,
    pub checked: bool,
}

impl SelectionEntry {
    fn from_candidate(index: usize, book: &BookCandidate) -> Self {
        Self {
            value: book.selection_value(index),
            label: book.label(index),
            author: book.author.clone(),
            checked: false,
        }
    }
}

#[derive(Debug)]
pub struct SelectionFlow {
    client: BackendClient,
    format: BookFormat,
    source_url: Option<String>,
    entries: Vec<SelectionEntry>,
    loaded: bool,
    state: FlowState,
}

impl SelectionFlow {
    /// Flow without candidates; call [`SelectionFlow::load`] to fetch them.
    pub fn new(client: BackendClient, format: BookFormat, source_url: Option<String>) -> Self {
        Self {
            client,
            format,
            source_url,
            entries: Vec::new(),
            loaded: false,
            state: FlowState::Idle,
        }
    }

    /// Flow seeded with the candidates of a successful submission.
    pub fn from_handoff(client: BackendClient, handoff: Handoff) -> Self {
        let mut flow = Self::new(client, handoff.request.format, Some(handoff.request.url));
        flow.set_candidates(&handoff.books);
        flow
    }

    fn set_candidates(&mut self, books: &[BookCandidate]) {
        self.entries = books
            .iter()
            .enumerate()
            .map(|(i, b)| SelectionEntry::from_candidate(i, b))
            .collect();
        self.loaded = true;
    }

    pub fn format(&self) -> BookFormat {
        self.format
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Candidates are being fetched and none are shown yet.
    pub fn is_loading(&self) -> bool {
        !self.loaded && self.state.is_busy()
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    /// Values of the checked entries, in list order.
    pub fn selected_values(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.value.clone())
            .collect()
    }

    /// Download is enabled while nothing is in flight. An empty selection is
    /// still submittable and rejected locally with a message.
    pub fn can_submit(&self) -> bool {
        self.loaded && !self.state.is_busy()
    }

    /// Flip entry `index`. Returns false if there is no such entry.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(e) => {
                e.checked = !e.checked;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = true);
    }

    pub fn clear_selection(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = false);
    }

    /// Check the entries whose value is in `values`. Fails without changing
    /// anything if a value matches no entry.
    pub fn select_values<S: AsRef<str>>(&mut self, values: &[S]) -> Result<(), FlowError> {
        let unknown: Vec<&str> = values
            .iter()
            .map(|v| v.as_ref())
            .filter(|v| !self.entries.iter().any(|e| e.value == *v))
            .collect();
        if !unknown.is_empty() {
            return Err(FlowError::Validation(format!(
                "Unknown book id(s): {}",
                unknown.join(", ")
            )));
        }
        for entry in &mut self.entries {
            if values.iter().any(|v| v.as_ref() == entry.value) {
                entry.checked = true;
            }
        }
        Ok(())
    }

    /// Fetch candidates from `/get_books`, replacing the current list.
    pub async fn load(&mut self) -> Result<usize, FlowError> {
        if self.state.is_busy() {
            return Err(FlowError::Validation(BUSY.to_string()));
        }
        let guard = BusyGuard::enter(&mut self.state);
        let result = match self.client.get_books().await {
            Ok(response) => interpret_books_response(&response),
            Err(e) => {
                tracing::warn!(error = %e, "candidate request did not complete");
                Err(FlowError::Unreachable)
            }
        };
        match result {
            Ok(books) => {
                guard.settle(FlowState::Idle);
                self.set_candidates(&books);
                tracing::info!(count = books.len(), "loaded candidates");
                Ok(books.len())
            }
            Err(e) => {
                guard.settle(FlowState::Error(e.clone()));
                Err(e)
            }
        }
    }

    /// Download the checked entries and save the file through `sink`.
    pub async fn request_download(&mut self, sink: &dyn FileSink) -> Result<SavedFile, FlowError> {
        let ids = self.selected_values();
        self.download_ids(ids, sink).await
    }

    /// Download an explicit list of ids (used when candidates are known only by id).
    ///
    /// An empty list fails locally without contacting the backend. The flow
    /// is usable again after any outcome.
    pub async fn download_ids(
        &mut self,
        ids: Vec<String>,
        sink: &dyn FileSink,
    ) -> Result<SavedFile, FlowError> {
        if self.state.is_busy() {
            return Err(FlowError::Validation(BUSY.to_string()));
        }
        if ids.is_empty() {
            let err = FlowError::empty_selection();
            self.state = FlowState::Error(err.clone());
            return Err(err);
        }
        let selection = DownloadSelection {
            selected_book_ids: ids,
            format: self.format,
            url: self.source_url.clone(),
        };

        let guard = BusyGuard::enter(&mut self.state);
        let result = fetch_and_save(&self.client, &selection, sink).await;
        guard.finish(&result);
        result
    }
}

async fn fetch_and_save(
    client: &BackendClient,
    selection: &DownloadSelection,
    sink: &dyn FileSink,
) -> Result<SavedFile, FlowError> {
    let response = client.download(selection).await.map_err(|e| {
        tracing::warn!(error = %e, "download request did not complete");
        FlowError::DownloadFailed(e.to_string())
    })?;
    check_download_response(&response)?;

    let filename = resolve_download_filename(
        response.content_disposition(),
        response.content_type(),
        &selection.selected_book_ids,
        Utc::now(),
    );
    tracing::debug!(
        %filename,
        content_type = ?response.content_type(),
        content_disposition = ?response.content_disposition(),
        "resolved save name"
    );

    let saved = sink.save(&filename, &response.body).map_err(|e| {
        tracing::warn!(error = %format!("{e:#}"), %filename, "saving download failed");
        FlowError::DownloadFailed(format!("{e:#}"))
    })?;
    tracing::info!(path = %saved.path.display(), bytes = saved.bytes, "download saved");
    Ok(saved)
}

/// Decides whether a `/download` reply is a file to save.
///
/// The declared content type alone decides: `application/json` is an error
/// reply (its `error` is shown verbatim), anything else is the file. A
/// non-2xx status is a failure either way; without a JSON body it is reported
/// as a failed download.
pub(crate) fn check_download_response(response: &HttpResponse) -> Result<(), FlowError> {
    if response.declares_json() {
        let reply = serde_json::from_slice::<BackendReply>(&response.body);
        if let Some(m) = reply.as_ref().ok().and_then(BackendReply::error_message) {
            return Err(FlowError::Server(m.to_string()));
        }
        if !response.is_success() {
            return Err(FlowError::from_status(response.status, &response.reason));
        }
        return Err(match reply {
            Ok(_) => FlowError::Malformed("JSON reply without an error message".to_string()),
            Err(e) => FlowError::Malformed(format!("invalid JSON reply: {e}")),
        });
    }
    if !response.is_success() {
        return Err(FlowError::DownloadFailed(format!(
            "HTTP error! status: {}",
            response.status
        )));
    }
    Ok(())
}
