//! HTTP client for the conversion backend.
//!
//! `BackendClient` builds the three endpoint requests and runs the blocking
//! transport under `spawn_blocking`. It does not interpret responses; the
//! flows own the branching on status and content type.

mod curl_transport;
mod parse;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use curl_transport::CurlTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::config::W2rConfig;
use crate::model::{ConversionRequest, DownloadSelection};
use crate::routes::{Routes, DOWNLOAD_PATH, GET_BOOKS_PATH, PROCESS_PATH};

/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn Transport>,
    routes: Routes,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.routes.base_url())
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    pub fn new(transport: Arc<dyn Transport>, routes: Routes) -> Self {
        Self { transport, routes }
    }

    /// Client with a curl transport configured from `cfg`.
    pub fn from_config(cfg: &W2rConfig) -> Result<Self> {
        let transport = CurlTransport::new(
            Duration::from_secs(cfg.connect_timeout_secs),
            cfg.request_timeout_secs.map(Duration::from_secs),
        );
        Ok(Self::new(Arc::new(transport), cfg.routes()?))
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// `POST /process` with `{url, format}`.
    pub async fn process(&self, request: &ConversionRequest) -> Result<HttpResponse, TransportError> {
        let body = serde_json::to_vec(request)?;
        let url = self.routes.resolve(PROCESS_PATH);
        tracing::info!(%url, source = %request.url, format = %request.format, "submitting conversion");
        self.send(HttpRequest::post_json(url, body)).await
    }

    /// `GET /get_books`.
    pub async fn get_books(&self) -> Result<HttpResponse, TransportError> {
        let url = self.routes.resolve(GET_BOOKS_PATH);
        tracing::info!(%url, "fetching candidates");
        self.send(HttpRequest::get(url)).await
    }

    /// `POST /download` with `{selectedBooks, format, url}`.
    pub async fn download(&self, selection: &DownloadSelection) -> Result<HttpResponse, TransportError> {
        let body = serde_json::to_vec(selection)?;
        let url = self.routes.resolve(DOWNLOAD_PATH);
        tracing::info!(
            %url,
            books = ?selection.selected_book_ids,
            format = %selection.format,
            "requesting download"
        );
        self.send(HttpRequest::post_json(url, body)).await
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.execute(&request))
            .await
            .map_err(|e| TransportError::Interrupted(e.to_string()))?
    }
}
