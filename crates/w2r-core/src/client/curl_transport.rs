//! libcurl-backed transport (easy interface, one handle per request).

use std::time::Duration;

use super::parse::parse_head;
use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Blocking transport using the `curl` crate.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Option<Duration>,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: None,
        }
    }
}

impl CurlTransport {
    /// `timeout` of None leaves the transfer unbounded once connected.
    pub fn new(connect_timeout: Duration, timeout: Option<Duration>) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        // No `Expect: 100-continue` round trip for small JSON bodies.
        list.append("Expect:")?;
        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                easy.post_fields_copy(request.body.as_deref().unwrap_or_default())?;
                list.append("Content-Type: application/json")?;
            }
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                header_lines.push(String::from_utf8_lossy(data).trim_end().to_string());
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code == 0 {
            return Err(TransportError::Connection(format!(
                "no HTTP response from {}",
                request.url
            )));
        }
        let head = parse_head(&header_lines);
        if head.status.is_some_and(|s| s != code) {
            tracing::debug!(parsed = ?head.status, code, "status line and response code differ");
        }
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            status = code,
            bytes = body.len(),
            "request completed"
        );

        Ok(HttpResponse {
            status: code,
            reason: head.reason,
            headers: head.headers,
            body,
        })
    }
}
