//! In-memory transport for flow tests: replays queued replies and records requests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use super::BackendClient;
use crate::routes::Routes;

pub(crate) enum Reply {
    Response(HttpResponse),
    /// Blocks the worker thread for the given time, then answers.
    Slow(Duration, HttpResponse),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(r)) => Ok(r),
            Some(Reply::Slow(delay, r)) => {
                std::thread::sleep(delay);
                Ok(r)
            }
            Some(Reply::Fail(msg)) => Err(TransportError::Connection(msg)),
            None => Err(TransportError::Connection("no scripted reply".into())),
        }
    }
}

/// Client over a fresh scripted transport rooted at `http://backend.test`.
pub(crate) fn scripted_client() -> (BackendClient, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::default());
    let routes = Routes::new("http://backend.test", Vec::new()).unwrap();
    let client = BackendClient::new(transport.clone(), routes);
    (client, transport)
}

pub(crate) fn json_response(status: u32, reason: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        reason: reason.to_string(),
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn file_response(
    content_type: &str,
    content_disposition: Option<&str>,
    body: &[u8],
) -> HttpResponse {
    let mut headers = vec![("Content-Type".to_string(), content_type.to_string())];
    if let Some(cd) = content_disposition {
        headers.push(("Content-Disposition".to_string(), cd.to_string()));
    }
    HttpResponse {
        status: 200,
        reason: "OK".into(),
        headers,
        body: body.to_vec(),
    }
}
