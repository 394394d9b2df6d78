// Test doubles for the HTTP pipeline.
// A scripted transport that replays canned responses and records traffic.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ReportsError, Result};

use super::message::{Headers, Request, Response};
use super::transport::Transport;

/// Transport double that pops one canned response per call.
pub struct MockTransport {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the transport was actually reached.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request that reached the transport, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ReportsError::RequestFailure("mock transport exhausted".to_string()))
    }
}

/// Canned JSON response with the given extra headers.
pub fn json_response(status: u16, body: &str, extra_headers: &[(&str, &str)]) -> Response {
    let mut headers = Headers::new();
    headers.insert("Content-Type", "application/json; charset=utf-8");
    for (name, value) in extra_headers {
        headers.insert(name, *value);
    }
    Response::new(status, headers, body.as_bytes().to_vec())
}
