//! Scripted in-process `Transport` for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tokio::sync::Notify;

use super::api::{ApiRequest, ApiResponse, Transport};
use crate::error::ClientError;

/// Replays queued responses in order and records every request.
///
/// With [`hold`](Self::hold) set, each request parks until
/// [`release`](Self::release) so tests can observe in-flight state.
/// An empty queue answers `200 []`.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ClientError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    held: AtomicBool,
    gate: Notify,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.queue(Ok(ApiResponse { status, body: body.to_owned() }));
    }

    pub fn fail_network(&self, message: &str) {
        self.queue(Err(ClientError::Network(message.to_owned())));
    }

    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn queue(&self, response: Result<ApiResponse, ClientError>) {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
    }

    fn next_response(&self) -> Result<ApiResponse, ClientError> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: "[]".to_owned() }))
    }
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        if self.held.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.next_response()
    }
}

/// Yield until the stub has recorded `count` requests.
pub async fn wait_for_requests(stub: &StubTransport, count: usize) {
    while stub.request_count() < count {
        tokio::task::yield_now().await;
    }
}

/// Yield a few scheduler turns so released requests can settle.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
