//! Scripted in-memory transport for tests.
//!
//! Responses are replayed in push order and every request is recorded, so a
//! test can assert both what the caller got and how many calls were made.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    calls: Vec<ApiRequest>,
}

/// Cloneable handle; clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Result<ApiResponse, TransportError>) {
        self.lock().replies.push_back(reply);
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(Ok(ApiResponse::new(status, body.to_string())));
    }

    /// Reply with `status` and an empty body.
    pub fn push_status(&self, status: u16) {
        self.push(Ok(ApiResponse::new(status, Vec::new())));
    }

    pub fn push_body(&self, status: u16, body: &str) {
        self.push(Ok(ApiResponse::new(status, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        self.push(Err(error));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut script = self.lock();
        script.calls.push(request.clone());
        script.replies.pop_front().unwrap_or_else(|| {
            Err(TransportError::Connect(format!(
                "no scripted reply for {} {}",
                request.method, request.path
            )))
        })
    }
}
