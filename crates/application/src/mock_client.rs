//! In-memory HTTP client for unit tests.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use restcheck_domain::{RequestSpec, ResponseSpec};
use serde_json::{Value, json};

use crate::ports::{HttpClient, HttpClientError};

/// Replays queued responses in order and records every request.
///
/// Once the queue is empty every request gets a 404 with an empty object.
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ResponseSpec::json_response(status, &body)));
        self
    }

    pub fn fail(self, error: HttpClientError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ResponseSpec::json_response(404, &json!({}))));
        async move { next }
    }
}
