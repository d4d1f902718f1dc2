//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use billing_api::clients::{HttpResponse, Transport, TransportError, TransportRequest};
use billing_api::{AccessToken, ApiContext, ClientId, ClientSecret, EndpointUrl};

/// A transport that replays queued responses and records every request.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON body.
    pub fn respond(&self, code: u16, body: &str) -> &Self {
        self.respond_with_headers(code, HashMap::new(), body)
    }

    pub fn respond_with_headers(
        &self,
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: &str,
    ) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(code, headers, body)));
        self
    }

    /// Queues a connectivity failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no response queued")
    }
}

pub const TEST_ENDPOINT: &str = "https://api.test.local";

/// Creates a bearer-token context pointing at [`TEST_ENDPOINT`].
pub fn test_context() -> ApiContext {
    ApiContext::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .endpoint(EndpointUrl::new(TEST_ENDPOINT).unwrap())
        .build()
        .unwrap()
}

/// Creates a client-credentials context pointing at `endpoint`.
pub fn client_credentials_context(endpoint: &str) -> ApiContext {
    ApiContext::builder()
        .client_credentials(
            ClientId::new("client-id").unwrap(),
            ClientSecret::new("client-secret").unwrap(),
        )
        .endpoint(EndpointUrl::new(endpoint).unwrap())
        .build()
        .unwrap()
}

/// Parses a recorded request body.
pub fn body_json(request: &TransportRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}
