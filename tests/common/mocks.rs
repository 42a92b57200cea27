//! Mock backend fixtures.
//!
//! Re-exports the in-crate mock HTTP client and sets up `wiremock` servers
//! that speak the backend's JSON contracts.

#![allow(dead_code)]

pub use cryptoquip::adapters::mock::{MockHttpClient, MockResponse};
pub use cryptoquip::traits::{Headers, HttpClient, Response};

use std::sync::Arc;
use std::time::Duration;

use cryptoquip::adapters::ReqwestHttpClient;
use cryptoquip::api::PuzzleClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn puzzle_json(id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-03-01",
        "encryptedText": text,
        "author": "Anon",
        "category": "Proverb",
        "difficulty": 2.5,
        "hints": [{"cipherLetter": "X", "plainLetter": "T"}]
    })
}

/// A client backed by reqwest pointed at `server`.
pub fn client_for(server: &MockServer) -> PuzzleClient {
    let http = ReqwestHttpClient::with_timeout(Duration::from_secs(5));
    PuzzleClient::new(server.uri(), Arc::new(http))
}

/// A client backed by the in-crate mock.
pub fn mock_client(mock: &MockHttpClient) -> PuzzleClient {
    PuzzleClient::new("http://mock", Arc::new(mock.clone()))
}

pub async fn mount_json(server: &MockServer, http_method: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
