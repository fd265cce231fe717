//! Mock transport for unit testing.
//!
//! Canned JSON responses and injected failures keyed by method + path, plus
//! a record of every request issued, so adapter tests can assert exactly
//! what went over the wire without a network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::VenueError;

use super::Transport;

/// Canned outcome for one route.
#[derive(Debug, Clone)]
enum Canned {
    /// Successful JSON response.
    Json(Value),
    /// Non-success HTTP status.
    Status(u16, String),
    /// Body that fails to decode.
    Malformed(String),
}

/// One request the mock saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// "GET" or "POST".
    pub method: &'static str,
    /// Request path.
    pub path: String,
    /// Query parameters (GET only).
    pub query: Vec<(String, String)>,
    /// JSON body (POST only).
    pub body: Option<Value>,
}

/// In-memory transport for tests.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(&'static str, String), Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create an empty mock. Unrouted requests fail with a malformed-response
    /// error so tests of best-effort operations still exercise the error path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to GET `path` with `response`.
    pub fn on_get(&self, path: impl Into<String>, response: Value) -> &Self {
        self.route("GET", path.into(), Canned::Json(response));
        self
    }

    /// Respond to POST `path` with `response`.
    pub fn on_post(&self, path: impl Into<String>, response: Value) -> &Self {
        self.route("POST", path.into(), Canned::Json(response));
        self
    }

    /// Fail GET `path` with the given HTTP status.
    pub fn fail_get(&self, path: impl Into<String>, status: u16) -> &Self {
        self.route(
            "GET",
            path.into(),
            Canned::Status(status, "mock transport failure".to_string()),
        );
        self
    }

    /// Fail POST `path` with the given HTTP status.
    pub fn fail_post(&self, path: impl Into<String>, status: u16) -> &Self {
        self.route(
            "POST",
            path.into(),
            Canned::Status(status, "mock transport failure".to_string()),
        );
        self
    }

    /// Make GET `path` return a structurally unusable body.
    pub fn malformed_get(&self, path: impl Into<String>) -> &Self {
        self.route(
            "GET",
            path.into(),
            Canned::Malformed("mock malformed body".to_string()),
        );
        self
    }

    /// All requests issued so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The last request issued, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn route(&self, method: &'static str, path: String, canned: Canned) {
        self.routes.lock().unwrap().insert((method, path), canned);
    }

    fn respond(&self, method: &'static str, path: &str) -> Result<Value, VenueError> {
        let routes = self.routes.lock().unwrap();
        match routes.get(&(method, path.to_string())) {
            Some(Canned::Json(value)) => Ok(value.clone()),
            Some(Canned::Status(status, body)) => Err(VenueError::Status {
                status: *status,
                body: body.clone(),
            }),
            Some(Canned::Malformed(reason)) => Err(VenueError::Malformed(reason.clone())),
            None => Err(VenueError::Status {
                status: 404,
                body: format!("no mock route for {} {}", method, path),
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, VenueError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: None,
        });
        self.respond("GET", path)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, VenueError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        });
        self.respond("POST", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn canned_response_is_returned() {
        let mock = MockTransport::new();
        mock.on_get("/markets/abc", json!({"resolved": true}));

        let value = mock.get("/markets/abc", &[]).await.unwrap();
        assert_eq!(value, json!({"resolved": true}));
    }

    #[tokio::test]
    async fn unrouted_request_fails() {
        let mock = MockTransport::new();
        let result = mock.get("/nowhere", &[]).await;
        assert!(matches!(
            result,
            Err(VenueError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn injected_failure_is_returned() {
        let mock = MockTransport::new();
        mock.fail_post("/orders", 503);

        let result = mock.post("/orders", json!({})).await;
        assert!(matches!(
            result,
            Err(VenueError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn requests_are_recorded_in_order() {
        let mock = MockTransport::new();
        mock.on_get("/a", json!(1)).on_post("/b", json!(2));

        let _ = mock.get("/a", &[("x", "1".to_string())]).await;
        let _ = mock.post("/b", json!({"k": "v"})).await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].query, vec![("x".to_string(), "1".to_string())]);
        assert_eq!(requests[1].body, Some(json!({"k": "v"})));
    }
}
