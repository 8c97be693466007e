//! Mock transport implementing the `Transport` trait
//!
//! Serves canned responses keyed by verb and API path instead of making HTTP
//! requests.

use jira_core::{HttpRequest, HttpResponse, JiraError, Method, Result, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Maps a request to the responses it should receive
#[derive(Debug, Clone)]
pub struct ResponseMapping {
    pub method: Method,
    /// API path relative to the REST root, e.g. `issue/TEST-1`
    pub path: String,
    /// Outcomes served in order; the last one repeats
    sequence: Vec<Outcome>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Respond(HttpResponse),
    Fail(String),
}

impl ResponseMapping {
    fn matches(&self, request: &HttpRequest) -> bool {
        self.method == request.method && api_path(&request.url) == self.path
    }
}

/// Path after `/rest/api/<version>/`, or the whole URL when it has no REST root
fn api_path(url: &str) -> &str {
    const REST_ROOT: &str = "/rest/api/";

    let Some(start) = url.find(REST_ROOT) else {
        return url.trim_start_matches('/');
    };
    let versioned = &url[start + REST_ROOT.len()..];
    match versioned.find('/') {
        Some(slash) => &versioned[slash + 1..],
        None => "",
    }
}

/// A transport that records every request and answers from fixtures
#[derive(Debug, Default)]
pub struct MockTransport {
    mappings: Vec<ResponseMapping>,

    /// Track call counts for sequence responses
    call_counts: Mutex<HashMap<usize, usize>>,

    /// Every request received, in order
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body. Registering the same route
    /// again queues another response for the next call.
    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.push(method, path, Outcome::Respond(HttpResponse::new(status, body)))
    }

    /// Answer `method path` with a raw text body
    pub fn respond_text(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Outcome::Respond(HttpResponse::new(status, body)))
    }

    /// Simulate a transport failure (connection refused, timeout, ...)
    pub fn fail(self, method: Method, path: &str, message: &str) -> Self {
        self.push(method, path, Outcome::Fail(message.to_string()))
    }

    fn push(mut self, method: Method, path: &str, outcome: Outcome) -> Self {
        let path = path.trim_start_matches('/');
        match self
            .mappings
            .iter_mut()
            .find(|m| m.method == method && m.path == path)
        {
            Some(mapping) => mapping.sequence.push(outcome),
            None => self.mappings.push(ResponseMapping {
                method,
                path: path.to_string(),
                sequence: vec![outcome],
            }),
        }
        self
    }

    /// All requests received so far
    pub fn calls(&self) -> Vec<HttpRequest> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn last_call(&self) -> Option<HttpRequest> {
        lock(&self.calls).last().cloned()
    }

    /// Forget recorded calls and restart every response sequence
    pub fn reset(&self) {
        lock(&self.calls).clear();
        lock(&self.call_counts).clear();
    }

    fn next_outcome(&self, request: &HttpRequest) -> Option<Outcome> {
        let (index, mapping) = self
            .mappings
            .iter()
            .enumerate()
            .find(|(_, m)| m.matches(request))?;

        let mut counts = lock(&self.call_counts);
        let count = counts.entry(index).or_insert(0);
        let position = (*count).min(mapping.sequence.len().saturating_sub(1));
        *count += 1;

        mapping.sequence.get(position).cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        lock(&self.calls).push(request.clone());

        match self.next_outcome(request) {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(message)) => Err(JiraError::Http(message)),
            None => Ok(HttpResponse::new(
                404,
                serde_json::json!({
                    "errorMessages": [
                        format!("No mock response for {} {}", request.method, request.url)
                    ],
                    "errors": {}
                })
                .to_string(),
            )),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
