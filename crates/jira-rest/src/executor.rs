//! The single request path shared by every resource operation.
//!
//! Builds the full URL, attaches authentication and default headers,
//! serializes parameters (query string for GET/DELETE, JSON body for
//! POST/PUT), sends through the transport and maps the status.

use std::fmt;
use std::sync::Arc;

use jira_core::{
    interpret, EventListener, HttpRequest, HttpResponse, Method, Parameters, RequestEvent, Result,
    Transport,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::JiraConfig;

#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    api_root: String,
    auth_header: String,
    listeners: Vec<Arc<dyn EventListener>>,
    notify_success: bool,
    notify_failure: bool,
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("api_root", &self.api_root)
            .field("listeners", &self.listeners.len())
            .field("notify_success", &self.notify_success)
            .field("notify_failure", &self.notify_failure)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Fails when the configuration lacks a usable host or credentials
    pub fn new(config: &JiraConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let api_root = config.api_root()?;
        let auth_header = config.credentials()?.header_value();

        Ok(Self {
            transport,
            api_root,
            auth_header,
            listeners: Vec::new(),
            notify_success: config.success_listener,
            notify_failure: config.failure_listener,
        })
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// `<host>/rest/api/<version>`
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Build the request without sending it
    pub fn prepare(&self, method: Method, path: &str, parameters: &Parameters) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.url_for(path));

        request
            .headers
            .push(("Authorization".to_string(), self.auth_header.clone()));
        request
            .headers
            .push(("Accept".to_string(), "application/json".to_string()));

        if method.sends_body() {
            request
                .headers
                .push(("Content-Type".to_string(), "application/json".to_string()));
            request.body = Some(Value::Object(parameters.clone()));
        } else {
            request.query = query_pairs(parameters);
        }

        request
    }

    /// Parameters are sent as given; resource operations validate before calling this
    #[instrument(skip(self, parameters))]
    pub fn execute(
        &self,
        method: Method,
        path: &str,
        parameters: &Parameters,
    ) -> Result<HttpResponse> {
        let request = self.prepare(method, path, parameters);
        self.send(&request)
    }

    /// Send a prepared request, e.g. one a host job queue held back
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "Sending Jira request");

        let outcome = self.transport.send(request).and_then(interpret);

        match &outcome {
            Ok(response) => debug!(status = response.status, "Jira request succeeded"),
            Err(e) => warn!(
                method = %request.method,
                url = %request.url,
                status = ?e.status(),
                error = %e,
                "Jira request failed"
            ),
        }

        self.notify(request, &outcome);
        outcome
    }

    fn notify(&self, request: &HttpRequest, outcome: &Result<HttpResponse>) {
        if !request.method.is_write() || self.listeners.is_empty() {
            return;
        }

        let path = request
            .url
            .strip_prefix(self.api_root.as_str())
            .unwrap_or(&request.url)
            .trim_start_matches('/');

        let event = match outcome {
            Ok(response) if self.notify_success => RequestEvent::Succeeded {
                method: request.method,
                path: path.to_string(),
                status: response.status,
            },
            Err(e) if self.notify_failure => RequestEvent::failed(request.method, path, e),
            _ => return,
        };

        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}

fn query_pairs(parameters: &Parameters) -> Vec<(String, String)> {
    parameters
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}
