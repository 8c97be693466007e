//! Maps HTTP statuses returned by Jira onto the error taxonomy.

use crate::error::{JiraError, Result};
use crate::transport::HttpResponse;

/// Partition of the HTTP status space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Unauthorized,
    NotFound,
    ClientError,
}

pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401 | 403 => StatusClass::Unauthorized,
        404 => StatusClass::NotFound,
        _ => StatusClass::ClientError,
    }
}

/// Pass a successful response through, or turn it into the matching error
pub fn interpret(response: HttpResponse) -> Result<HttpResponse> {
    let status = response.status;

    match classify(status) {
        StatusClass::Success => Ok(response),
        StatusClass::Unauthorized => Err(JiraError::Unauthorized {
            status,
            message: error_message(status, &response.body),
            body: response.body,
        }),
        StatusClass::NotFound => Err(JiraError::NotFound {
            message: error_message(status, &response.body),
            body: response.body,
        }),
        StatusClass::ClientError => Err(JiraError::Client {
            status,
            message: error_message(status, &response.body),
            body: response.body,
        }),
    }
}

/// Extract a readable message from a Jira error body.
///
/// Jira error format: `{"errorMessages":["..."], "errors":{"field":"..."}}`
pub fn error_message(status: u16, body: &str) -> String {
    let Ok(error_response) = serde_json::from_str::<serde_json::Value>(body) else {
        return if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
    };

    let mut messages = Vec::new();

    if let Some(errors) = error_response
        .get("errorMessages")
        .and_then(|e| e.as_array())
    {
        for e in errors {
            if let Some(s) = e.as_str() {
                messages.push(s.to_string());
            }
        }
    }

    if let Some(errors) = error_response.get("errors").and_then(|e| e.as_object()) {
        for (field, msg) in errors {
            if let Some(s) = msg.as_str() {
                messages.push(format!("{}: {}", field, s));
            }
        }
    }

    if messages.is_empty() {
        format!("HTTP {}", status)
    } else {
        messages.join("; ")
    }
}
