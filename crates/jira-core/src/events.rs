//! Events emitted after write operations.
//!
//! Hosts register listeners to react to successful or failed writes, for
//! example to invalidate their own caches or notify users.

use crate::error::JiraError;
use crate::transport::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Succeeded {
        method: Method,
        path: String,
        status: u16,
    },
    Failed {
        method: Method,
        path: String,
        status: Option<u16>,
        message: String,
    },
}

impl RequestEvent {
    pub fn failed(method: Method, path: impl Into<String>, error: &JiraError) -> Self {
        RequestEvent::Failed {
            method,
            path: path.into(),
            status: error.status(),
            message: error.to_string(),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            RequestEvent::Succeeded { method, .. } | RequestEvent::Failed { method, .. } => *method,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            RequestEvent::Succeeded { path, .. } | RequestEvent::Failed { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestEvent::Succeeded { .. })
    }
}

/// Receives request events
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &RequestEvent);
}

impl<F> EventListener for F
where
    F: Fn(&RequestEvent) + Send + Sync,
{
    fn on_event(&self, event: &RequestEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn failed_event_carries_status_and_message() {
        let error = JiraError::NotFound {
            message: "Issue does not exist".to_string(),
            body: String::new(),
        };
        let event = RequestEvent::failed(Method::Delete, "issue/TEST-1", &error);

        assert_eq!(
            event,
            RequestEvent::Failed {
                method: Method::Delete,
                path: "issue/TEST-1".to_string(),
                status: Some(404),
                message: "Resource not found: Issue does not exist".to_string(),
            }
        );
        assert!(!event.is_success());
        assert_eq!(event.path(), "issue/TEST-1");
    }

    #[test]
    fn closures_are_listeners() {
        let seen = Mutex::new(Vec::new());
        let listener = |event: &RequestEvent| seen.lock().unwrap().push(event.method());

        listener.on_event(&RequestEvent::Succeeded {
            method: Method::Post,
            path: "issue".to_string(),
            status: 201,
        });

        assert_eq!(*seen.lock().unwrap(), vec![Method::Post]);
    }
}
