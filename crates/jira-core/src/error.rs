use std::fmt;

use thiserror::Error;

/// Errors raised by the Jira REST client
#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Invalid parameters for {0}")]
    ParameterType(#[from] ParameterError),

    #[error("Authentication failed ({status}): {message}")]
    Unauthorized {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Resource not found: {message}")]
    NotFound { message: String, body: String },

    #[error("API error ({status}): {message}")]
    Client {
        status: u16,
        message: String,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JiraError {
    /// HTTP status of the response that caused this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::Unauthorized { status, .. } | JiraError::Client { status, .. } => {
                Some(*status)
            }
            JiraError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Raw response body attached to this error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            JiraError::Unauthorized { body, .. }
            | JiraError::NotFound { body, .. }
            | JiraError::Client { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;

/// A parameter bag that did not satisfy the rule set of an operation.
///
/// Every violation found is reported, in rule order, followed by unknown keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation}: {}", join_violations(.violations))]
pub struct ParameterError {
    /// Rule set name, e.g. `issue.create`
    pub operation: String,
    pub violations: Vec<Violation>,
}

impl ParameterError {
    pub fn new(operation: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            operation: operation.into(),
            violations,
        }
    }

    pub fn single(operation: impl Into<String>, violation: Violation) -> Self {
        Self::new(operation, vec![violation])
    }

    /// Whether a violation mentions the given key (dotted for nested keys)
    pub fn concerns(&self, key: &str) -> bool {
        self.violations.iter().any(|v| v.key() == key)
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Key not declared by the rule set
    Unknown { key: String },
    /// Required key absent (or null)
    Missing { key: String },
    /// Value present but of the wrong kind
    Mismatch { key: String, expected: String },
    /// Parameters did not serialize to a JSON object
    NotAnObject { found: String },
}

impl Violation {
    pub fn key(&self) -> &str {
        match self {
            Violation::Unknown { key }
            | Violation::Missing { key }
            | Violation::Mismatch { key, .. } => key,
            Violation::NotAnObject { .. } => "",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unknown { key } => write!(f, "unknown parameter `{}`", key),
            Violation::Missing { key } => write!(f, "missing required parameter `{}`", key),
            Violation::Mismatch { key, expected } => {
                write!(f, "parameter `{}` must be {}", key, expected)
            }
            Violation::NotAnObject { found } => {
                write!(f, "parameters must be an object, got {}", found)
            }
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_error_lists_every_violation() {
        let err = ParameterError::new(
            "issue.delete",
            vec![
                Violation::Mismatch {
                    key: "deleteSubtasks".to_string(),
                    expected: "a boolean".to_string(),
                },
                Violation::Unknown {
                    key: "force".to_string(),
                },
            ],
        );

        assert_eq!(
            err.to_string(),
            "issue.delete: parameter `deleteSubtasks` must be a boolean; unknown parameter `force`"
        );
        assert!(err.concerns("force"));
        assert!(!err.concerns("jql"));
    }

    #[test]
    fn jira_error_wraps_parameter_error() {
        let err: JiraError = ParameterError::single(
            "issue.create",
            Violation::Missing {
                key: "fields".to_string(),
            },
        )
        .into();

        assert_eq!(
            err.to_string(),
            "Invalid parameters for issue.create: missing required parameter `fields`"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn response_errors_expose_status_and_body() {
        let err = JiraError::NotFound {
            message: "Issue does not exist".to_string(),
            body: "{}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("{}"));

        let err = JiraError::Client {
            status: 500,
            message: "boom".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error (500): boom");
    }
}
