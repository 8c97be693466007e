//! Table-driven resource operations.
//!
//! A resource is a static table of operations; each operation names its
//! verb, path template and parameter rule set. `dispatch` is the only code
//! path that runs an operation.

use jira_core::{HttpResponse, Method, ParameterError, Result, RuleSet, Violation};
use serde::Serialize;

use crate::executor::RequestExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: Method,
    /// Relative to the REST root, placeholders in braces: `issue/{issueIdOrKey}`
    pub path: &'static str,
    pub rules: RuleSet,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        method: Method,
        path: &'static str,
        rules: RuleSet,
    ) -> Self {
        Self {
            name,
            method,
            path,
            rules,
        }
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }

        names
    }

    /// Substitute positional, URL-encoded arguments into the path template
    pub fn expand_path(&self, args: &[&str]) -> Result<String> {
        let placeholders = self.placeholders();
        let mut violations = Vec::new();

        for (index, name) in placeholders.iter().enumerate() {
            match args.get(index) {
                None => violations.push(Violation::Missing {
                    key: name.to_string(),
                }),
                Some(arg) if arg.trim().is_empty() => violations.push(Violation::Mismatch {
                    key: name.to_string(),
                    expected: "a non-empty identifier".to_string(),
                }),
                Some(_) => {}
            }
        }
        for index in placeholders.len()..args.len() {
            violations.push(Violation::Unknown {
                key: format!("path argument #{}", index + 1),
            });
        }

        if !violations.is_empty() {
            return Err(ParameterError::new(self.rules.name, violations).into());
        }

        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        for arg in args {
            // Placeholders were counted above, so both braces exist
            let (Some(start), Some(end)) = (rest.find('{'), rest.find('}')) else {
                break;
            };
            path.push_str(&rest[..start]);
            path.push_str(&urlencoding::encode(arg));
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}

/// A Jira resource and the operations it exposes
#[derive(Debug)]
pub struct Resource {
    pub name: &'static str,
    pub operations: &'static [Operation],
}

impl Resource {
    pub fn operation(&self, name: &str) -> Option<&'static Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// Validate, expand the path and execute one operation.
///
/// Nothing reaches the transport unless both parameters and path
/// arguments are valid.
pub fn dispatch<P: Serialize + ?Sized>(
    executor: &RequestExecutor,
    operation: &Operation,
    path_args: &[&str],
    parameters: &P,
) -> Result<HttpResponse> {
    let parameters = operation.rules.check(parameters)?;
    let path = operation.expand_path(path_args)?;

    executor.execute(operation.method, &path, &parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_core::{JiraError, Rule, ValueKind};

    const GET_COMMENT: Operation = Operation::new(
        "get",
        Method::Get,
        "issue/{issueIdOrKey}/comment/{id}",
        RuleSet::new("comment.get", &[Rule::optional("expand", ValueKind::String)]),
    );

    static COMMENTS: Resource = Resource {
        name: "comment",
        operations: &[GET_COMMENT],
    };

    #[test]
    fn placeholders_in_order() {
        assert_eq!(GET_COMMENT.placeholders(), vec!["issueIdOrKey", "id"]);
    }

    #[test]
    fn expands_and_encodes_arguments() {
        assert_eq!(
            GET_COMMENT.expand_path(&["TEST-1", "10001"]).unwrap(),
            "issue/TEST-1/comment/10001"
        );
        assert_eq!(
            GET_COMMENT.expand_path(&["A B/C", "1"]).unwrap(),
            "issue/A%20B%2FC/comment/1"
        );
    }

    #[test]
    fn path_without_placeholders_is_unchanged() {
        let op = Operation::new(
            "meta",
            Method::Get,
            "attachment/meta",
            RuleSet::empty("attachment.meta"),
        );
        assert_eq!(op.expand_path(&[]).unwrap(), "attachment/meta");
    }

    #[test]
    fn missing_empty_and_extra_arguments_are_parameter_errors() {
        let err = GET_COMMENT.expand_path(&["TEST-1"]).unwrap_err();
        match err {
            JiraError::ParameterType(e) => {
                assert_eq!(e.operation, "comment.get");
                assert!(e.concerns("id"));
            }
            other => panic!("unexpected error: {}", other),
        }

        let err = GET_COMMENT.expand_path(&["  ", "1"]).unwrap_err();
        assert!(matches!(err, JiraError::ParameterType(ref e) if e.concerns("issueIdOrKey")));

        let err = GET_COMMENT.expand_path(&["TEST-1", "1", "2"]).unwrap_err();
        assert!(matches!(err, JiraError::ParameterType(ref e) if e.concerns("path argument #3")));
    }

    #[test]
    fn resource_lookup_by_name() {
        assert_eq!(COMMENTS.operation("get"), Some(&GET_COMMENT));
        assert!(COMMENTS.operation("create").is_none());
    }
}
