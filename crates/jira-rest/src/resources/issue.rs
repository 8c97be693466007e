use std::fmt::Display;

use jira_core::{HttpResponse, Method, Result, Rule, RuleSet, ValueKind};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::executor::RequestExecutor;
use crate::resource::{dispatch, Operation, Resource};

const TRANSITION_REF: &[Rule] = &[Rule::required("id", ValueKind::String)];

pub const CREATE: Operation = Operation::new(
    "create",
    Method::Post,
    "issue",
    RuleSet::new(
        "issue.create",
        &[
            Rule::required("fields", ValueKind::Object),
            Rule::optional("update", ValueKind::Object),
            Rule::optional("transition", ValueKind::Shape(TRANSITION_REF)),
            Rule::optional("historyMetadata", ValueKind::Object),
            Rule::optional("properties", ValueKind::Array),
            Rule::optional("updateHistory", ValueKind::Boolean),
        ],
    ),
);

pub const GET: Operation = Operation::new(
    "get",
    Method::Get,
    "issue/{issueIdOrKey}",
    RuleSet::new(
        "issue.get",
        &[
            Rule::optional("fields", ValueKind::StringList),
            Rule::optional("fieldsByKeys", ValueKind::Boolean),
            Rule::optional("expand", ValueKind::String),
            Rule::optional("properties", ValueKind::StringList),
            Rule::optional("updateHistory", ValueKind::Boolean),
        ],
    ),
);

pub const EDIT: Operation = Operation::new(
    "edit",
    Method::Put,
    "issue/{issueIdOrKey}",
    RuleSet::new(
        "issue.edit",
        &[
            Rule::optional("fields", ValueKind::Object),
            Rule::optional("update", ValueKind::Object),
            Rule::optional("transition", ValueKind::Shape(TRANSITION_REF)),
            Rule::optional("historyMetadata", ValueKind::Object),
            Rule::optional("properties", ValueKind::Array),
            Rule::optional("notifyUsers", ValueKind::Boolean),
            Rule::optional("overrideScreenSecurity", ValueKind::Boolean),
            Rule::optional("overrideEditableFlag", ValueKind::Boolean),
        ],
    ),
);

pub const DELETE: Operation = Operation::new(
    "delete",
    Method::Delete,
    "issue/{issueIdOrKey}",
    RuleSet::new(
        "issue.delete",
        &[Rule::optional("deleteSubtasks", ValueKind::Boolean)],
    ),
);

pub const SEARCH: Operation = Operation::new(
    "search",
    Method::Post,
    "search",
    RuleSet::new(
        "issue.search",
        &[
            Rule::required("jql", ValueKind::String),
            Rule::optional("startAt", ValueKind::Integer),
            Rule::optional("maxResults", ValueKind::Integer),
            Rule::optional("validateQuery", ValueKind::OneOf(&["strict", "warn", "none"])),
            Rule::optional("fields", ValueKind::StringList),
            Rule::optional("expand", ValueKind::StringList),
            Rule::optional("properties", ValueKind::StringList),
            Rule::optional("fieldsByKeys", ValueKind::Boolean),
        ],
    ),
);

pub const ASSIGN: Operation = Operation::new(
    "assign",
    Method::Put,
    "issue/{issueIdOrKey}/assignee",
    RuleSet::new(
        "issue.assign",
        &[
            Rule::optional("accountId", ValueKind::String),
            Rule::optional("name", ValueKind::String),
            Rule::optional("key", ValueKind::String),
        ],
    ),
);

pub const TRANSITIONS: Operation = Operation::new(
    "transitions",
    Method::Get,
    "issue/{issueIdOrKey}/transitions",
    RuleSet::new(
        "issue.transitions",
        &[
            Rule::optional("expand", ValueKind::String),
            Rule::optional("transitionId", ValueKind::String),
            Rule::optional("skipRemoteOnlyCondition", ValueKind::Boolean),
        ],
    ),
);

pub const TRANSITION: Operation = Operation::new(
    "transition",
    Method::Post,
    "issue/{issueIdOrKey}/transitions",
    RuleSet::new(
        "issue.transition",
        &[
            Rule::required("transition", ValueKind::Shape(TRANSITION_REF)),
            Rule::optional("fields", ValueKind::Object),
            Rule::optional("update", ValueKind::Object),
            Rule::optional("historyMetadata", ValueKind::Object),
        ],
    ),
);

pub static ISSUE: Resource = Resource {
    name: "issue",
    operations: &[
        CREATE,
        GET,
        EDIT,
        DELETE,
        SEARCH,
        ASSIGN,
        TRANSITIONS,
        TRANSITION,
    ],
};

/// Issue operations
#[derive(Debug, Clone, Copy)]
pub struct IssueRequest<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> IssueRequest<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Creates an issue or a sub-task. `fields` is required.
    pub fn create<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &CREATE, &[], parameters)
    }

    /// Returns a full representation of the issue
    pub fn get<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &GET, &[&issue_id_or_key.to_string()], parameters)
    }

    pub fn edit<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &EDIT, &[&issue_id_or_key.to_string()], parameters)
    }

    pub fn delete<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &DELETE, &[&issue_id_or_key.to_string()], parameters)
    }

    /// Searches for issues using JQL
    pub fn search<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &SEARCH, &[], parameters)
    }

    pub fn assign<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &ASSIGN, &[&issue_id_or_key.to_string()], parameters)
    }

    /// Transitions available to the current user
    pub fn transitions<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &TRANSITIONS,
            &[&issue_id_or_key.to_string()],
            parameters,
        )
    }

    pub fn transition<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &TRANSITION,
            &[&issue_id_or_key.to_string()],
            parameters,
        )
    }
}

/// Reference to a workflow transition by ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRef {
    pub id: String,
}

impl TransitionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_history: Option<bool>,
}

impl CreateParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one entry of `fields`
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_by_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_history: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_screen_security: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_editable_flag: Option<bool>,
}

impl EditParameters {
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_subtasks: Option<bool>,
}

/// How strictly Jira validates the JQL query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateQuery {
    Strict,
    Warn,
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub jql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_query: Option<ValidateQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_by_keys: Option<bool>,
}

impl SearchParameters {
    pub fn new(jql: impl Into<String>) -> Self {
        Self {
            jql: jql.into(),
            ..Self::default()
        }
    }

    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_operation_is_in_the_table() {
        let names: Vec<_> = ISSUE.operations.iter().map(|op| op.name).collect();
        assert_eq!(
            names,
            vec!["create", "get", "edit", "delete", "search", "assign", "transitions", "transition"]
        );
        for op in ISSUE.operations {
            assert!(op.rules.name.starts_with("issue."));
        }
    }

    #[test]
    fn typed_parameters_pass_their_rule_sets() {
        let create = CreateParameters::new()
            .field("project", json!({"key": "TEST"}))
            .field("summary", "New issue")
            .field("issuetype", json!({"name": "Task"}));
        let parameters = CREATE.rules.check(&create).unwrap();
        assert_eq!(parameters["fields"]["summary"], "New issue");

        let get = GetParameters {
            fields: Some(vec!["summary".to_string()]),
            expand: Some("renderedFields".to_string()),
            ..GetParameters::default()
        };
        assert!(GET.rules.check(&get).is_ok());

        let edit = EditParameters {
            notify_users: Some(false),
            transition: Some(TransitionRef::new("31")),
            ..EditParameters::default()
        }
        .field("summary", "Renamed");
        assert!(EDIT.rules.check(&edit).is_ok());

        let delete = DeleteParameters {
            delete_subtasks: Some(true),
        };
        assert_eq!(
            DELETE.rules.check(&delete).unwrap()["deleteSubtasks"],
            json!(true)
        );

        let search = SearchParameters {
            validate_query: Some(ValidateQuery::Disabled),
            ..SearchParameters::new("project = TEST").start_at(0).max_results(50)
        }
        .fields(&["summary", "status"]);
        let parameters = SEARCH.rules.check(&search).unwrap();
        assert_eq!(parameters["validateQuery"], "none");
        assert_eq!(parameters["maxResults"], 50);
    }

    #[test]
    fn default_create_parameters_lack_fields() {
        assert!(CREATE.rules.check(&CreateParameters::default()).is_err());
    }

    #[test]
    fn transition_requires_an_id() {
        assert!(TRANSITION.rules.check(&json!({"transition": {}})).is_err());
        assert!(TRANSITION
            .rules
            .check(&json!({"transition": {"id": "21"}}))
            .is_ok());
    }
}
