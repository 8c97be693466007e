use std::fmt::Display;

use jira_core::{HttpResponse, Method, Parameters, Result, Rule, RuleSet, ValueKind};
use serde::Serialize;
use serde_json::Value;

use crate::executor::RequestExecutor;
use crate::resource::{dispatch, Operation, Resource};

const VISIBILITY: &[Rule] = &[
    Rule::required("type", ValueKind::OneOf(&["group", "role"])),
    Rule::required("value", ValueKind::String),
];

pub const LIST: Operation = Operation::new(
    "list",
    Method::Get,
    "issue/{issueIdOrKey}/comment",
    RuleSet::new(
        "comment.list",
        &[
            Rule::optional("startAt", ValueKind::Integer),
            Rule::optional("maxResults", ValueKind::Integer),
            Rule::optional("orderBy", ValueKind::String),
            Rule::optional("expand", ValueKind::String),
        ],
    ),
);

pub const GET: Operation = Operation::new(
    "get",
    Method::Get,
    "issue/{issueIdOrKey}/comment/{id}",
    RuleSet::new("comment.get", &[Rule::optional("expand", ValueKind::String)]),
);

pub const ADD: Operation = Operation::new(
    "add",
    Method::Post,
    "issue/{issueIdOrKey}/comment",
    RuleSet::new(
        "comment.add",
        &[
            Rule::required("body", ValueKind::String),
            Rule::optional("visibility", ValueKind::Shape(VISIBILITY)),
            Rule::optional("properties", ValueKind::Array),
        ],
    ),
);

pub const UPDATE: Operation = Operation::new(
    "update",
    Method::Put,
    "issue/{issueIdOrKey}/comment/{id}",
    RuleSet::new(
        "comment.update",
        &[
            Rule::optional("body", ValueKind::String),
            Rule::optional("visibility", ValueKind::Shape(VISIBILITY)),
            Rule::optional("properties", ValueKind::Array),
        ],
    ),
);

pub const DELETE: Operation = Operation::new(
    "delete",
    Method::Delete,
    "issue/{issueIdOrKey}/comment/{id}",
    RuleSet::empty("comment.delete"),
);

pub static COMMENT: Resource = Resource {
    name: "comment",
    operations: &[LIST, GET, ADD, UPDATE, DELETE],
};

/// Comments on an issue
#[derive(Debug, Clone, Copy)]
pub struct CommentRequest<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> CommentRequest<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub fn list<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &LIST, &[&issue_id_or_key.to_string()], parameters)
    }

    pub fn get<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        comment_id: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &GET,
            &[&issue_id_or_key.to_string(), &comment_id.to_string()],
            parameters,
        )
    }

    pub fn add<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &ADD, &[&issue_id_or_key.to_string()], parameters)
    }

    pub fn update<P: Serialize + ?Sized>(
        &self,
        issue_id_or_key: impl Display,
        comment_id: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &UPDATE,
            &[&issue_id_or_key.to_string(), &comment_id.to_string()],
            parameters,
        )
    }

    pub fn delete(
        &self,
        issue_id_or_key: impl Display,
        comment_id: impl Display,
    ) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &DELETE,
            &[&issue_id_or_key.to_string(), &comment_id.to_string()],
            &Parameters::new(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityType {
    Group,
    Role,
}

/// Restricts who can see a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visibility {
    #[serde(rename = "type")]
    pub kind: VisibilityType,
    pub value: String,
}

impl Visibility {
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            kind: VisibilityType::Role,
            value: name.into(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            kind: VisibilityType::Group,
            value: name.into(),
        }
    }
}

/// Body of an add or update call
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Value>>,
}

impl CommentParameters {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn visible_to(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}
