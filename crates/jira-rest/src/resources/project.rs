use std::fmt::Display;

use jira_core::{HttpResponse, Method, Parameters, Result, Rule, RuleSet, ValueKind};
use serde::Serialize;

use crate::executor::RequestExecutor;
use crate::resource::{dispatch, Operation, Resource};

const PROJECT_TYPES: &[&str] = &["software", "service_desk", "business"];
const ASSIGNEE_TYPES: &[&str] = &["PROJECT_LEAD", "UNASSIGNED"];

pub const LIST: Operation = Operation::new(
    "list",
    Method::Get,
    "project",
    RuleSet::new(
        "project.list",
        &[
            Rule::optional("expand", ValueKind::String),
            Rule::optional("recent", ValueKind::Integer),
            Rule::optional("properties", ValueKind::StringList),
        ],
    ),
);

pub const GET: Operation = Operation::new(
    "get",
    Method::Get,
    "project/{projectIdOrKey}",
    RuleSet::new(
        "project.get",
        &[
            Rule::optional("expand", ValueKind::String),
            Rule::optional("properties", ValueKind::StringList),
        ],
    ),
);

pub const CREATE: Operation = Operation::new(
    "create",
    Method::Post,
    "project",
    RuleSet::new(
        "project.create",
        &[
            Rule::required("key", ValueKind::String),
            Rule::required("name", ValueKind::String),
            Rule::required("projectTypeKey", ValueKind::OneOf(PROJECT_TYPES)),
            Rule::optional("projectTemplateKey", ValueKind::String),
            Rule::optional("description", ValueKind::String),
            Rule::optional("lead", ValueKind::String),
            Rule::optional("leadAccountId", ValueKind::String),
            Rule::optional("url", ValueKind::String),
            Rule::optional("assigneeType", ValueKind::OneOf(ASSIGNEE_TYPES)),
            Rule::optional("avatarId", ValueKind::Integer),
            Rule::optional("issueSecurityScheme", ValueKind::Integer),
            Rule::optional("permissionScheme", ValueKind::Integer),
            Rule::optional("notificationScheme", ValueKind::Integer),
            Rule::optional("categoryId", ValueKind::Integer),
        ],
    ),
);

pub const EDIT: Operation = Operation::new(
    "edit",
    Method::Put,
    "project/{projectIdOrKey}",
    RuleSet::new(
        "project.edit",
        &[
            Rule::optional("key", ValueKind::String),
            Rule::optional("name", ValueKind::String),
            Rule::optional("projectTypeKey", ValueKind::OneOf(PROJECT_TYPES)),
            Rule::optional("projectTemplateKey", ValueKind::String),
            Rule::optional("description", ValueKind::String),
            Rule::optional("lead", ValueKind::String),
            Rule::optional("leadAccountId", ValueKind::String),
            Rule::optional("url", ValueKind::String),
            Rule::optional("assigneeType", ValueKind::OneOf(ASSIGNEE_TYPES)),
            Rule::optional("avatarId", ValueKind::Integer),
            Rule::optional("issueSecurityScheme", ValueKind::Integer),
            Rule::optional("permissionScheme", ValueKind::Integer),
            Rule::optional("notificationScheme", ValueKind::Integer),
            Rule::optional("categoryId", ValueKind::Integer),
        ],
    ),
);

pub const DELETE: Operation = Operation::new(
    "delete",
    Method::Delete,
    "project/{projectIdOrKey}",
    RuleSet::empty("project.delete"),
);

pub const STATUSES: Operation = Operation::new(
    "statuses",
    Method::Get,
    "project/{projectIdOrKey}/statuses",
    RuleSet::empty("project.statuses"),
);

pub static PROJECT: Resource = Resource {
    name: "project",
    operations: &[LIST, GET, CREATE, EDIT, DELETE, STATUSES],
};

#[derive(Debug, Clone, Copy)]
pub struct ProjectRequest<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> ProjectRequest<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// All projects visible to the user
    pub fn list<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &LIST, &[], parameters)
    }

    pub fn get<P: Serialize + ?Sized>(
        &self,
        project_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &GET, &[&project_id_or_key.to_string()], parameters)
    }

    pub fn create<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &CREATE, &[], parameters)
    }

    pub fn edit<P: Serialize + ?Sized>(
        &self,
        project_id_or_key: impl Display,
        parameters: &P,
    ) -> Result<HttpResponse> {
        dispatch(self.executor, &EDIT, &[&project_id_or_key.to_string()], parameters)
    }

    pub fn delete(&self, project_id_or_key: impl Display) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &DELETE,
            &[&project_id_or_key.to_string()],
            &Parameters::new(),
        )
    }

    /// Valid statuses for each issue type of the project
    pub fn statuses(&self, project_id_or_key: impl Display) -> Result<HttpResponse> {
        dispatch(
            self.executor,
            &STATUSES,
            &[&project_id_or_key.to_string()],
            &Parameters::new(),
        )
    }
}
