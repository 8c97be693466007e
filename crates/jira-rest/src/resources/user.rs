use jira_core::{HttpResponse, Method, Result, Rule, RuleSet, ValueKind};
use serde::Serialize;

use crate::executor::RequestExecutor;
use crate::resource::{dispatch, Operation, Resource};

pub const GET: Operation = Operation::new(
    "get",
    Method::Get,
    "user",
    RuleSet::new(
        "user.get",
        &[
            Rule::optional("accountId", ValueKind::String),
            Rule::optional("username", ValueKind::String),
            Rule::optional("key", ValueKind::String),
            Rule::optional("expand", ValueKind::String),
        ],
    ),
);

pub const SEARCH: Operation = Operation::new(
    "search",
    Method::Get,
    "user/search",
    RuleSet::new(
        "user.search",
        &[
            Rule::optional("query", ValueKind::String),
            Rule::optional("username", ValueKind::String),
            Rule::optional("accountId", ValueKind::String),
            Rule::optional("property", ValueKind::String),
            Rule::optional("startAt", ValueKind::Integer),
            Rule::optional("maxResults", ValueKind::Integer),
            Rule::optional("includeActive", ValueKind::Boolean),
            Rule::optional("includeInactive", ValueKind::Boolean),
        ],
    ),
);

pub const MYSELF: Operation = Operation::new(
    "myself",
    Method::Get,
    "myself",
    RuleSet::new("user.myself", &[Rule::optional("expand", ValueKind::String)]),
);

pub static USER: Resource = Resource {
    name: "user",
    operations: &[GET, SEARCH, MYSELF],
};

#[derive(Debug, Clone, Copy)]
pub struct UserRequest<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> UserRequest<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// A single user, selected by `accountId`, `username` or `key`
    pub fn get<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &GET, &[], parameters)
    }

    pub fn search<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &SEARCH, &[], parameters)
    }

    /// The user the client is authenticated as
    pub fn myself<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<HttpResponse> {
        dispatch(self.executor, &MYSELF, &[], parameters)
    }
}
