use std::fmt::Display;

use jira_core::{HttpResponse, Method, Parameters, Result, RuleSet};

use crate::executor::RequestExecutor;
use crate::resource::{dispatch, Operation, Resource};

pub const GET: Operation = Operation::new(
    "get",
    Method::Get,
    "attachment/{id}",
    RuleSet::empty("attachment.get"),
);

pub const DELETE: Operation = Operation::new(
    "delete",
    Method::Delete,
    "attachment/{id}",
    RuleSet::empty("attachment.delete"),
);

pub const META: Operation = Operation::new(
    "meta",
    Method::Get,
    "attachment/meta",
    RuleSet::empty("attachment.meta"),
);

pub static ATTACHMENT: Resource = Resource {
    name: "attachment",
    operations: &[GET, DELETE, META],
};

/// Attachment metadata. Uploads are multipart and not covered here.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentRequest<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> AttachmentRequest<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub fn get(&self, id: impl Display) -> Result<HttpResponse> {
        dispatch(self.executor, &GET, &[&id.to_string()], &Parameters::new())
    }

    pub fn delete(&self, id: impl Display) -> Result<HttpResponse> {
        dispatch(self.executor, &DELETE, &[&id.to_string()], &Parameters::new())
    }

    /// Attachment settings: whether attachments are enabled and the size limit
    pub fn meta(&self) -> Result<HttpResponse> {
        dispatch(self.executor, &META, &[], &Parameters::new())
    }
}
