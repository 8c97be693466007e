use std::path::Path;
use std::sync::Arc;

use jira_core::{EventListener, JiraError, Result, Transport};
use serde_json::json;

use crate::config::JiraConfig;
use crate::executor::RequestExecutor;
use crate::http::UreqTransport;
use crate::models::*;
use crate::resources::{
    AttachmentRequest, CommentParameters, CommentRequest, CreateParameters, IssueRequest,
    ProjectRequest, SearchParameters, UserRequest,
};

/// Jira REST client.
///
/// Resource accessors (`issues()`, `projects()`, ...) expose every operation
/// with raw responses; the typed helpers below parse the common ones.
#[derive(Debug, Clone)]
pub struct JiraClient {
    config: JiraConfig,
    executor: RequestExecutor,
}

impl JiraClient {
    /// Create a client that talks HTTP through ureq
    pub fn new(config: JiraConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Create a client over any transport (mock, recording, ...)
    pub fn with_transport(config: JiraConfig, transport: impl Transport + 'static) -> Result<Self> {
        config.validate()?;
        let executor = RequestExecutor::new(&config, Arc::new(transport))?;
        Ok(Self { config, executor })
    }

    /// Load configuration from files and environment, then build the client
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::new(JiraConfig::load(config_path)?)
    }

    /// Register a listener for write outcomes
    pub fn with_listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.executor.add_listener(Arc::new(listener));
        self
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn issues(&self) -> IssueRequest<'_> {
        IssueRequest::new(&self.executor)
    }

    pub fn projects(&self) -> ProjectRequest<'_> {
        ProjectRequest::new(&self.executor)
    }

    pub fn comments(&self) -> CommentRequest<'_> {
        CommentRequest::new(&self.executor)
    }

    pub fn attachments(&self) -> AttachmentRequest<'_> {
        AttachmentRequest::new(&self.executor)
    }

    pub fn users(&self) -> UserRequest<'_> {
        UserRequest::new(&self.executor)
    }

    // ==================== Typed helpers ====================

    pub fn get_issue(&self, key: &str) -> Result<Issue> {
        self.issues().get(key, &())?.json()
    }

    pub fn search_issues(&self, parameters: &SearchParameters) -> Result<SearchResults> {
        self.issues().search(parameters)?.json()
    }

    pub fn create_issue(&self, parameters: &CreateParameters) -> Result<CreatedIssue> {
        self.issues().create(parameters)?.json()
    }

    pub fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let list: TransitionList = self.issues().transitions(key, &())?.json()?;
        Ok(list.transitions)
    }

    /// Move an issue through the workflow transition with the given ID
    pub fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
        self.issues()
            .transition(key, &json!({"transition": {"id": transition_id}}))?;
        Ok(())
    }

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.projects().list(&())?.json()
    }

    pub fn get_project(&self, key: &str) -> Result<Project> {
        self.projects().get(key, &())?.json()
    }

    pub fn project_statuses(&self, key: &str) -> Result<Vec<IssueTypeStatuses>> {
        self.projects().statuses(key)?.json()
    }

    pub fn list_comments(&self, key: &str) -> Result<Vec<Comment>> {
        let page: CommentPage = self.comments().list(key, &())?.json()?;
        Ok(page.comments)
    }

    pub fn add_comment(&self, key: &str, body: &str) -> Result<Comment> {
        self.comments()
            .add(key, &CommentParameters::text(body))?
            .json()
    }

    pub fn get_attachment(&self, id: &str) -> Result<Attachment> {
        self.attachments().get(id)?.json()
    }

    pub fn attachment_meta(&self) -> Result<AttachmentMeta> {
        self.attachments().meta()?.json()
    }

    /// The authenticated user, useful as a connectivity check
    pub fn myself(&self) -> Result<User> {
        self.users().myself(&())?.json()
    }

    /// Issues matching `jql`, following `startAt` until `total` is reached
    pub fn search_all(&self, jql: &str, page_size: u32) -> Result<Vec<Issue>> {
        if page_size == 0 {
            return Err(JiraError::Config("page size must be positive".to_string()));
        }

        let mut issues = Vec::new();
        loop {
            let parameters = SearchParameters::new(jql)
                .start_at(issues.len() as u32)
                .max_results(page_size);
            let page = self.search_issues(&parameters)?;
            let fetched = page.issues.len();
            issues.extend(page.issues);

            if fetched == 0 || issues.len() as u64 >= page.total {
                return Ok(issues);
            }
        }
    }
}
