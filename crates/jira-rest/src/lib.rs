//! Validated, table-driven client for the Jira REST API.
//!
//! Every operation checks its parameters against a declared rule set before
//! anything is sent, goes through one [`RequestExecutor`], and maps the HTTP
//! status into [`JiraError`].
//!
//! ```no_run
//! use jira_rest::{JiraClient, JiraConfig, SearchParameters};
//!
//! let config = JiraConfig::new("https://jira.example.com")
//!     .with_api_token("me@example.com", "token");
//! let client = JiraClient::new(config)?;
//!
//! let results = client.search_issues(&SearchParameters::new("project = TEST").max_results(10))?;
//! for issue in results.issues {
//!     println!("{} {}", issue.key, issue.summary().unwrap_or_default());
//! }
//! # Ok::<(), jira_rest::JiraError>(())
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod executor;
pub mod http;
pub mod models;
pub mod resource;
pub mod resources;


pub use auth::Credentials;
pub use client::JiraClient;
pub use config::JiraConfig;
pub use executor::RequestExecutor;
pub use http::UreqTransport;
pub use models::*;
pub use resource::{dispatch, Operation, Resource};
pub use resources::{
    resource as find_resource, AttachmentRequest, CommentParameters, CommentRequest,
    CreateParameters, DeleteParameters, EditParameters, GetParameters, IssueRequest,
    ProjectRequest, SearchParameters, TransitionRef, UserRequest, ValidateQuery, Visibility,
    VisibilityType, RESOURCES,
};

// Re-export jira-core types for convenience
pub use jira_core::{
    validate, EventListener, HttpRequest, HttpResponse, JiraError, Method, ParameterError,
    Parameters, RequestEvent, Result, Rule, RuleSet, StatusClass, Transport, ValueKind, Violation,
};
