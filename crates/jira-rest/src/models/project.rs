use serde::{Deserialize, Serialize};

use super::user::User;

/// Jira project
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Internal ID
    pub id: String,
    /// Project key (e.g., "PROJ")
    pub key: String,
    pub name: String,
    /// Self URL
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    /// Project type key (e.g., "software", "business")
    pub project_type_key: Option<String>,
    pub description: Option<String>,
    pub lead: Option<User>,
}

/// Statuses available to one issue type of a project
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssueTypeStatuses {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
    #[serde(default)]
    pub statuses: Vec<Status>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Status {
    pub id: String,
    pub name: String,
}
