use serde::{Deserialize, Serialize};

use super::user::User;

/// Jira comment
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    /// Plain text on API v2, an ADF document on v3
    pub body: serde_json::Value,
    pub author: Option<User>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub visibility: Option<serde_json::Value>,
}

/// Response from listing comments
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
}
