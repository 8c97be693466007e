use serde::{Deserialize, Serialize};

/// Jira user. Cloud identifies users by `account_id`, Server by `name`/`key`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub key: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    #[serde(default)]
    pub active: bool,
}
