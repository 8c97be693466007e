use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    pub filename: String,
    pub author: Option<User>,
    pub created: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub mime_type: Option<String>,
    /// Download URL
    pub content: Option<String>,
    pub thumbnail: Option<String>,
}

/// Response from `GET /attachment/meta`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub enabled: bool,
    #[serde(default)]
    pub upload_limit: u64,
}
