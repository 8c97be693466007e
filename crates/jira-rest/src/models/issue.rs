use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Jira issue
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Internal numeric ID
    pub id: String,
    /// Issue key (e.g., "PROJ-123")
    pub key: String,
    /// Self URL
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    /// Raw fields; their shape depends on the instance's field configuration
    #[serde(default)]
    pub fields: Value,
}

impl Issue {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    pub fn summary(&self) -> Option<&str> {
        self.field("summary").and_then(Value::as_str)
    }

    pub fn status_name(&self) -> Option<&str> {
        self.field("status")
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
    }

    pub fn issue_type_name(&self) -> Option<&str> {
        self.field("issuetype")
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.field("labels")
            .and_then(Value::as_array)
            .map(|labels| labels.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Response from `POST /search`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Present when `validateQuery` is `warn`
    #[serde(default)]
    pub warning_messages: Vec<String>,
}

/// Minimal response returned by `POST /issue`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// Workflow transition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// Target status
    pub to: Option<Value>,
}

/// Response from `GET /issue/{key}/transitions`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransitionList {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_accessors_read_common_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10001",
            "key": "TEST-1",
            "self": "https://jira.example.com/rest/api/2/issue/10001",
            "fields": {
                "summary": "Test issue",
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"name": "Task"},
                "labels": ["bug", "urgent"],
                "assignee": null
            }
        }))
        .unwrap();

        assert_eq!(issue.summary(), Some("Test issue"));
        assert_eq!(issue.status_name(), Some("Open"));
        assert_eq!(issue.issue_type_name(), Some("Task"));
        assert_eq!(issue.labels(), vec!["bug", "urgent"]);
        assert!(issue.field("assignee").is_none());
    }

    #[test]
    fn search_results_tolerate_missing_counters() {
        let results: SearchResults =
            serde_json::from_value(json!({"issues": [{"id": "1", "key": "A-1"}]})).unwrap();
        assert_eq!(results.total, 0);
        assert_eq!(results.issues[0].key, "A-1");
        assert!(results.issues[0].summary().is_none());
    }
}
