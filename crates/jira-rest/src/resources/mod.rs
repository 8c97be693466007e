pub mod attachment;
pub mod comment;
pub mod issue;
pub mod project;
pub mod user;

pub use attachment::AttachmentRequest;
pub use comment::{CommentParameters, CommentRequest, Visibility, VisibilityType};
pub use issue::{
    CreateParameters, DeleteParameters, EditParameters, GetParameters, IssueRequest,
    SearchParameters, TransitionRef, ValidateQuery,
};
pub use project::ProjectRequest;
pub use user::UserRequest;

use crate::resource::Resource;

/// Every resource table, for lookups by name
pub static RESOURCES: &[&Resource] = &[
    &issue::ISSUE,
    &project::PROJECT,
    &comment::COMMENT,
    &attachment::ATTACHMENT,
    &user::USER,
];

pub fn resource(name: &str) -> Option<&'static Resource> {
    RESOURCES.iter().copied().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_set_names_match_their_tables() {
        for resource in RESOURCES {
            for op in resource.operations {
                assert_eq!(
                    op.rules.name,
                    format!("{}.{}", resource.name, op.name),
                    "operation {} of {}",
                    op.name,
                    resource.name
                );
            }
        }
    }

    #[test]
    fn operation_names_are_unique_per_resource() {
        for resource in RESOURCES {
            for (i, op) in resource.operations.iter().enumerate() {
                assert!(
                    resource.operations[i + 1..].iter().all(|o| o.name != op.name),
                    "duplicate {}.{}",
                    resource.name,
                    op.name
                );
            }
        }
    }

    #[test]
    fn paths_are_relative() {
        for resource in RESOURCES {
            for op in resource.operations {
                assert!(!op.path.starts_with('/'), "{}", op.path);
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(resource("issue").map(|r| r.name), Some("issue"));
        assert!(resource("issue").unwrap().operation("search").is_some());
        assert!(resource("worklog").is_none());
    }
}
