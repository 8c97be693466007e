//! Credentials and the `Authorization` header they produce.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Credentials for a Jira instance.
///
/// Jira Cloud expects an email address with an API token; Jira Server and
/// Data Center accept a username with a password, or a personal access
/// token sent as a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    ApiToken { username: String, token: String },
    Bearer { token: String },
}

impl Credentials {
    /// The complete `Authorization` header value
    pub fn header_value(&self) -> String {
        match self {
            Credentials::Basic { username, password } => basic_header(username, password),
            Credentials::ApiToken { username, token } => basic_header(username, token),
            Credentials::Bearer { token } => format!("Bearer {}", token),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Basic { username, .. } | Credentials::ApiToken { username, .. } => {
                Some(username)
            }
            Credentials::Bearer { .. } => None,
        }
    }
}

// Secrets never reach logs through Debug
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::ApiToken { username, .. } => f
                .debug_struct("ApiToken")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
        }
    }
}

fn basic_header(username: &str, secret: &str) -> String {
    let credentials = format!("{}:{}", username, secret);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
