use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use jira_core::{JiraError, Result};
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

pub const DEFAULT_API_VERSION: &str = "2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = "jira.toml";
const ENV_PREFIX: &str = "JIRA_";

/// Connection settings for a Jira instance
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct JiraConfig {
    /// Base URL of the Jira instance, e.g. `https://example.atlassian.net`
    pub host: Option<String>,
    /// REST API version segment (`2` or `3`)
    pub api_version: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// API token (with `username`) or personal access token (alone)
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    /// Host applications queue requests as background jobs instead of
    /// blocking; see `RequestExecutor::prepare`
    #[serde(rename = "async")]
    pub async_requests: bool,
    /// Emit an event after each successful write
    pub success_listener: bool,
    /// Emit an event after each failed write
    pub failure_listener: bool,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            host: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            username: None,
            password: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            async_requests: false,
            success_listener: false,
            failure_listener: false,
        }
    }
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("async", &self.async_requests)
            .field("success_listener", &self.success_listener)
            .field("failure_listener", &self.failure_listener)
            .finish()
    }
}

impl JiraConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self.api_token = None;
        self
    }

    pub fn with_api_token(
        mut self,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.api_token = Some(token.into());
        self.password = None;
        self
    }

    /// Personal access token for Jira Server / Data Center
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.username = None;
        self.password = None;
        self.api_token = Some(token.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Rounded up to whole seconds; only `Duration::ZERO` disables the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    pub fn with_async(mut self, async_requests: bool) -> Self {
        self.async_requests = async_requests;
        self
    }

    pub fn with_listeners(mut self, on_success: bool, on_failure: bool) -> Self {
        self.success_listener = on_success;
        self.failure_listener = on_failure;
        self
    }

    /// Load configuration from defaults, TOML files and `JIRA_*` variables.
    ///
    /// With an explicit path only that file is read, and it must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(JiraError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut figment = Figment::new().merge(Serialized::defaults(JiraConfig::default()));

        for path in config_paths(config_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| JiraError::Config(format!("Failed to load config: {}", e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the configured credentials
    pub fn credentials(&self) -> Result<Credentials> {
        let username = non_empty(&self.username);
        let password = non_empty(&self.password);
        let api_token = non_empty(&self.api_token);

        match (username, password, api_token) {
            (Some(username), _, Some(token)) => Ok(Credentials::ApiToken {
                username: username.to_string(),
                token: token.to_string(),
            }),
            (Some(username), Some(password), None) => Ok(Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            }),
            (None, _, Some(token)) => Ok(Credentials::Bearer {
                token: token.to_string(),
            }),
            _ => Err(JiraError::Config(
                "Jira credentials not configured. Set username with api_token or password \
                 (JIRA_USERNAME, JIRA_API_TOKEN, JIRA_PASSWORD) or a personal access token"
                    .to_string(),
            )),
        }
    }

    /// `<host>/rest/api/<version>` without a trailing slash
    pub fn api_root(&self) -> Result<String> {
        let host = non_empty(&self.host).ok_or_else(|| {
            JiraError::Config(
                "Jira host not configured. Set via JIRA_HOST or the `host` key in jira.toml"
                    .to_string(),
            )
        })?;

        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(JiraError::Config(format!(
                "Jira host must start with http:// or https://, got `{}`",
                host
            )));
        }

        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            return Err(JiraError::Config("api_version must not be empty".to_string()));
        }

        Ok(format!(
            "{}/rest/api/{}",
            host.trim_end_matches('/'),
            version
        ))
    }

    pub fn validate(&self) -> Result<()> {
        self.api_root()?;
        self.credentials()?;
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "jira-rest").map(|d| d.config_dir().join(CONFIG_FILE_NAME))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("jira-rest").join(CONFIG_FILE_NAME));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("jira-rest")
            .join(CONFIG_FILE_NAME)
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ENV_KEYS: &[&str] = &[
        "JIRA_HOST",
        "JIRA_API_VERSION",
        "JIRA_USERNAME",
        "JIRA_PASSWORD",
        "JIRA_API_TOKEN",
        "JIRA_TIMEOUT_SECS",
        "JIRA_ASYNC",
        "JIRA_SUCCESS_LISTENER",
        "JIRA_FAILURE_LISTENER",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn sub_second_timeout_is_not_disabled() {
        let config = JiraConfig::new("https://jira.example.com")
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.timeout(), Duration::from_secs(1));

        let config = JiraConfig::default().with_timeout(Duration::from_millis(2500));
        assert_eq!(config.timeout_secs, 3);

        let config = JiraConfig::default().with_timeout(Duration::from_secs(45));
        assert_eq!(config.timeout_secs, 45);

        let config = JiraConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn defaults() {
        let config = JiraConfig::default();
        assert_eq!(config.api_version, "2");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.async_requests);
        assert!(!config.success_listener);
        assert!(!config.failure_listener);
    }

    #[test]
    #[serial]
    fn load_reads_explicit_file() {
        clear_env();
        let file = write_config(
            r#"
host = "https://example.atlassian.net"
username = "dev@example.com"
api_token = "token"
async = true
success_listener = true
"#,
        );

        let config = JiraConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.host.as_deref(), Some("https://example.atlassian.net"));
        assert_eq!(config.api_version, "2");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.async_requests);
        assert!(config.success_listener);
        assert!(!config.failure_listener);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let file = write_config(
            r#"
host = "https://file.example.com"
username = "file-user"
password = "file-pass"
timeout_secs = 5
"#,
        );

        std::env::set_var("JIRA_HOST", "https://env.example.com");
        std::env::set_var("JIRA_TIMEOUT_SECS", "12");
        std::env::set_var("JIRA_FAILURE_LISTENER", "true");

        let config = JiraConfig::load(Some(file.path()));
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.host.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.username.as_deref(), Some("file-user"));
        assert_eq!(config.timeout_secs, 12);
        assert!(config.failure_listener);
    }

    #[test]
    #[serial]
    fn load_fails_for_missing_explicit_file() {
        clear_env();
        let err = JiraConfig::load(Some(Path::new("/nonexistent/jira.toml"))).unwrap_err();
        assert!(matches!(err, JiraError::Config(ref m) if m.contains("Config file not found")));
    }

    #[test]
    #[serial]
    fn load_rejects_malformed_values() {
        clear_env();
        let file = write_config("timeout_secs = \"soon\"\n");
        assert!(matches!(
            JiraConfig::load(Some(file.path())),
            Err(JiraError::Config(_))
        ));
    }

    #[test]
    fn credentials_resolution() {
        let config = JiraConfig::new("https://jira.example.com").with_api_token("dev", "tok");
        assert!(matches!(
            config.credentials().unwrap(),
            Credentials::ApiToken { .. }
        ));

        let config = JiraConfig::new("https://jira.example.com").with_basic_auth("dev", "pw");
        assert!(matches!(config.credentials().unwrap(), Credentials::Basic { .. }));

        let config = JiraConfig::new("https://jira.example.com").with_bearer_token("pat");
        assert!(matches!(config.credentials().unwrap(), Credentials::Bearer { .. }));

        let mut config = JiraConfig::new("https://jira.example.com");
        config.username = Some("dev".to_string());
        assert!(matches!(config.credentials(), Err(JiraError::Config(_))));

        config.password = Some("   ".to_string());
        assert!(config.credentials().is_err());
    }

    #[test]
    fn api_root_normalises_slashes() {
        let config = JiraConfig::new("https://jira.example.com/").with_api_version("/3/");
        assert_eq!(
            config.api_root().unwrap(),
            "https://jira.example.com/rest/api/3"
        );
    }

    #[test]
    fn api_root_requires_scheme_and_host() {
        assert!(JiraConfig::default().api_root().is_err());
        assert!(JiraConfig::new("jira.example.com").api_root().is_err());
        assert!(JiraConfig::new("https://jira.example.com")
            .with_api_version("")
            .api_root()
            .is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = JiraConfig::new("https://jira.example.com").with_basic_auth("dev", "hunter2");
        let output = format!("{:?}", config);
        assert!(output.contains("dev"));
        assert!(!output.contains("hunter2"));
    }
}
