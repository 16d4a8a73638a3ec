//! Console configuration read from the environment.

use serde::Serialize;
use std::time::Duration;

use crate::console::ConsoleKind;
use crate::error::{ConsoleError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:9090";

pub const ENV_API_URL: &str = "REACT_APP_API_URL";
pub const ENV_ADMIN_CONSOLE: &str = "REACT_APP_ADMIN_CONSOLE";
pub const ENV_DEVELOPER_CONSOLE: &str = "REACT_APP_DEVELOPER_CONSOLE";
pub const ENV_USER_CONSOLE: &str = "REACT_APP_USER_CONSOLE";
pub const ENV_CONTEXT_PATH: &str = "REACT_APP_CONTEXT_PATH";
pub const ENV_SESSION_COOKIE: &str = "AAC_CONSOLE_SESSION_COOKIE";
pub const ENV_TIMEOUT_SECS: &str = "AAC_CONSOLE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend API root, without trailing slash.
    pub api_url: String,
    pub admin_console: Option<String>,
    pub developer_console: Option<String>,
    pub user_console: Option<String>,
    /// Path the console itself is mounted under.
    pub context_path: Option<String>,
    /// Cookie header value seeded into the client's jar.
    pub session_cookie: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            admin_console: None,
            developer_console: None,
            user_console: None,
            context_path: None,
            session_cookie: None,
            timeout: None,
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url =
            clean(lookup(ENV_API_URL)).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(&api_url).map_err(|e| {
            ConsoleError::config(format!("{} is not a valid URL ({}): {}", ENV_API_URL, api_url, e))
        })?;

        let timeout = match lookup(ENV_TIMEOUT_SECS).map(|v| v.trim().to_string()) {
            Some(raw) if !raw.is_empty() => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ConsoleError::config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            api_url,
            admin_console: clean(lookup(ENV_ADMIN_CONSOLE)),
            developer_console: clean(lookup(ENV_DEVELOPER_CONSOLE)),
            user_console: clean(lookup(ENV_USER_CONSOLE)),
            context_path: clean(lookup(ENV_CONTEXT_PATH)),
            session_cookie: lookup(ENV_SESSION_COOKIE)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            timeout,
        })
    }

    /// Base URL for a console's endpoints, e.g. `{api}/console/dev`.
    pub fn console_base_url(&self, kind: ConsoleKind) -> String {
        format!("{}{}", self.api_url, kind.sub_path())
    }

    pub fn links(&self) -> ConsoleLinks {
        ConsoleLinks {
            admin: self.admin_console.clone(),
            developer: self.developer_console.clone(),
            user: self.user_console.clone(),
            context_path: self.context_path.clone(),
        }
    }
}

/// Cross-console navigation targets. `None` hides the link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleLinks {
    pub admin: Option<String>,
    pub developer: Option<String>,
    pub user: Option<String>,
    /// Path the current console is served under.
    pub context_path: Option<String>,
}

impl ConsoleLinks {
    /// Link to the other console, if configured.
    pub fn switch_target(&self, current: ConsoleKind) -> Option<&str> {
        match current {
            ConsoleKind::Admin => self.developer.as_deref(),
            ConsoleKind::Developer => self.admin.as_deref(),
        }
    }
}
