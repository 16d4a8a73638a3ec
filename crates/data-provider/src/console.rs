//! The two consoles served by the backend.

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleKind {
    Admin,
    Developer,
}

impl ConsoleKind {
    /// Path appended to the API URL to reach this console's endpoints.
    pub fn sub_path(&self) -> &'static str {
        match self {
            ConsoleKind::Admin => "/console/admin",
            ConsoleKind::Developer => "/console/dev",
        }
    }

    /// Name of the console-specific metadata verb.
    pub fn metadata_verb(&self) -> &'static str {
        match self {
            ConsoleKind::Admin => "appProps",
            ConsoleKind::Developer => "myAuthorities",
        }
    }

    /// Path of the metadata endpoint, relative to the console base URL.
    pub fn metadata_path(&self) -> &'static str {
        match self {
            ConsoleKind::Admin => "props",
            ConsoleKind::Developer => "authorities",
        }
    }
}

impl fmt::Display for ConsoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleKind::Admin => f.write_str("admin"),
            ConsoleKind::Developer => f.write_str("developer"),
        }
    }
}

impl FromStr for ConsoleKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ConsoleKind::Admin),
            "dev" | "developer" => Ok(ConsoleKind::Developer),
            other => Err(ConsoleError::config(format!("unknown console: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_paths() {
        assert_eq!(ConsoleKind::Admin.sub_path(), "/console/admin");
        assert_eq!(ConsoleKind::Developer.sub_path(), "/console/dev");
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("dev".parse::<ConsoleKind>().unwrap(), ConsoleKind::Developer);
        assert_eq!(" Admin ".parse::<ConsoleKind>().unwrap(), ConsoleKind::Admin);
        assert!("user".parse::<ConsoleKind>().is_err());
    }
}
