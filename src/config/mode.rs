//! Runtime mode and the strictness policy derived from it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Variable that selects the runtime mode.
pub const MODE_VAR: &str = "APP_ENV";

/// Which environment the process believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
    Test,
}

impl RuntimeMode {
    /// Resolve the mode from the raw `APP_ENV` value.
    ///
    /// Absent or unrecognised values resolve to `Production`, so a typo can
    /// only ever make startup stricter.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Strict modes treat every violation as fatal.
    pub fn is_strict(self) -> bool {
        !matches!(self, RuntimeMode::Development)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeMode::Production => "production",
            RuntimeMode::Development => "development",
            RuntimeMode::Test => "test",
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(RuntimeMode::Production),
            "development" | "dev" => Ok(RuntimeMode::Development),
            "test" => Ok(RuntimeMode::Test),
            other => Err(format!("unknown runtime mode: {}", other)),
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_resolution() {
        assert_eq!(RuntimeMode::from_raw(None), RuntimeMode::Production);
        assert_eq!(RuntimeMode::from_raw(Some("development")), RuntimeMode::Development);
        assert_eq!(RuntimeMode::from_raw(Some(" Dev ")), RuntimeMode::Development);
        assert_eq!(RuntimeMode::from_raw(Some("test")), RuntimeMode::Test);
        assert_eq!(RuntimeMode::from_raw(Some("staging")), RuntimeMode::Production);
    }

    #[test]
    fn test_only_development_is_lenient() {
        assert!(RuntimeMode::Production.is_strict());
        assert!(RuntimeMode::Test.is_strict());
        assert!(!RuntimeMode::Development.is_strict());
    }
}
