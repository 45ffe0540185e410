//! Configuration loading from the environment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::env_file::parse_env_file;
use crate::config::mode::{RuntimeMode, MODE_VAR};
use crate::config::schema::AppConfig;
use crate::config::validation::{ConfigValidationError, Validator};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read env file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// Raw environment input: variable name to unvalidated value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    vars: BTreeMap<String, String>,
}

impl RawEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    /// Runtime mode selected by `APP_ENV`.
    pub fn mode(&self) -> RuntimeMode {
        RuntimeMode::from_raw(self.get(MODE_VAR))
    }

    /// Fill in variables from a dotenv-style file.
    ///
    /// Variables that are already set win over the file. Returns how many
    /// variables the file contributed.
    pub fn merge_env_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let vars = parse_env_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut added = 0;
        for (key, value) in vars {
            if self.vars.contains_key(&key) {
                tracing::debug!(key = %key, "Env file value ignored, already set");
                continue;
            }
            self.vars.insert(key, value);
            added += 1;
        }

        tracing::debug!(path = %path.display(), added, "Env file merged");
        Ok(added)
    }
}

// Values may be secrets; only names are printed.
impl fmt::Debug for RawEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Validate `env` under the mode it selects itself via `APP_ENV`.
pub fn load(env: &RawEnv) -> Result<AppConfig, ConfigValidationError> {
    load_with_mode(env, env.mode())
}

/// Validate `env` under an explicit mode.
///
/// On failure every violation is written to the error log before the error
/// is returned.
pub fn load_with_mode(env: &RawEnv, mode: RuntimeMode) -> Result<AppConfig, ConfigValidationError> {
    let result = Validator::new(mode)
        .run(env)
        .and_then(|resolved| resolved.into_partitions());

    match result {
        Ok((public, server)) => Ok(AppConfig::new(mode, public, server)),
        Err(err) => {
            tracing::error!(
                mode = %mode,
                count = err.violations().len(),
                "Invalid environment variables"
            );
            for violation in err.violations() {
                tracing::error!(
                    field = violation.field,
                    reason = %violation.message,
                    "  - {}",
                    violation
                );
            }
            Err(err)
        }
    }
}
