//! Configuration validation.
//!
//! # Responsibilities
//! - Evaluate every field descriptor in the schema against the raw input
//! - Collect all violations, not just the first
//! - Apply the runtime mode's strictness policy
//!
//! # Design Decisions
//! - Every field goes through `FieldSpec::evaluate`; there are no per-field
//!   special cases in the validator loop
//! - Lenient mode only forgives fields that have a declared default; a bad
//!   value is then replaced by that default and reported as a warning
//! - Nothing is returned unless the whole input is valid

use std::collections::BTreeMap;
use std::fmt;

use crate::config::loader::RawEnv;
use crate::config::mode::RuntimeMode;
use crate::config::schema::{
    FieldKind, FieldSpec, Presence, PublicConfig, ServerConfig, APP_URL, BACKEND_ANON_KEY,
    BACKEND_SERVICE_ROLE_KEY, BACKEND_URL, EMAIL_API_KEY, PAYMENTS_SECRET_KEY,
    PAYMENTS_WEBHOOK_SECRET, SCHEMA,
};
use crate::config::types::{Secret, ValidUrl};

/// A single problem with a single variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid environment variables:{}", render_lines(.violations))]
pub struct ConfigValidationError {
    violations: Vec<Violation>,
}

impl ConfigValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Field names in the order they were reported.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn render_lines(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n  - {}", v)).collect()
}

/// A value that passed its field's constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Url(ValidUrl),
    Text(String),
}

impl FieldSpec {
    /// Check one raw value against this descriptor.
    ///
    /// `Ok(None)` means an optional field was left unset.
    pub fn evaluate(&self, raw: Option<&str>) -> Result<Option<Value>, String> {
        let raw = match (raw, self.presence) {
            (Some(raw), _) => raw,
            (None, Presence::Required) => return Err("required".to_string()),
            (None, Presence::Optional) => return Ok(None),
            (None, Presence::Defaulted(default)) => default,
        };

        let value = match self.kind {
            FieldKind::Url => ValidUrl::parse(raw)
                .map(Value::Url)
                .map_err(|e| format!("invalid url: {}", e))?,
            FieldKind::NonEmpty if raw.is_empty() => {
                return Err("must not be empty".to_string());
            }
            FieldKind::NonEmpty | FieldKind::Text => Value::Text(raw.to_string()),
        };
        Ok(Some(value))
    }
}

/// Values that survived validation, keyed by variable name.
#[derive(Default)]
pub struct Resolved {
    values: BTreeMap<&'static str, Value>,
}

impl Resolved {
    #[cfg(test)]
    fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn take_url(&mut self, spec: &FieldSpec) -> Result<ValidUrl, Violation> {
        match self.values.remove(spec.name) {
            Some(Value::Url(url)) => Ok(url),
            _ => Err(Violation::new(spec.name, "required")),
        }
    }

    fn take_text(&mut self, spec: &FieldSpec) -> Result<String, Violation> {
        match self.values.remove(spec.name) {
            Some(Value::Text(text)) => Ok(text),
            _ => Err(Violation::new(spec.name, "required")),
        }
    }

    fn take_secret(&mut self, spec: &FieldSpec) -> Option<Secret> {
        match self.values.remove(spec.name) {
            Some(Value::Text(text)) => Some(Secret::new(text)),
            _ => None,
        }
    }

    /// Split into the two partitions.
    pub fn into_partitions(mut self) -> Result<(PublicConfig, ServerConfig), ConfigValidationError> {
        let app_url = self.take_url(&APP_URL);
        let backend_url = self.take_url(&BACKEND_URL);
        let backend_anon_key = self.take_text(&BACKEND_ANON_KEY);

        let public = match (app_url, backend_url, backend_anon_key) {
            (Ok(app_url), Ok(backend_url), Ok(backend_anon_key)) => PublicConfig {
                app_url,
                backend_url,
                backend_anon_key,
            },
            (a, b, c) => {
                let violations = [a.err(), b.err(), c.err()].into_iter().flatten().collect();
                return Err(ConfigValidationError::new(violations));
            }
        };

        let server = ServerConfig {
            backend_service_role_key: self.take_secret(&BACKEND_SERVICE_ROLE_KEY),
            payments_secret_key: self.take_secret(&PAYMENTS_SECRET_KEY),
            payments_webhook_secret: self.take_secret(&PAYMENTS_WEBHOOK_SECRET),
            email_api_key: self.take_secret(&EMAIL_API_KEY),
        };

        Ok((public, server))
    }
}

// Server values are still plain text here; only names are printed.
impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Runs the schema against raw input under a given mode.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    mode: RuntimeMode,
}

impl Validator {
    pub fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }

    /// Validate the whole schema, returning every violation on failure.
    pub fn run(&self, env: &RawEnv) -> Result<Resolved, ConfigValidationError> {
        self.run_fields(SCHEMA, env)
    }

    pub fn run_fields(
        &self,
        fields: &[FieldSpec],
        env: &RawEnv,
    ) -> Result<Resolved, ConfigValidationError> {
        let mut resolved = Resolved::default();
        let mut violations = Vec::new();

        for spec in fields {
            match spec.evaluate(env.get(spec.name)) {
                Ok(Some(value)) => {
                    resolved.values.insert(spec.name, value);
                }
                Ok(None) => {}
                Err(message) => match self.fallback(spec, &message) {
                    Some(value) => {
                        resolved.values.insert(spec.name, value);
                    }
                    None => violations.push(Violation::new(spec.name, message)),
                },
            }
        }

        if violations.is_empty() {
            Ok(resolved)
        } else {
            Err(ConfigValidationError::new(violations))
        }
    }

    fn fallback(&self, spec: &FieldSpec, message: &str) -> Option<Value> {
        if self.mode.is_strict() {
            return None;
        }
        let default = spec.default_value()?;
        let value = spec.evaluate(None).ok().flatten()?;
        tracing::warn!(
            field = spec.name,
            reason = %message,
            default = default,
            "Invalid value replaced by default"
        );
        Some(value)
    }
}
