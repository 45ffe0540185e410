//! Value types produced by validation.
//!
//! # Design Decisions
//! - `ValidUrl` keeps the operator's original text so it renders back exactly
//! - `Secret` has no `Serialize` or `Display`; it can only be read through
//!   `expose()`, and its `Debug` output is redacted

use std::fmt;

use serde::{Serialize, Serializer};
use url::Url;

/// A URL that parsed successfully, remembered in the form it was given.
///
/// Any scheme is accepted (`mailto:a@b` is valid); only relative or
/// malformed input is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidUrl {
    raw: String,
    parsed: Url,
}

impl ValidUrl {
    /// Parse `raw`, returning the parser's reason on failure.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The text exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed form, for joining paths or inspecting the host.
    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidUrl({:?})", self.raw)
    }
}

impl Serialize for ValidUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// A server-only credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying value. Callers must not forward it to clients.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}
