//! Configuration schema definitions.
//!
//! This module declares every environment variable the application reads,
//! and the typed configuration those variables resolve into.
//!
//! The public and server partitions resolve into two unrelated types.
//! `PublicConfig` is the only one that implements `Serialize`; everything in
//! `ServerConfig` is a [`Secret`], so a server value cannot reach a
//! client-facing payload without an explicit `expose()` at the call site.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::mode::RuntimeMode;
use crate::config::types::{Secret, ValidUrl};

/// Default for `APP_URL` when it is not set.
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Which side of the trust boundary a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Safe to ship to a browser or any other untrusted client.
    Public,
    /// Must never leave the backend process.
    Server,
}

impl Partition {
    /// Same spelling as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Public => "public",
            Partition::Server => "server",
        }
    }
}

/// Shape constraint applied to a present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Url,
    NonEmpty,
    Text,
}

impl FieldKind {
    /// Same spelling as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Url => "url",
            FieldKind::NonEmpty => "non_empty",
            FieldKind::Text => "text",
        }
    }
}

/// What happens when a variable is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Defaulted(&'static str),
}

/// Descriptor for a single environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    pub partition: Partition,
    pub description: &'static str,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<&'static str> {
        match self.presence {
            Presence::Defaulted(value) => Some(value),
            _ => None,
        }
    }
}

pub const APP_URL: FieldSpec = FieldSpec {
    name: "APP_URL",
    kind: FieldKind::Url,
    presence: Presence::Defaulted(DEFAULT_APP_URL),
    partition: Partition::Public,
    description: "Public base URL of the application",
};

pub const BACKEND_URL: FieldSpec = FieldSpec {
    name: "BACKEND_URL",
    kind: FieldKind::Url,
    presence: Presence::Required,
    partition: Partition::Public,
    description: "Backend project URL",
};

pub const BACKEND_ANON_KEY: FieldSpec = FieldSpec {
    name: "BACKEND_ANON_KEY",
    kind: FieldKind::NonEmpty,
    presence: Presence::Required,
    partition: Partition::Public,
    description: "Backend anonymous/public key",
};

pub const BACKEND_SERVICE_ROLE_KEY: FieldSpec = FieldSpec {
    name: "BACKEND_SERVICE_ROLE_KEY",
    kind: FieldKind::Text,
    presence: Presence::Optional,
    partition: Partition::Server,
    description: "Backend service role key (for admin operations)",
};

pub const PAYMENTS_SECRET_KEY: FieldSpec = FieldSpec {
    name: "PAYMENTS_SECRET_KEY",
    kind: FieldKind::Text,
    presence: Presence::Optional,
    partition: Partition::Server,
    description: "Payments provider secret key",
};

pub const PAYMENTS_WEBHOOK_SECRET: FieldSpec = FieldSpec {
    name: "PAYMENTS_WEBHOOK_SECRET",
    kind: FieldKind::Text,
    presence: Presence::Optional,
    partition: Partition::Server,
    description: "Payments webhook signing secret",
};

pub const EMAIL_API_KEY: FieldSpec = FieldSpec {
    name: "EMAIL_API_KEY",
    kind: FieldKind::Text,
    presence: Presence::Optional,
    partition: Partition::Server,
    description: "Transactional email API key",
};

/// Every variable the application reads, in diagnostic order.
pub const SCHEMA: &[FieldSpec] = &[
    APP_URL,
    BACKEND_URL,
    BACKEND_ANON_KEY,
    BACKEND_SERVICE_ROLE_KEY,
    PAYMENTS_SECRET_KEY,
    PAYMENTS_WEBHOOK_SECRET,
    EMAIL_API_KEY,
];

/// Descriptors belonging to one partition.
pub fn fields(partition: Partition) -> impl Iterator<Item = &'static FieldSpec> {
    SCHEMA.iter().filter(move |f| f.partition == partition)
}

/// Root configuration, validated and immutable.
///
/// Built once at process entry and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    mode: RuntimeMode,
    public: PublicConfig,
    server: ServerConfig,
}

impl AppConfig {
    pub(crate) fn new(mode: RuntimeMode, public: PublicConfig, server: ServerConfig) -> Self {
        Self {
            mode,
            public,
            server,
        }
    }

    /// Mode the configuration was validated under.
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    pub fn public(&self) -> &PublicConfig {
        &self.public
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }
}

/// Client-safe subset of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicConfig {
    #[serde(rename = "APP_URL")]
    pub app_url: ValidUrl,

    #[serde(rename = "BACKEND_URL")]
    pub backend_url: ValidUrl,

    #[serde(rename = "BACKEND_ANON_KEY")]
    pub backend_anon_key: String,
}

impl PublicConfig {
    /// Flatten into `NAME -> value`, keyed exactly like the environment.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (APP_URL.name.to_string(), self.app_url.to_string()),
            (BACKEND_URL.name.to_string(), self.backend_url.to_string()),
            (BACKEND_ANON_KEY.name.to_string(), self.backend_anon_key.clone()),
        ])
    }
}

/// Server-only credentials for optional integrations.
///
/// Any of these may be unset; the integration that needs it is then
/// considered unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend_service_role_key: Option<Secret>,
    pub payments_secret_key: Option<Secret>,
    pub payments_webhook_secret: Option<Secret>,
    pub email_api_key: Option<Secret>,
}

impl ServerConfig {
    /// Which server variables are set, without revealing their values.
    pub fn presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            (BACKEND_SERVICE_ROLE_KEY.name, self.backend_service_role_key.is_some()),
            (PAYMENTS_SECRET_KEY.name, self.payments_secret_key.is_some()),
            (PAYMENTS_WEBHOOK_SECRET.name, self.payments_webhook_secret.is_some()),
            (EMAIL_API_KEY.name, self.email_api_key.is_some()),
        ]
    }

    /// Payments need both the API key and the webhook signing secret.
    pub fn payments_enabled(&self) -> bool {
        self.payments_secret_key.is_some() && self.payments_webhook_secret.is_some()
    }

    pub fn email_enabled(&self) -> bool {
        self.email_api_key.is_some()
    }
}

/// The only way to obtain client-facing configuration.
pub fn public_subset(config: &AppConfig) -> PublicConfig {
    config.public.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_schema_partitions_are_disjoint_and_complete() {
        let public: BTreeSet<_> = fields(Partition::Public).map(|f| f.name).collect();
        let server: BTreeSet<_> = fields(Partition::Server).map(|f| f.name).collect();

        assert!(public.is_disjoint(&server));
        assert_eq!(public.len() + server.len(), SCHEMA.len());
        assert_eq!(
            public,
            BTreeSet::from(["APP_URL", "BACKEND_URL", "BACKEND_ANON_KEY"])
        );
    }

    #[test]
    fn test_only_app_url_has_default() {
        let defaulted: Vec<_> = SCHEMA.iter().filter(|f| f.default_value().is_some()).collect();
        assert_eq!(defaulted.len(), 1);
        assert_eq!(defaulted[0].name, "APP_URL");
        assert_eq!(defaulted[0].default_value(), Some(DEFAULT_APP_URL));
    }

    #[test]
    fn test_server_fields_are_never_required() {
        assert!(fields(Partition::Server).all(|f| !f.is_required()));
    }

    #[test]
    fn test_public_map_keys_match_serialized_keys() {
        let public = PublicConfig {
            app_url: ValidUrl::parse(DEFAULT_APP_URL).unwrap(),
            backend_url: ValidUrl::parse("https://x.test").unwrap(),
            backend_anon_key: "abc".into(),
        };

        let json = serde_json::to_value(&public).unwrap();
        let json_keys: BTreeSet<_> = json.as_object().unwrap().keys().cloned().collect();
        let map_keys: BTreeSet<_> = public.to_map().into_keys().collect();
        let schema_keys: BTreeSet<_> = fields(Partition::Public).map(|f| f.name.to_string()).collect();

        assert_eq!(json_keys, schema_keys);
        assert_eq!(map_keys, schema_keys);
    }

    #[test]
    fn test_labels_match_serialized_names() {
        for field in SCHEMA {
            assert_eq!(serde_json::to_value(field.kind).unwrap(), field.kind.as_str());
            assert_eq!(serde_json::to_value(field.partition).unwrap(), field.partition.as_str());
        }
        assert_eq!(BACKEND_ANON_KEY.kind.as_str(), "non_empty");
    }

    #[test]
    fn test_payments_need_both_secrets() {
        let mut server = ServerConfig {
            payments_secret_key: Some(Secret::new("sk")),
            ..Default::default()
        };
        assert!(!server.payments_enabled());

        server.payments_webhook_secret = Some(Secret::new("whsec"));
        assert!(server.payments_enabled());
        assert!(!server.email_enabled());
    }
}
