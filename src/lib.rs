//! Environment configuration for the web application.
//!
//! Validates the process environment once at startup, failing fast with a
//! field-by-field diagnostic, and splits the result into a client-safe
//! public partition and a server-only partition.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{load, public_subset, AppConfig, ConfigValidationError, PublicConfig, RawEnv, ServerConfig};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Startup};
