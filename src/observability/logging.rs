//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the output format from the runtime mode
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the built-in default filter
//! - Logs go to stderr so `env-check` can keep stdout for its report

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RuntimeMode;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Machine-readable in strict modes, human-readable in development.
    pub fn for_mode(mode: RuntimeMode) -> Self {
        if mode.is_strict() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(mode: RuntimeMode) -> &'static str {
    match mode {
        RuntimeMode::Development => "app_env=debug,tower_http=debug",
        RuntimeMode::Production | RuntimeMode::Test => "app_env=info,tower_http=info",
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(mode: RuntimeMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(mode).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match LogFormat::for_mode(mode) {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
