//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, never secret values)
//!
//! Consumers:
//!     → logging.rs subscriber (JSON in strict modes, pretty in development)
//!     → stderr
//! ```

pub mod logging;

pub use logging::{init_logging, LogFormat};
