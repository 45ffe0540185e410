//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (RawEnv snapshot, runtime mode)
//!     → validation.rs (every field checked, all violations collected)
//!     → schema.rs (AppConfig: PublicConfig + ServerConfig)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is loaded exactly once at startup and never changes afterwards
//! - Validation reports every problem in one pass
//! - Client-facing code only ever sees `PublicConfig`

pub mod env_file;
pub mod loader;
pub mod mode;
pub mod schema;
pub mod types;
pub mod validation;

pub use loader::{load, load_with_mode, ConfigError, RawEnv};
pub use mode::RuntimeMode;
pub use schema::{public_subset, AppConfig, FieldSpec, Partition, PublicConfig, ServerConfig};
pub use types::{Secret, ValidUrl};
pub use validation::{ConfigValidationError, Violation};
