//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → handlers.rs (health, public config JSON, env.js)
//!     → Send to client
//! ```
//!
//! Handlers only ever hold `PublicConfig`; server secrets are not reachable
//! from here.

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
