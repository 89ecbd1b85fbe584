//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, http, lifecycle
//!     → tracing events (method, path, pattern, request id)
//!     → logging.rs (filter + text/JSON formatter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID is attached to every HTTP span

pub mod logging;

pub use logging::init_logging;
