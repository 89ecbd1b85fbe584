//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (before serving):
//!     method + pattern + handler
//!     → matcher.rs (compile `^(?:pattern)$`, fail fast on bad regex)
//!     → router.rs (append to ordered route list)
//!
//! Incoming Request (method, path)
//!     → router.rs (linear scan, first match wins)
//!     → matcher.rs (percent-decode path, full-path match, named groups)
//!     → params.rs (attach Params to request extensions)
//!     → handler.rs (invoke route handler)
//!     or → 405 with `Allow` / 404 fallbacks
//! ```
//!
//! # Design Decisions
//! - Routes are immutable once registered; the table is frozen when the
//!   router becomes a service
//! - Registration order is match priority
//! - "Path exists, wrong method" (405) beats "no such path" (404)

pub mod handler;
pub mod matcher;
pub mod params;
pub mod router;

pub use handler::Handler;
pub use matcher::{decode_path, PathPattern, RouteError};
pub use params::{get_param, Params};
pub use router::{AllowedMethods, OmitAllowHeader, Resolution, Route, Router, RouterService};
