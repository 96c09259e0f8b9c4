//! Transports for the orgweave graph engine.
//!
//! Two adapters over the same tool registry: [`atp`] speaks
//! line-delimited JSON on stdio for agent runtimes, and [`rest`] maps
//! every tool onto an HTTP route. Both share the engine error taxonomy
//! through [`error`].

pub mod atp;
pub mod error;
pub mod rest;

pub use atp::serve_stdio;
pub use error::ApiError;
pub use rest::{build_router, RestConfig, RestServer};
