//! orgweave - enterprise digital-twin graph engine.
//!
//! Synthesises a structurally accurate model of an enterprise
//! organisation as a typed, directed, multi-edge property graph, holds
//! it in memory behind the [`engine::GraphEngine`] abstraction, and
//! exposes it through a fixed tool registry shared by the stdio pipe and
//! REST transports (see the `orgweave-server` crate).
//!
//! # Example
//!
//! ```rust,ignore
//! use orgweave::generate::Orchestrator;
//! use orgweave::scaling::{Industry, OrgProfile};
//!
//! let profile = OrgProfile::new("Acme Robotics", Industry::Technology, 2500).with_seed(42);
//! let outcome = Orchestrator::new().generate(profile)?;
//! println!("{} entities", outcome.engine.statistics().entity_count);
//! ```

pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod generate;
pub mod model;
pub mod scaling;
pub mod schema;
pub mod search;
pub mod state;
pub mod tools;

pub use config::Config;
pub use engine::{create_engine, default_engine, GraphEngine, GraphStatistics};
pub use error::{GraphError, Result};
pub use generate::{Orchestrator, QualityReport};
pub use model::{Entity, EntityBody, EntityKind, Relationship};
pub use scaling::{Industry, OrgProfile};
pub use schema::RelationshipKind;
pub use state::GraphState;
