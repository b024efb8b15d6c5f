#![warn(clippy::all, missing_docs)]

//! Core domain logic for the staffing planner.
//!
//! This crate hosts the data models, configuration handling,
//! data sources and the in-memory planning store used by the
//! command-line frontend and any future UI.

pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod store;

pub use config::AppConfig;
pub use error::{Collection, StoreError};
pub use models::{Project, ProjectStatus, Resource, ResourceStatus, SeatLocation};
pub use source::{DataSource, FixtureSource, JsonDirSource};
pub use store::{Change, Command, Inconsistency, PlanningState, PlanningStore};
