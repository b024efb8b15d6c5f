//! Data-access layer feeding the store's load operations.

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    config::{AppConfig, SourceKind},
    models::{Project, Resource, SeatLocation},
};

/// Canned data with simulated latency.
pub mod fixtures;
/// JSON files on disk.
pub mod json;

pub use fixtures::FixtureSource;
pub use json::JsonDirSource;

/// Supplier of the three collections. Every fetch may fail.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch every known resource.
    async fn fetch_resources(&self) -> Result<Vec<Resource>>;
    /// Fetch every known project.
    async fn fetch_projects(&self) -> Result<Vec<Project>>;
    /// Fetch every known seat.
    async fn fetch_seats(&self) -> Result<Vec<SeatLocation>>;
}

/// Build the data source selected by `config`.
pub fn from_config(config: &AppConfig) -> Arc<dyn DataSource> {
    match config.source {
        SourceKind::Fixtures => Arc::new(FixtureSource::new(Duration::from_millis(
            config.fetch_delay_ms,
        ))),
        SourceKind::Json => Arc::new(JsonDirSource::new(config.data_dir.clone())),
    }
}
