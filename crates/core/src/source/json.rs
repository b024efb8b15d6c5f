use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::DataSource;
use crate::models::{Project, Resource, SeatLocation};

/// File holding the resource collection inside the data directory.
pub const RESOURCES_FILE: &str = "resources.json";
/// File holding the project collection inside the data directory.
pub const PROJECTS_FILE: &str = "projects.json";
/// File holding the seat collection inside the data directory.
pub const SEATS_FILE: &str = "seats.json";

/// Reads each collection from a JSON array file in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the collections are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.root.join(file_name);
        debug!("reading {}", path.display());
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[async_trait]
impl DataSource for JsonDirSource {
    async fn fetch_resources(&self) -> Result<Vec<Resource>> {
        self.read_collection(RESOURCES_FILE).await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>> {
        self.read_collection(PROJECTS_FILE).await
    }

    async fn fetch_seats(&self) -> Result<Vec<SeatLocation>> {
        self.read_collection(SEATS_FILE).await
    }
}
