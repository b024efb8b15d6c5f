//! Resource planning store.

/// Consistency checks across collections.
pub mod audit;
/// Owned planning state and its operations.
pub mod state;

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{
    error::{Collection, StoreError},
    models::{Project, Resource, SeatLocation},
    source::DataSource,
};

pub use audit::Inconsistency;
pub use state::{Change, Command, Loaded, PlanningState};

/// Thread-safe handle over the planning state and its data source.
///
/// Clones share the same state. All mutations go through this handle.
#[derive(Clone)]
pub struct PlanningStore {
    inner: Arc<RwLock<PlanningState>>,
    source: Arc<dyn DataSource>,
}

impl PlanningStore {
    /// Create an empty store that loads from `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_state(source, PlanningState::new())
    }

    /// Create a store seeded with `state`.
    pub fn with_state(source: Arc<dyn DataSource>, state: PlanningState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
            source,
        }
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> PlanningState {
        self.inner.read().clone()
    }

    /// Current resources.
    pub fn resources(&self) -> Vec<Resource> {
        self.inner.read().resources().to_vec()
    }

    /// Current projects.
    pub fn projects(&self) -> Vec<Project> {
        self.inner.read().projects().to_vec()
    }

    /// Current seats.
    pub fn seats(&self) -> Vec<SeatLocation> {
        self.inner.read().seats().to_vec()
    }

    /// `true` while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading()
    }

    /// Message left by the most recent failed operation.
    pub fn error(&self) -> Option<String> {
        self.inner.read().error().map(str::to_string)
    }

    /// Look up a resource by id.
    pub fn resource(&self, id: &str) -> Option<Resource> {
        self.inner.read().resource(id).cloned()
    }

    /// Look up a project by id.
    pub fn project(&self, id: &str) -> Option<Project> {
        self.inner.read().project(id).cloned()
    }

    /// Look up a seat by id.
    pub fn seat(&self, id: &str) -> Option<SeatLocation> {
        self.inner.read().seat(id).cloned()
    }

    /// Filter resources using a case-insensitive substring search.
    pub fn resources_matching(&self, query: &str) -> Vec<Resource> {
        self.inner
            .read()
            .resources_matching(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resources linked to `project_id`.
    pub fn resources_on_project(&self, project_id: &str) -> Vec<Resource> {
        self.inner
            .read()
            .resources_on_project(project_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resources that are not fully assigned.
    pub fn available_resources(&self) -> Vec<Resource> {
        self.inner
            .read()
            .available_resources()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Seats nobody holds.
    pub fn available_seats(&self) -> Vec<SeatLocation> {
        self.inner
            .read()
            .available_seats()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Unfilled positions on `project_id`, if the project exists.
    pub fn open_positions(&self, project_id: &str) -> Option<u32> {
        self.inner.read().open_positions(project_id)
    }

    /// Every invariant violation currently present.
    pub fn audit(&self) -> Vec<Inconsistency> {
        self.inner.read().audit()
    }

    /// Replace the resource collection from the data source.
    pub async fn load_resources(&self) -> Result<usize, StoreError> {
        self.load(Collection::Resources).await
    }

    /// Replace the project collection from the data source.
    pub async fn load_projects(&self) -> Result<usize, StoreError> {
        self.load(Collection::Projects).await
    }

    /// Replace the seat collection from the data source.
    pub async fn load_seats(&self) -> Result<usize, StoreError> {
        self.load(Collection::Seats).await
    }

    /// Load all three collections concurrently, then audit the result.
    ///
    /// Every load runs to completion; the first failure is returned.
    pub async fn load_all(&self) -> Result<(), StoreError> {
        let (resources, projects, seats) = tokio::join!(
            self.load_resources(),
            self.load_projects(),
            self.load_seats()
        );

        let findings = self.audit();
        for finding in &findings {
            warn!("inconsistent planning data: {finding}");
        }

        let (resources, projects, seats) = (resources?, projects?, seats?);
        info!(
            resources,
            projects,
            seats,
            findings = findings.len(),
            "planning data loaded"
        );
        Ok(())
    }

    /// Apply a prepared command.
    pub fn apply(&self, command: Command) -> Result<Vec<Change>, StoreError> {
        self.inner.write().apply(command)
    }

    /// Place `resource_id` on `project_id` at the given chargeability and period.
    pub fn assign_resource_to_project(
        &self,
        resource_id: &str,
        project_id: &str,
        chargeability: u8,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Change>, StoreError> {
        self.inner.write().assign_resource_to_project(
            resource_id,
            project_id,
            chargeability,
            start_date,
            end_date,
        )
    }

    /// Take `resource_id` off its current project.
    pub fn remove_resource_from_project(
        &self,
        resource_id: &str,
    ) -> Result<Vec<Change>, StoreError> {
        self.inner.write().remove_resource_from_project(resource_id)
    }

    /// Give `resource_id` the free seat `seat_id`, vacating its previous seat.
    pub fn assign_seat(
        &self,
        resource_id: &str,
        seat_id: &str,
    ) -> Result<Vec<Change>, StoreError> {
        self.inner.write().assign_seat(resource_id, seat_id)
    }

    /// Vacate `seat_id`.
    pub fn release_seat(&self, seat_id: &str) -> Result<Vec<Change>, StoreError> {
        self.inner.write().release_seat(seat_id)
    }

    async fn load(&self, collection: Collection) -> Result<usize, StoreError> {
        self.inner.write().begin_load(collection);

        // The lock is not held across the fetch; concurrent loads commit in completion order.
        let fetched = match collection {
            Collection::Resources => self.source.fetch_resources().await.map(Loaded::Resources),
            Collection::Projects => self.source.fetch_projects().await.map(Loaded::Projects),
            Collection::Seats => self.source.fetch_seats().await.map(Loaded::Seats),
        };

        let mut state = self.inner.write();
        match fetched {
            Ok(loaded) => {
                let count = loaded.len();
                state.commit_load(loaded);
                Ok(count)
            }
            Err(source) => Err(state.fail_load(collection, source)),
        }
    }
}
