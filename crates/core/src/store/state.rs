use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::audit::{self, Inconsistency};
use crate::{
    error::{Collection, StoreError},
    models::{Project, Resource, ResourceStatus, SeatLocation, FULL_CHARGEABILITY},
};

/// A mutation request understood by [`PlanningState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a resource on a project, leaving any previous project.
    AssignToProject {
        /// Resource being placed.
        resource_id: String,
        /// Target project.
        project_id: String,
        /// Share of the resource's time, at most [`FULL_CHARGEABILITY`].
        chargeability: u8,
        /// First day on the project.
        start_date: NaiveDate,
        /// Last day on the project, open-ended when `None`.
        end_date: Option<NaiveDate>,
    },
    /// Take a resource off its project.
    RemoveFromProject {
        /// Resource leaving its project.
        resource_id: String,
    },
    /// Move a resource to a free seat, vacating its previous one.
    AssignSeat {
        /// Resource taking the seat.
        resource_id: String,
        /// Seat to occupy.
        seat_id: String,
    },
    /// Vacate a seat.
    ReleaseSeat {
        /// Seat to free.
        seat_id: String,
    },
}

/// An entity touched by a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Resource with the given id was modified.
    Resource(String),
    /// Project with the given id was modified.
    Project(String),
    /// Seat with the given id was modified.
    Seat(String),
    /// A whole collection was replaced by a load.
    Replaced(Collection),
}

/// Result of a fetch, ready to be committed.
#[derive(Debug, Clone)]
pub enum Loaded {
    /// Fetched resources.
    Resources(Vec<Resource>),
    /// Fetched projects.
    Projects(Vec<Project>),
    /// Fetched seats.
    Seats(Vec<SeatLocation>),
}

impl Loaded {
    /// Collection this payload replaces.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Resources(_) => Collection::Resources,
            Self::Projects(_) => Collection::Projects,
            Self::Seats(_) => Collection::Seats,
        }
    }

    /// Number of fetched entities.
    pub fn len(&self) -> usize {
        match self {
            Self::Resources(items) => items.len(),
            Self::Projects(items) => items.len(),
            Self::Seats(items) => items.len(),
        }
    }

    /// Whether the fetch returned nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned planning data plus the loading flag and last error message.
///
/// Every mutation validates first and writes second, so a rejected command
/// leaves the collections untouched and only updates [`error`](Self::error).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningState {
    resources: Vec<Resource>,
    projects: Vec<Project>,
    seats: Vec<SeatLocation>,
    is_loading: bool,
    error: Option<String>,
}

impl PlanningState {
    /// Empty state, as before any load.
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-populated with the given collections.
    pub fn with_collections(
        resources: Vec<Resource>,
        projects: Vec<Project>,
        seats: Vec<SeatLocation>,
    ) -> Self {
        let mut state = Self::new();
        state.commit_load(Loaded::Projects(projects));
        state.commit_load(Loaded::Resources(resources));
        state.commit_load(Loaded::Seats(seats));
        state
    }

    /// Loaded resources, in load order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Loaded projects.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Loaded seats.
    pub fn seats(&self) -> &[SeatLocation] {
        &self.seats
    }

    /// `true` while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message left by the most recent failed operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Resource with the given id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.id == id)
    }

    /// Project with the given id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Seat with the given id.
    pub fn seat(&self, id: &str) -> Option<&SeatLocation> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    /// Run `command`, recording its outcome in the error field.
    pub fn apply(&mut self, command: Command) -> Result<Vec<Change>, StoreError> {
        let outcome = match &command {
            Command::AssignToProject {
                resource_id,
                project_id,
                chargeability,
                start_date,
                end_date,
            } => self.assign_to_project(
                resource_id,
                project_id,
                *chargeability,
                *start_date,
                *end_date,
            ),
            Command::RemoveFromProject { resource_id } => self.remove_from_project(resource_id),
            Command::AssignSeat {
                resource_id,
                seat_id,
            } => self.assign_seat_to(resource_id, seat_id),
            Command::ReleaseSeat { seat_id } => self.release_seat_by_id(seat_id),
        };

        match &outcome {
            Ok(changes) => {
                debug!(?command, changed = changes.len(), "command applied");
                self.error = None;
            }
            Err(err) => {
                warn!(kind = err.kind(), ?command, "command rejected: {err}");
                self.error = Some(err.to_string());
            }
        }
        outcome
    }

    /// Place `resource_id` on `project_id` at the given chargeability and period.
    pub fn assign_resource_to_project(
        &mut self,
        resource_id: &str,
        project_id: &str,
        chargeability: u8,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Change>, StoreError> {
        self.apply(Command::AssignToProject {
            resource_id: resource_id.to_string(),
            project_id: project_id.to_string(),
            chargeability,
            start_date,
            end_date,
        })
    }

    /// Take `resource_id` off its current project.
    pub fn remove_resource_from_project(
        &mut self,
        resource_id: &str,
    ) -> Result<Vec<Change>, StoreError> {
        self.apply(Command::RemoveFromProject {
            resource_id: resource_id.to_string(),
        })
    }

    /// Give `resource_id` the free seat `seat_id`.
    pub fn assign_seat(
        &mut self,
        resource_id: &str,
        seat_id: &str,
    ) -> Result<Vec<Change>, StoreError> {
        self.apply(Command::AssignSeat {
            resource_id: resource_id.to_string(),
            seat_id: seat_id.to_string(),
        })
    }

    /// Vacate `seat_id` and clear whoever referenced it.
    pub fn release_seat(&mut self, seat_id: &str) -> Result<Vec<Change>, StoreError> {
        self.apply(Command::ReleaseSeat {
            seat_id: seat_id.to_string(),
        })
    }

    /// Mark a load of `collection` as started.
    pub fn begin_load(&mut self, collection: Collection) {
        debug!(%collection, "load started");
        self.is_loading = true;
    }

    /// Replace a collection with fetched data.
    pub fn commit_load(&mut self, loaded: Loaded) -> Vec<Change> {
        let collection = loaded.collection();
        let count = loaded.len();
        match loaded {
            Loaded::Resources(mut resources) => {
                for resource in &mut resources {
                    if let Some(excess) = resource.cap_chargeability() {
                        warn!(
                            resource = %resource.id,
                            chargeability = excess,
                            "capped chargeability at {FULL_CHARGEABILITY}"
                        );
                    }
                    let recorded = resource.status;
                    if resource.refresh_status() {
                        warn!(
                            resource = %resource.id,
                            %recorded,
                            derived = %resource.status,
                            "normalised inconsistent resource status"
                        );
                    }
                }
                self.resources = resources;
                self.sync_project_names();
            }
            Loaded::Projects(projects) => {
                self.projects = projects;
                self.sync_project_names();
            }
            Loaded::Seats(seats) => self.seats = seats,
        }
        self.is_loading = false;
        info!(%collection, count, "collection loaded");
        vec![Change::Replaced(collection)]
    }

    /// Record a failed load of `collection`, leaving its data unchanged.
    pub fn fail_load(&mut self, collection: Collection, source: anyhow::Error) -> StoreError {
        let err = StoreError::FetchFailed { collection, source };
        warn!(%collection, "load failed: {err:#}");
        self.error = Some(err.to_string());
        self.is_loading = false;
        err
    }

    /// Resources whose name, role, project or skills contain `query`.
    pub fn resources_matching(&self, query: &str) -> Vec<&Resource> {
        let needle = query.trim().to_lowercase();
        self.resources
            .iter()
            .filter(|resource| needle.is_empty() || resource.matches(&needle))
            .collect()
    }

    /// Resources linked to `project_id`.
    pub fn resources_on_project(&self, project_id: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|resource| resource.project_id.as_deref() == Some(project_id))
            .collect()
    }

    /// Resources with spare capacity, i.e. not fully assigned.
    pub fn available_resources(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|resource| resource.status != ResourceStatus::Assigned)
            .collect()
    }

    /// Seats nobody holds.
    pub fn available_seats(&self) -> Vec<&SeatLocation> {
        self.seats.iter().filter(|seat| seat.is_available).collect()
    }

    /// Unfilled positions on `project_id`, if the project exists.
    pub fn open_positions(&self, project_id: &str) -> Option<u32> {
        self.project(project_id).map(Project::open_positions)
    }

    /// Every invariant violation currently present.
    pub fn audit(&self) -> Vec<Inconsistency> {
        audit::inspect(&self.resources, &self.projects, &self.seats)
    }

    fn resource_index(&self, id: &str) -> Option<usize> {
        self.resources.iter().position(|resource| resource.id == id)
    }

    fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    fn seat_index(&self, id: &str) -> Option<usize> {
        self.seats.iter().position(|seat| seat.id == id)
    }

    fn assign_to_project(
        &mut self,
        resource_id: &str,
        project_id: &str,
        chargeability: u8,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Change>, StoreError> {
        if chargeability > FULL_CHARGEABILITY {
            return Err(StoreError::InvalidChargeability {
                value: chargeability,
            });
        }
        if end_date.is_some_and(|end| end < start_date) {
            return Err(StoreError::InvalidDateRange);
        }
        let project_index = self
            .project_index(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound {
                project_id: project_id.to_string(),
            })?;
        let resource_index = self
            .resource_index(resource_id)
            .ok_or_else(|| StoreError::ResourceNotFound {
                resource_id: resource_id.to_string(),
            })?;

        let mut changes = vec![Change::Resource(resource_id.to_string())];

        // Leave the previous project first so its count stays accurate.
        if let Some(previous) = self.resources[resource_index].project_id.clone() {
            if let Some(index) = self.project_index(&previous) {
                let project = &mut self.projects[index];
                project.assigned_resources = project.assigned_resources.saturating_sub(1);
                if previous != project_id {
                    changes.push(Change::Project(previous));
                }
            }
        }

        let project = &mut self.projects[project_index];
        project.assigned_resources = project.assigned_resources.saturating_add(1);
        let resource = &mut self.resources[resource_index];
        resource.link_project(project, chargeability, start_date, end_date);
        changes.push(Change::Project(project_id.to_string()));

        info!(
            resource = resource_id,
            project = project_id,
            chargeability,
            status = %resource.status,
            "resource assigned to project"
        );
        Ok(changes)
    }

    fn remove_from_project(&mut self, resource_id: &str) -> Result<Vec<Change>, StoreError> {
        let resource_index = self
            .resource_index(resource_id)
            .filter(|&index| self.resources[index].project_id.is_some())
            .ok_or_else(|| StoreError::NotAssigned {
                resource_id: resource_id.to_string(),
            })?;

        let mut changes = vec![Change::Resource(resource_id.to_string())];
        if let Some(previous) = self.resources[resource_index].unlink_project() {
            if let Some(index) = self.project_index(&previous) {
                let project = &mut self.projects[index];
                project.assigned_resources = project.assigned_resources.saturating_sub(1);
                changes.push(Change::Project(previous.clone()));
            }
            info!(resource = resource_id, project = %previous, "resource removed from project");
        }
        Ok(changes)
    }

    fn assign_seat_to(
        &mut self,
        resource_id: &str,
        seat_id: &str,
    ) -> Result<Vec<Change>, StoreError> {
        let seat_index = self
            .seat_index(seat_id)
            .filter(|&index| self.seats[index].is_available)
            .ok_or_else(|| StoreError::SeatUnavailable {
                seat_id: seat_id.to_string(),
            })?;
        let resource_index = self
            .resource_index(resource_id)
            .ok_or_else(|| StoreError::ResourceNotFound {
                resource_id: resource_id.to_string(),
            })?;

        let mut changes = Vec::with_capacity(3);
        let previous = self.resources[resource_index]
            .seat_location
            .replace(seat_id.to_string());
        if let Some(previous) = previous.filter(|previous| previous != seat_id) {
            if let Some(index) = self.seat_index(&previous) {
                let old_seat = &mut self.seats[index];
                if old_seat.assigned_to.as_deref() == Some(resource_id) {
                    old_seat.vacate();
                    changes.push(Change::Seat(previous));
                }
            }
        }

        self.seats[seat_index].occupy(resource_id);
        changes.push(Change::Seat(seat_id.to_string()));
        changes.push(Change::Resource(resource_id.to_string()));

        info!(resource = resource_id, seat = seat_id, "seat assigned");
        Ok(changes)
    }

    fn release_seat_by_id(&mut self, seat_id: &str) -> Result<Vec<Change>, StoreError> {
        let seat_index = self
            .seat_index(seat_id)
            .ok_or_else(|| StoreError::SeatNotFound {
                seat_id: seat_id.to_string(),
            })?;

        let mut changes = Vec::new();
        for resource in self
            .resources
            .iter_mut()
            .filter(|resource| resource.seat_location.as_deref() == Some(seat_id))
        {
            resource.seat_location = None;
            changes.push(Change::Resource(resource.id.clone()));
        }

        self.seats[seat_index].vacate();
        changes.push(Change::Seat(seat_id.to_string()));

        info!(seat = seat_id, "seat released");
        Ok(changes)
    }

    /// Mirror each linked project's current name onto its resources.
    fn sync_project_names(&mut self) -> usize {
        let projects = &self.projects;
        let mut updated = 0;
        for resource in &mut self.resources {
            let Some(project_id) = resource.project_id.as_deref() else {
                continue;
            };
            let Some(project) = projects.iter().find(|project| project.id == project_id) else {
                continue;
            };
            if resource.sync_project_name(project) {
                updated += 1;
            }
        }
        if updated > 0 {
            debug!(updated, "refreshed denormalised project names");
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures;

    fn loaded() -> PlanningState {
        PlanningState::with_collections(
            fixtures::resources(),
            fixtures::projects(),
            fixtures::seats(),
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn assigned(state: &PlanningState, project_id: &str) -> u32 {
        state
            .project(project_id)
            .map(|project| project.assigned_resources)
            .expect("project exists")
    }

    #[test]
    fn full_chargeability_marks_resource_assigned() {
        let mut state = loaded();
        state
            .assign_resource_to_project("4", "p4", 100, date(2024, 6, 1), Some(date(2024, 9, 30)))
            .expect("assignment succeeds");

        let dave = state.resource("4").expect("resource 4");
        assert_eq!(dave.project_id.as_deref(), Some("p4"));
        assert_eq!(dave.project_name.as_deref(), Some("Mobile App Development"));
        assert_eq!(dave.chargeability, 100);
        assert_eq!(dave.status, ResourceStatus::Assigned);
        assert_eq!(dave.start_date, Some(date(2024, 6, 1)));
        assert_eq!(dave.end_date, Some(date(2024, 9, 30)));
        assert_eq!(assigned(&state, "p4"), 1);
        assert_eq!(state.error(), None);
        assert!(state.audit().is_empty());
    }

    #[test]
    fn partial_chargeability_marks_resource_partially_available() {
        let mut state = loaded();
        for chargeability in [1, 50, 99] {
            state
                .assign_resource_to_project("4", "p2", chargeability, date(2024, 3, 1), None)
                .expect("assignment succeeds");
            let dave = state.resource("4").expect("resource 4");
            assert_eq!(dave.status, ResourceStatus::PartiallyAvailable);
            assert_eq!(dave.end_date, None);
        }
        // Repeated assignment to the same project counts the resource once.
        assert_eq!(assigned(&state, "p2"), 2);
        assert!(state.audit().is_empty());
    }

    #[test]
    fn zero_chargeability_on_a_project_is_partially_available() {
        let mut state = loaded();
        state
            .assign_resource_to_project("4", "p4", 0, date(2024, 6, 1), None)
            .expect("assignment succeeds");

        let dave = state.resource("4").expect("resource 4");
        assert_eq!(dave.chargeability, 0);
        assert_eq!(dave.status, ResourceStatus::PartiallyAvailable);
        assert_eq!(assigned(&state, "p4"), 1);
        assert!(state.audit().is_empty());
    }

    #[test]
    fn reassignment_moves_the_project_count() {
        let mut state = loaded();
        let changes = state
            .assign_resource_to_project("1", "p3", 100, date(2024, 7, 1), None)
            .expect("assignment succeeds");

        assert_eq!(assigned(&state, "p1"), 1);
        assert_eq!(assigned(&state, "p3"), 2);
        assert!(changes.contains(&Change::Project("p1".to_string())));
        assert!(changes.contains(&Change::Project("p3".to_string())));
        assert_eq!(
            state.resource("1").and_then(|r| r.project_name.as_deref()),
            Some("Cloud Migration")
        );
        assert!(state.audit().is_empty());
    }

    #[test]
    fn unknown_project_is_rejected_without_changes() {
        let mut state = loaded();
        let before = state.resources().to_vec();

        let err = state
            .assign_resource_to_project("4", "p99", 100, date(2024, 1, 1), None)
            .expect_err("project does not exist");
        assert!(matches!(err, StoreError::ProjectNotFound { .. }));
        assert_eq!(state.error(), Some("Project not found"));
        assert_eq!(state.resources(), before.as_slice());
        assert_eq!(assigned(&state, "p1"), 2);
    }

    #[test]
    fn unknown_resource_is_rejected_on_assignment() {
        let mut state = loaded();
        let err = state
            .assign_resource_to_project("42", "p4", 100, date(2024, 1, 1), None)
            .expect_err("resource does not exist");
        assert!(matches!(err, StoreError::ResourceNotFound { .. }));
        assert_eq!(state.error(), Some("Resource not found"));
        assert_eq!(assigned(&state, "p4"), 0);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let mut state = loaded();
        let err = state
            .assign_resource_to_project("4", "p4", 101, date(2024, 1, 1), None)
            .expect_err("chargeability above 100");
        assert!(matches!(err, StoreError::InvalidChargeability { value: 101 }));

        let err = state
            .assign_resource_to_project("4", "p4", 50, date(2024, 5, 1), Some(date(2024, 4, 30)))
            .expect_err("end before start");
        assert!(matches!(err, StoreError::InvalidDateRange));
        assert_eq!(state.error(), Some("End date cannot precede start date"));
        assert!(state.resource("4").and_then(|r| r.project_id.as_ref()).is_none());
    }

    #[test]
    fn removal_resets_project_fields() {
        let mut state = loaded();
        state
            .remove_resource_from_project("5")
            .expect("removal succeeds");

        let eva = state.resource("5").expect("resource 5");
        assert_eq!(eva.project_id, None);
        assert_eq!(eva.project_name, None);
        assert_eq!(eva.chargeability, 0);
        assert_eq!(eva.start_date, None);
        assert_eq!(eva.end_date, None);
        assert_eq!(eva.status, ResourceStatus::Available);
        assert_eq!(eva.seat_location.as_deref(), Some("s5"));
        assert_eq!(assigned(&state, "p3"), 0);
        assert!(state.audit().is_empty());
    }

    #[test]
    fn removal_floors_project_count_at_zero() {
        let mut projects = fixtures::projects();
        projects[2].assigned_resources = 0;
        let mut state =
            PlanningState::with_collections(fixtures::resources(), projects, fixtures::seats());

        state
            .remove_resource_from_project("5")
            .expect("removal succeeds");
        assert_eq!(assigned(&state, "p3"), 0);
    }

    #[test]
    fn removing_unassigned_resource_sets_error_only() {
        let mut state = loaded();
        let before = state.clone();

        for id in ["4", "missing"] {
            let err = state
                .remove_resource_from_project(id)
                .expect_err("nothing to remove");
            assert!(matches!(err, StoreError::NotAssigned { .. }));
        }
        assert_eq!(
            state.error(),
            Some("Resource not found or not assigned to a project")
        );
        assert_eq!(state.resources(), before.resources());
        assert_eq!(state.projects(), before.projects());
    }

    #[test]
    fn assign_then_remove_restores_resource_fields() {
        let mut state = loaded();
        let original = state.resource("4").cloned().expect("resource 4");

        state
            .assign_resource_to_project("4", "p1", 100, date(2024, 2, 1), Some(date(2024, 3, 1)))
            .expect("assignment succeeds");
        state
            .remove_resource_from_project("4")
            .expect("removal succeeds");

        assert_eq!(state.resource("4"), Some(&original));
        assert_eq!(assigned(&state, "p1"), 2);
    }

    #[test]
    fn moving_to_a_new_seat_frees_the_old_one() {
        let mut state = loaded();
        state.assign_seat("4", "s6").expect("s6 is free");

        let s4 = state.seat("s4").expect("seat s4");
        assert!(s4.is_available);
        assert_eq!(s4.assigned_to, None);
        let s6 = state.seat("s6").expect("seat s6");
        assert!(!s6.is_available);
        assert_eq!(s6.assigned_to.as_deref(), Some("4"));
        assert_eq!(
            state.resource("4").and_then(|r| r.seat_location.as_deref()),
            Some("s6")
        );
        assert!(state.audit().is_empty());
    }

    #[test]
    fn consecutive_seat_moves_keep_one_seat() {
        let mut state = loaded();
        state.assign_seat("4", "s7").expect("s7 is free");
        state.assign_seat("4", "s8").expect("s8 is free");

        let s7 = state.seat("s7").expect("seat s7");
        assert!(s7.is_available);
        assert_eq!(s7.assigned_to, None);
        assert_eq!(
            state.seat("s8").and_then(|s| s.assigned_to.as_deref()),
            Some("4")
        );
        assert_eq!(
            state.resource("4").and_then(|r| r.seat_location.as_deref()),
            Some("s8")
        );
        assert!(state.audit().is_empty());
    }

    #[test]
    fn occupied_or_unknown_seat_is_not_available() {
        let mut state = loaded();
        let before = state.seats().to_vec();

        for seat in ["s1", "s42"] {
            let err = state.assign_seat("4", seat).expect_err("seat cannot be taken");
            assert!(matches!(err, StoreError::SeatUnavailable { .. }));
            assert_eq!(state.error(), Some("Seat is not available"));
        }
        assert_eq!(state.seats(), before.as_slice());
    }

    #[test]
    fn seat_for_unknown_resource_is_rejected() {
        let mut state = loaded();
        let err = state
            .assign_seat("42", "s6")
            .expect_err("resource does not exist");
        assert!(matches!(err, StoreError::ResourceNotFound { .. }));
        let s6 = state.seat("s6").expect("seat s6");
        assert!(s6.is_available);
        assert_eq!(s6.assigned_to, None);
    }

    #[test]
    fn releasing_a_seat_is_idempotent() {
        let mut state = loaded();
        state.release_seat("s3").expect("seat exists");
        let once = state.clone();
        state.release_seat("s3").expect("seat exists");

        assert_eq!(state.seats(), once.seats());
        assert_eq!(state.resources(), once.resources());
        let s3 = state.seat("s3").expect("seat s3");
        assert!(s3.is_available);
        assert_eq!(s3.assigned_to, None);
        assert_eq!(state.resource("3").and_then(|r| r.seat_location.clone()), None);
        assert!(state.audit().is_empty());
    }

    #[test]
    fn releasing_unknown_seat_is_an_error() {
        let mut state = loaded();
        let err = state.release_seat("s42").expect_err("seat does not exist");
        assert!(matches!(err, StoreError::SeatNotFound { .. }));
        assert_eq!(state.error(), Some("Seat not found"));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state = loaded();
        let _ = state.assign_seat("4", "s1");
        assert!(state.error().is_some());
        state.release_seat("s6").expect("seat exists");
        assert_eq!(state.error(), None);
    }

    #[test]
    fn statuses_stay_derivable_after_every_operation() {
        let mut state = loaded();
        let _ = state.assign_resource_to_project("2", "p4", 100, date(2024, 6, 1), None);
        let _ = state.remove_resource_from_project("1");
        let _ = state.assign_resource_to_project("3", "p99", 10, date(2024, 6, 1), None);
        let _ = state.assign_seat("1", "s6");
        let _ = state.release_seat("s2");
        let _ = state.remove_resource_from_project("4");

        for resource in state.resources() {
            assert_eq!(resource.status, resource.derive_status(), "{}", resource.id);
        }
        assert!(state.audit().is_empty(), "{:?}", state.audit());
    }

    #[test]
    fn loads_normalise_status_and_project_names() {
        let mut resources = fixtures::resources();
        resources[1].status = ResourceStatus::Assigned;
        let mut projects = fixtures::projects();
        projects[0].name = "Digital Transformation II".to_string();

        let mut state = PlanningState::new();
        state.begin_load(Collection::Resources);
        assert!(state.is_loading());
        let changes = state.commit_load(Loaded::Resources(resources));
        assert_eq!(changes, vec![Change::Replaced(Collection::Resources)]);
        assert!(!state.is_loading());
        assert_eq!(
            state.resource("2").map(|r| r.status),
            Some(ResourceStatus::PartiallyAvailable)
        );

        state.commit_load(Loaded::Projects(projects));
        assert_eq!(
            state.resource("1").and_then(|r| r.project_name.as_deref()),
            Some("Digital Transformation II")
        );
    }

    #[test]
    fn loads_cap_chargeability_above_full() {
        let mut resources = fixtures::resources();
        resources[1] = serde_json::from_value(serde_json::json!({
            "id": "2",
            "name": "Bob Smith",
            "role": "Backend Developer",
            "projectId": "p1",
            "projectName": "Digital Transformation",
            "chargeability": 150,
            "skillset": [],
            "status": "partially_available",
            "seatLocation": "s2"
        }))
        .expect("resource json");

        let mut state = loaded();
        state.commit_load(Loaded::Resources(resources));

        let bob = state.resource("2").expect("resource 2");
        assert_eq!(bob.chargeability, FULL_CHARGEABILITY);
        assert_eq!(bob.status, ResourceStatus::Assigned);
        assert!(state.audit().is_empty(), "{:?}", state.audit());
    }

    #[test]
    fn failed_load_keeps_existing_data() {
        let mut state = loaded();
        state.begin_load(Collection::Seats);
        let err = state.fail_load(Collection::Seats, anyhow::anyhow!("timeout"));

        assert_eq!(err.to_string(), "Failed to fetch seats");
        assert_eq!(state.error(), Some("Failed to fetch seats"));
        assert!(!state.is_loading());
        assert_eq!(state.seats().len(), 8);
    }

    #[test]
    fn queries_filter_collections() {
        let state = loaded();
        let kubernetes: Vec<_> = state
            .resources_matching("kubernetes")
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(kubernetes, vec!["4"]);
        assert_eq!(state.resources_matching("  ").len(), 5);
        assert_eq!(state.resources_matching("digital").len(), 2);

        assert_eq!(state.resources_on_project("p1").len(), 2);
        let spare: Vec<_> = state
            .available_resources()
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(spare, vec!["2", "4", "5"]);
        assert_eq!(state.available_seats().len(), 3);
        assert_eq!(state.open_positions("p2"), Some(7));
        assert_eq!(state.open_positions("p99"), None);
    }

    #[test]
    fn snapshot_serialises_in_ui_shape() {
        let state = loaded();
        let value = serde_json::to_value(&state).expect("serialise state");
        assert_eq!(value["isLoading"], false);
        assert!(value["error"].is_null());
        assert_eq!(value["seats"][5]["isAvailable"], true);
        assert_eq!(value["resources"][0]["projectName"], "Digital Transformation");
    }
}
