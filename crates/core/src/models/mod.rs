//! Shared domain models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest chargeability a resource can carry, in percent.
pub const FULL_CHARGEABILITY: u8 = 100;

/// Allocation state of a resource, derived from its project link and chargeability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Fully charged to a project.
    Assigned,
    /// Not linked to any project.
    Available,
    /// Linked to a project below full chargeability.
    PartiallyAvailable,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Assigned => "assigned",
            Self::Available => "available",
            Self::PartiallyAvailable => "partially available",
        };
        f.write_str(label)
    }
}

/// Lifecycle phase of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Currently staffed and running.
    Active,
    /// Finished.
    Completed,
    /// Scheduled but not started.
    Planned,
}

/// A staff member that can be placed on a project and given a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Project the resource is currently placed on.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Copy of the linked project's name, kept in sync by the store.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Share of time billed to the project, 0-100.
    #[serde(default)]
    pub chargeability: u8,
    /// First day on the project.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day on the project, open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Ordered skill tags.
    #[serde(default)]
    pub skillset: Vec<String>,
    /// Allocation state, see [`Resource::derive_status`].
    pub status: ResourceStatus,
    /// Identifier of the seat held by the resource.
    #[serde(default)]
    pub seat_location: Option<String>,
}

impl Resource {
    /// Status implied by the current project link and chargeability.
    pub fn derive_status(&self) -> ResourceStatus {
        match self.project_id {
            None => ResourceStatus::Available,
            Some(_) if self.chargeability == FULL_CHARGEABILITY => ResourceStatus::Assigned,
            Some(_) => ResourceStatus::PartiallyAvailable,
        }
    }

    /// Recompute `status`, returning `true` when it changed.
    pub fn refresh_status(&mut self) -> bool {
        let derived = self.derive_status();
        let changed = derived != self.status;
        self.status = derived;
        changed
    }

    /// Cap chargeability at [`FULL_CHARGEABILITY`], returning the rejected value.
    pub(crate) fn cap_chargeability(&mut self) -> Option<u8> {
        if self.chargeability <= FULL_CHARGEABILITY {
            return None;
        }
        let excess = self.chargeability;
        self.chargeability = FULL_CHARGEABILITY;
        Some(excess)
    }

    /// Place the resource on `project` for the given period.
    pub(crate) fn link_project(
        &mut self,
        project: &Project,
        chargeability: u8,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) {
        self.project_id = Some(project.id.clone());
        self.project_name = Some(project.name.clone());
        self.chargeability = chargeability;
        self.start_date = Some(start_date);
        self.end_date = end_date;
        self.refresh_status();
    }

    /// Clear every project-related field, returning the previous project id.
    pub(crate) fn unlink_project(&mut self) -> Option<String> {
        let previous = self.project_id.take();
        self.project_name = None;
        self.chargeability = 0;
        self.start_date = None;
        self.end_date = None;
        self.refresh_status();
        previous
    }

    /// Refresh the denormalised project name, returning `true` when it changed.
    pub(crate) fn sync_project_name(&mut self, project: &Project) -> bool {
        if self.project_name.as_deref() == Some(project.name.as_str()) {
            return false;
        }
        self.project_name = Some(project.name.clone());
        true
    }

    /// Case-insensitive match against name, role, project name and skills.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
            || self
                .project_name
                .as_ref()
                .map(|value| value.to_lowercase().contains(needle))
                .unwrap_or(false)
            || self
                .skillset
                .iter()
                .any(|skill| skill.to_lowercase().contains(needle))
    }
}

/// A client engagement that needs staffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier.
    pub id: String,
    /// Display name, mirrored onto linked resources.
    pub name: String,
    /// Customer the project is delivered for.
    pub client: String,
    /// Kick-off date.
    pub start_date: NaiveDate,
    /// Planned end, open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle phase.
    pub status: ProjectStatus,
    /// Number of resources the project needs.
    pub required_resources: u32,
    /// Number of resources currently linked to the project.
    #[serde(default)]
    pub assigned_resources: u32,
}

impl Project {
    /// Positions still to be filled, never negative.
    pub fn open_positions(&self) -> u32 {
        self.required_resources.saturating_sub(self.assigned_resources)
    }
}

/// A physical desk that holds at most one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLocation {
    /// Stable identifier.
    pub id: String,
    /// Desk label, e.g. `A-101`.
    pub name: String,
    /// Floor label.
    pub floor: String,
    /// Section label.
    pub section: String,
    /// `false` while a resource holds the seat.
    pub is_available: bool,
    /// Identifier of the resource sitting here.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl SeatLocation {
    pub(crate) fn occupy(&mut self, resource_id: &str) {
        self.is_available = false;
        self.assigned_to = Some(resource_id.to_string());
    }

    pub(crate) fn vacate(&mut self) {
        self.is_available = true;
        self.assigned_to = None;
    }

    /// Human-readable location, e.g. `A-101 (2nd Floor, Section B)`.
    pub fn display_name(&self) -> String {
        format!("{} ({}, {})", self.name, self.floor, self.section)
    }
}
