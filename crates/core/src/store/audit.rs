//! Cross-collection consistency checks.

use std::{collections::HashMap, fmt};

use crate::models::{Project, Resource, ResourceStatus, SeatLocation, FULL_CHARGEABILITY};

/// A single invariant violation found by [`inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// Recorded status differs from the one implied by project and chargeability.
    StatusMismatch {
        /// Offending resource.
        resource_id: String,
        /// Status stored on the resource.
        recorded: ResourceStatus,
        /// Status the resource should have.
        derived: ResourceStatus,
    },
    /// Chargeability exceeds [`FULL_CHARGEABILITY`].
    ChargeabilityOutOfRange {
        /// Offending resource.
        resource_id: String,
        /// Stored chargeability.
        value: u8,
    },
    /// Denormalised project name differs from the project's name.
    ProjectNameDrift {
        /// Offending resource.
        resource_id: String,
        /// Name stored on the resource.
        recorded: Option<String>,
        /// Name of the linked project.
        expected: String,
    },
    /// Resource links to a project that is not loaded.
    UnknownProject {
        /// Offending resource.
        resource_id: String,
        /// Project id that matched nothing.
        project_id: String,
    },
    /// `assigned_resources` differs from the number of linked resources.
    AssignedCountMismatch {
        /// Offending project.
        project_id: String,
        /// Count stored on the project.
        recorded: u32,
        /// Resources actually pointing at the project.
        linked: u32,
    },
    /// `is_available` and `assigned_to` disagree.
    SeatFlagMismatch {
        /// Offending seat.
        seat_id: String,
    },
    /// Seat names a holder that does not point back at it.
    DanglingSeatHolder {
        /// Offending seat.
        seat_id: String,
        /// Holder recorded on the seat.
        resource_id: String,
    },
    /// Resource names a seat that does not point back at it.
    DanglingSeatLocation {
        /// Offending resource.
        resource_id: String,
        /// Seat recorded on the resource.
        seat_id: String,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusMismatch {
                resource_id,
                recorded,
                derived,
            } => write!(
                f,
                "resource {resource_id} is marked {recorded} but should be {derived}"
            ),
            Self::ChargeabilityOutOfRange { resource_id, value } => write!(
                f,
                "resource {resource_id} is charged at {value}%, above {FULL_CHARGEABILITY}%"
            ),
            Self::ProjectNameDrift {
                resource_id,
                recorded,
                expected,
            } => write!(
                f,
                "resource {resource_id} carries project name {:?}, expected {expected:?}",
                recorded.as_deref().unwrap_or("")
            ),
            Self::UnknownProject {
                resource_id,
                project_id,
            } => write!(f, "resource {resource_id} links to unknown project {project_id}"),
            Self::AssignedCountMismatch {
                project_id,
                recorded,
                linked,
            } => write!(
                f,
                "project {project_id} records {recorded} assigned resources but {linked} are linked"
            ),
            Self::SeatFlagMismatch { seat_id } => {
                write!(f, "seat {seat_id} availability flag disagrees with its holder")
            }
            Self::DanglingSeatHolder {
                seat_id,
                resource_id,
            } => write!(
                f,
                "seat {seat_id} is held by {resource_id}, who does not sit there"
            ),
            Self::DanglingSeatLocation {
                resource_id,
                seat_id,
            } => write!(
                f,
                "resource {resource_id} sits at {seat_id}, which is not held by them"
            ),
        }
    }
}

/// Check every cross-entity invariant over the given collections.
pub fn inspect(
    resources: &[Resource],
    projects: &[Project],
    seats: &[SeatLocation],
) -> Vec<Inconsistency> {
    let mut findings = Vec::new();
    let projects_by_id: HashMap<&str, &Project> = projects
        .iter()
        .map(|project| (project.id.as_str(), project))
        .collect();
    let seats_by_id: HashMap<&str, &SeatLocation> =
        seats.iter().map(|seat| (seat.id.as_str(), seat)).collect();
    let resources_by_id: HashMap<&str, &Resource> = resources
        .iter()
        .map(|resource| (resource.id.as_str(), resource))
        .collect();
    let mut linked: HashMap<&str, u32> = HashMap::new();

    for resource in resources {
        let derived = resource.derive_status();
        if derived != resource.status {
            findings.push(Inconsistency::StatusMismatch {
                resource_id: resource.id.clone(),
                recorded: resource.status,
                derived,
            });
        }
        if resource.chargeability > FULL_CHARGEABILITY {
            findings.push(Inconsistency::ChargeabilityOutOfRange {
                resource_id: resource.id.clone(),
                value: resource.chargeability,
            });
        }

        if let Some(project_id) = resource.project_id.as_deref() {
            *linked.entry(project_id).or_default() += 1;
            match projects_by_id.get(project_id) {
                Some(project) if resource.project_name.as_deref() != Some(project.name.as_str()) => {
                    findings.push(Inconsistency::ProjectNameDrift {
                        resource_id: resource.id.clone(),
                        recorded: resource.project_name.clone(),
                        expected: project.name.clone(),
                    });
                }
                Some(_) => {}
                None => findings.push(Inconsistency::UnknownProject {
                    resource_id: resource.id.clone(),
                    project_id: project_id.to_string(),
                }),
            }
        }

        if let Some(seat_id) = resource.seat_location.as_deref() {
            let held = seats_by_id
                .get(seat_id)
                .and_then(|seat| seat.assigned_to.as_deref())
                == Some(resource.id.as_str());
            if !held {
                findings.push(Inconsistency::DanglingSeatLocation {
                    resource_id: resource.id.clone(),
                    seat_id: seat_id.to_string(),
                });
            }
        }
    }

    for project in projects {
        let count = linked.get(project.id.as_str()).copied().unwrap_or(0);
        if count != project.assigned_resources {
            findings.push(Inconsistency::AssignedCountMismatch {
                project_id: project.id.clone(),
                recorded: project.assigned_resources,
                linked: count,
            });
        }
    }

    for seat in seats {
        if seat.is_available == seat.assigned_to.is_some() {
            findings.push(Inconsistency::SeatFlagMismatch {
                seat_id: seat.id.clone(),
            });
        }
        if let Some(holder) = seat.assigned_to.as_deref() {
            let sits_here = resources_by_id
                .get(holder)
                .and_then(|resource| resource.seat_location.as_deref())
                == Some(seat.id.as_str());
            if !sits_here {
                findings.push(Inconsistency::DanglingSeatHolder {
                    seat_id: seat.id.clone(),
                    resource_id: holder.to_string(),
                });
            }
        }
    }

    findings
}
