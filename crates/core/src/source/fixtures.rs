use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tokio::time::sleep;
use tracing::debug;

use super::DataSource;
use crate::models::{Project, ProjectStatus, Resource, ResourceStatus, SeatLocation};

/// Serves the built-in staffing data after a fixed delay.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    delay: Duration,
}

impl FixtureSource {
    /// Create a source that waits `delay` before every fetch.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Source without latency, handy for tests and scripting.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            debug!("simulating fetch latency of {:?}", self.delay);
            sleep(self.delay).await;
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn fetch_resources(&self) -> Result<Vec<Resource>> {
        self.wait().await;
        Ok(resources())
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>> {
        self.wait().await;
        Ok(projects())
    }

    async fn fetch_seats(&self) -> Result<Vec<SeatLocation>> {
        self.wait().await;
        Ok(seats())
    }
}

/// Built-in resources: five people, four of them staffed.
pub fn resources() -> Vec<Resource> {
    RESOURCES.clone()
}

/// Built-in projects `p1` to `p4`.
pub fn projects() -> Vec<Project> {
    PROJECTS.clone()
}

/// Built-in seats `s1` to `s8`; `s6` to `s8` are free.
pub fn seats() -> Vec<SeatLocation> {
    SEATS.clone()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: &str,
    name: &str,
    role: &str,
    project: Option<(&str, &str)>,
    chargeability: u8,
    period: Option<(NaiveDate, Option<NaiveDate>)>,
    skillset: &[&str],
    seat: &str,
) -> Resource {
    let mut resource = Resource {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        project_id: project.map(|(id, _)| id.to_string()),
        project_name: project.map(|(_, name)| name.to_string()),
        chargeability,
        start_date: period.map(|(start, _)| start),
        end_date: period.and_then(|(_, end)| end),
        skillset: skillset.iter().map(|skill| skill.to_string()).collect(),
        status: ResourceStatus::Available,
        seat_location: Some(seat.to_string()),
    };
    resource.refresh_status();
    resource
}

fn seat(id: &str, name: &str, floor: &str, section: &str, holder: Option<&str>) -> SeatLocation {
    SeatLocation {
        id: id.to_string(),
        name: name.to_string(),
        floor: floor.to_string(),
        section: section.to_string(),
        is_available: holder.is_none(),
        assigned_to: holder.map(str::to_string),
    }
}

static RESOURCES: Lazy<Vec<Resource>> = Lazy::new(|| {
    let digital = Some(("p1", "Digital Transformation"));
    vec![
        resource(
            "1",
            "Alice Chen",
            "Software Engineer",
            digital,
            100,
            Some((date(2024, 1, 15), Some(date(2024, 6, 30)))),
            &["React", "Node.js", "TypeScript"],
            "s1",
        ),
        resource(
            "2",
            "Bob Williams",
            "UX Designer",
            digital,
            80,
            Some((date(2024, 2, 1), None)),
            &["Figma", "UI/UX Research", "Prototyping"],
            "s2",
        ),
        resource(
            "3",
            "Carol Martinez",
            "Business Analyst",
            Some(("p2", "ERP Implementation")),
            100,
            Some((date(2024, 3, 10), Some(date(2024, 8, 15)))),
            &["Requirements Analysis", "SQL", "Process Modeling"],
            "s3",
        ),
        resource(
            "4",
            "Dave Johnson",
            "DevOps Engineer",
            None,
            0,
            None,
            &["Docker", "Kubernetes", "CI/CD", "AWS"],
            "s4",
        ),
        resource(
            "5",
            "Eva Brown",
            "Project Manager",
            Some(("p3", "Cloud Migration")),
            50,
            Some((date(2024, 1, 5), Some(date(2024, 12, 31)))),
            &["Agile", "Scrum", "Risk Management"],
            "s5",
        ),
    ]
});

static PROJECTS: Lazy<Vec<Project>> = Lazy::new(|| {
    vec![
        Project {
            id: "p1".to_string(),
            name: "Digital Transformation".to_string(),
            client: "ABC Bank".to_string(),
            start_date: date(2024, 1, 15),
            end_date: Some(date(2024, 6, 30)),
            status: ProjectStatus::Active,
            required_resources: 5,
            assigned_resources: 2,
        },
        Project {
            id: "p2".to_string(),
            name: "ERP Implementation".to_string(),
            client: "XYZ Manufacturing".to_string(),
            start_date: date(2024, 3, 1),
            end_date: Some(date(2024, 12, 31)),
            status: ProjectStatus::Active,
            required_resources: 8,
            assigned_resources: 1,
        },
        Project {
            id: "p3".to_string(),
            name: "Cloud Migration".to_string(),
            client: "Global Retail Co".to_string(),
            start_date: date(2024, 1, 5),
            end_date: Some(date(2024, 12, 31)),
            status: ProjectStatus::Active,
            required_resources: 6,
            assigned_resources: 1,
        },
        Project {
            id: "p4".to_string(),
            name: "Mobile App Development".to_string(),
            client: "FinTech Startup".to_string(),
            start_date: date(2024, 6, 1),
            end_date: None,
            status: ProjectStatus::Planned,
            required_resources: 4,
            assigned_resources: 0,
        },
    ]
});

static SEATS: Lazy<Vec<SeatLocation>> = Lazy::new(|| {
    vec![
        seat("s1", "A-101", "1st Floor", "Section A", Some("1")),
        seat("s2", "A-102", "1st Floor", "Section A", Some("2")),
        seat("s3", "A-103", "1st Floor", "Section A", Some("3")),
        seat("s4", "B-201", "2nd Floor", "Section B", Some("4")),
        seat("s5", "B-202", "2nd Floor", "Section B", Some("5")),
        seat("s6", "B-203", "2nd Floor", "Section B", None),
        seat("s7", "C-301", "3rd Floor", "Section C", None),
        seat("s8", "C-302", "3rd Floor", "Section C", None),
    ]
});
