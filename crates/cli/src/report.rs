use staffing_core::{Change, PlanningStore, ResourceStatus};

pub fn print_summary(store: &PlanningStore) {
    println!("Projects");
    for project in store.projects() {
        println!(
            "  {:<4} {:<24} {:<18} {}/{} staffed",
            project.id,
            project.name,
            project.client,
            project.assigned_resources,
            project.required_resources
        );
    }

    println!("Resources");
    for resource in store.resources() {
        let placement = match (&resource.project_name, resource.status) {
            (_, ResourceStatus::Available) => "available".to_string(),
            (Some(name), status) => format!("{status} on {name} at {}%", resource.chargeability),
            (None, status) => status.to_string(),
        };
        let seat = resource
            .seat_location
            .as_deref()
            .and_then(|id| store.seat(id))
            .map(|seat| seat.display_name())
            .unwrap_or_else(|| "no seat".to_string());
        println!(
            "  {:<4} {:<16} {:<20} {} · {}",
            resource.id, resource.name, resource.role, placement, seat
        );
    }

    let free: Vec<String> = store
        .available_seats()
        .into_iter()
        .map(|seat| seat.display_name())
        .collect();
    if free.is_empty() {
        println!("Free seats: none");
    } else {
        println!("Free seats: {}", free.join(", "));
    }
}

pub fn print_matches(store: &PlanningStore, query: &str) {
    let matches = store.resources_matching(query);
    if matches.is_empty() {
        println!("No resources match '{query}'");
        return;
    }
    for resource in matches {
        println!(
            "  {:<4} {:<16} {:<20} {}",
            resource.id,
            resource.name,
            resource.role,
            resource.skillset.join(", ")
        );
    }
}

pub fn print_changes(changes: &[Change]) {
    for change in changes {
        match change {
            Change::Resource(id) => println!("updated resource {id}"),
            Change::Project(id) => println!("updated project {id}"),
            Change::Seat(id) => println!("updated seat {id}"),
            Change::Replaced(collection) => println!("reloaded {collection}"),
        }
    }
}
