use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use staffing_core::Command as StoreCommand;

/// Inspect and rearrange project staffing and seating.
#[derive(Parser, Debug)]
#[command(name = "staffing", version)]
pub struct Cli {
    /// Log at debug level when `RUST_LOG` is not set.
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print projects, resources and free seats.
    Summary,
    /// Print the whole planning state as JSON.
    Json,
    /// Find resources by name, role, project or skill.
    Search {
        #[arg(required = true, value_name = "QUERY")]
        terms: Vec<String>,
    },
    /// Place a resource on a project.
    Assign {
        resource: String,
        project: String,
        /// Percentage of time billed to the project.
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        chargeability: u8,
        /// First day, `yyyy-MM-dd`.
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        /// Last day, `yyyy-MM-dd`; open-ended when omitted.
        #[arg(value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Take a resource off its project.
    Unassign { resource: String },
    /// Move a resource to a free seat.
    Seat { resource: String, seat: String },
    /// Vacate a seat.
    Release { seat: String },
}

impl CliCommand {
    /// Store mutation requested by this command, if any.
    pub fn into_store_command(self) -> Option<StoreCommand> {
        match self {
            Self::Summary | Self::Json | Self::Search { .. } => None,
            Self::Assign {
                resource,
                project,
                chargeability,
                start,
                end,
            } => Some(StoreCommand::AssignToProject {
                resource_id: resource,
                project_id: project,
                chargeability,
                start_date: start,
                end_date: end,
            }),
            Self::Unassign { resource } => Some(StoreCommand::RemoveFromProject {
                resource_id: resource,
            }),
            Self::Seat { resource, seat } => Some(StoreCommand::AssignSeat {
                resource_id: resource,
                seat_id: seat,
            }),
            Self::Release { seat } => Some(StoreCommand::ReleaseSeat { seat_id: seat }),
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected yyyy-MM-dd: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Option<CliCommand> {
        let argv = std::iter::once("staffing").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("arguments parse").command
    }

    #[test]
    fn no_subcommand_leaves_command_empty() {
        assert_eq!(command(&[]), None);
        assert_eq!(command(&["json"]), Some(CliCommand::Json));
    }

    #[test]
    fn assignment_maps_to_store_command() {
        let parsed = command(&["assign", "4", "p4", "100", "2024-06-01"]).expect("subcommand");
        assert_eq!(
            parsed.into_store_command(),
            Some(StoreCommand::AssignToProject {
                resource_id: "4".to_string(),
                project_id: "p4".to_string(),
                chargeability: 100,
                start_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
                end_date: None,
            })
        );

        let parsed = command(&["assign", "4", "p4", "0", "2024-06-01", "2024-12-31"])
            .expect("subcommand");
        let Some(StoreCommand::AssignToProject {
            chargeability,
            end_date,
            ..
        }) = parsed.into_store_command()
        else {
            panic!("expected an assignment");
        };
        assert_eq!(chargeability, 0);
        assert_eq!(end_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn seat_commands_map_to_store_commands() {
        assert_eq!(
            command(&["seat", "4", "s6"]).and_then(CliCommand::into_store_command),
            Some(StoreCommand::AssignSeat {
                resource_id: "4".to_string(),
                seat_id: "s6".to_string(),
            })
        );
        assert_eq!(
            command(&["release", "s3"]).and_then(CliCommand::into_store_command),
            Some(StoreCommand::ReleaseSeat {
                seat_id: "s3".to_string(),
            })
        );
        assert_eq!(command(&["summary"]).and_then(CliCommand::into_store_command), None);
    }

    #[test]
    fn collects_search_terms() {
        assert_eq!(
            command(&["search", "UX", "Designer"]),
            Some(CliCommand::Search {
                terms: vec!["UX".to_string(), "Designer".to_string()],
            })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for args in [
            vec!["staffing", "assign", "4", "p4", "lots", "2024-06-01"],
            vec!["staffing", "assign", "4", "p4", "101", "2024-06-01"],
            vec!["staffing", "assign", "4", "p4", "100", "06/01/2024"],
            vec!["staffing", "release"],
            vec!["staffing", "search"],
            vec!["staffing", "dance"],
        ] {
            assert!(Cli::try_parse_from(&args).is_err(), "{args:?} should be rejected");
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
