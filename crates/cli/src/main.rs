// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod fixtures;

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use serde::Serialize;
use spark_capacity::{PlanningSession, validate_session};
use spark_capacity_api::{
    ApiResult, CreateSprintRequest, InMemorySprintStore, InMemoryTeamDirectory,
    SprintCapacityResponse, SprintProgressResponse, SubmitResponse, ViolationResponse,
    load_team_roster, snapshot, sprint_progress, start_session, submit,
};
use spark_capacity_domain::{DEFAULT_DAILY_HOURS, TaskRecord, UtilizationBand, Violation};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    match args.run() {
        Ok(outcome) => {
            println!("{}", outcome.output);
            if let Some(failure) = outcome.failure {
                error!("{failure}");
                std::process::exit(1);
            }
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// `RUST_LOG` wins over the verbosity flags when it is set.
fn init_tracing(level: LevelFilter) {
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Spark Capacity - sprint capacity planning from JSON sprint requests
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<Outcome> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Compute the capacity plan for a sprint request
    #[command(visible_alias = "p")]
    Plan(PlanArgs),

    /// Validate a sprint request and list every violation
    #[command(visible_alias = "v")]
    Validate(SessionArgs),

    /// Validate a sprint request and submit it to an in-memory store
    #[command(visible_alias = "s")]
    Submit(SessionArgs),

    /// Report per-member task progress against capacity
    Progress(ProgressArgs),
}

/// Options shared by every command that builds a planning session.
#[derive(Clone, Debug, ClapArgs)]
struct SessionArgs {
    /// Path to the sprint request JSON
    input: PathBuf,

    /// Team directory fixture used to add every member of the selected team
    #[arg(short, long)]
    team_directory: Option<PathBuf>,

    /// Daily hours used when the request does not set a default
    #[arg(long, default_value_t = DEFAULT_DAILY_HOURS)]
    default_daily_hours: f64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Debug, ClapArgs)]
struct PlanArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Only show rows in this utilization band
    #[arg(short, long)]
    band: Option<UtilizationBand>,
}

#[derive(Clone, Debug, ClapArgs)]
struct ProgressArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Task list fixture (JSON array of tasks)
    #[arg(long)]
    tasks: PathBuf,
}

/// Rendered command output. `failure` is set when the command produced
/// output but should still exit non-zero.
#[derive(Debug)]
struct Outcome {
    output: String,
    failure: Option<String>,
}

impl Outcome {
    const fn success(output: String) -> Self {
        Self {
            output,
            failure: None,
        }
    }
}

/// Output of the `submit` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOutput {
    submit: SubmitResponse,
    sprint: SprintCapacityResponse,
}

impl Command {
    fn run(self) -> Result<Outcome> {
        let outcome: Outcome = match self {
            Self::Plan(args) => {
                let session: PlanningSession = build_session(&args.session)?;
                let response: SprintCapacityResponse =
                    filter_by_band(snapshot(&session), args.band);
                Outcome::success(render(&response, args.session.pretty)?)
            }
            Self::Validate(args) => {
                let session: PlanningSession = build_session(&args)?;
                let violations: Vec<Violation> = validate_session(&session);
                let responses: Vec<ViolationResponse> =
                    violations.iter().map(ViolationResponse::from).collect();
                let output: String = render(&responses, args.pretty)?;
                if violations.is_empty() {
                    info!("Sprint plan is valid");
                    Outcome::success(output)
                } else {
                    Outcome {
                        output,
                        failure: Some(format!(
                            "Sprint plan has {} violation(s)",
                            violations.len()
                        )),
                    }
                }
            }
            Self::Submit(args) => {
                let session: PlanningSession = build_session(&args)?;
                let mut store: InMemorySprintStore = InMemorySprintStore::new();
                let result: ApiResult<SubmitResponse> = submit(&session, &mut store)?;
                let output: SubmitOutput = SubmitOutput {
                    sprint: snapshot(&result.new_session),
                    submit: result.response,
                };
                Outcome::success(render(&output, args.pretty)?)
            }
            Self::Progress(args) => {
                let session: PlanningSession = build_session(&args.session)?;
                let tasks: Vec<TaskRecord> = fixtures::read_json(&args.tasks)?;
                let response: SprintProgressResponse = sprint_progress(&session, &tasks);
                Outcome::success(render(&response, args.session.pretty)?)
            }
        };
        Ok(outcome)
    }
}

/// Starts a session from the request file, then loads the team roster when a
/// directory fixture is given.
fn build_session(args: &SessionArgs) -> Result<PlanningSession> {
    let request: CreateSprintRequest = fixtures::read_json(&args.input)?;
    let mut session: PlanningSession =
        start_session(&request, args.default_daily_hours)?.new_session;

    if let Some(path) = &args.team_directory {
        let directory: InMemoryTeamDirectory = fixtures::read_json(path)?;
        session = load_team_roster(&session, &directory)?.new_session;
    }

    Ok(session)
}

fn filter_by_band(
    mut response: SprintCapacityResponse,
    band: Option<UtilizationBand>,
) -> SprintCapacityResponse {
    if let Some(band) = band {
        response
            .user_capacities
            .retain(|row| row.utilization_band == band.as_str());
    }
    response
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text: String = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    const REQUEST: &str = r#"{
        "sprintName": "Sprint 34",
        "fromDate": "2025-08-01",
        "toDate": "2025-08-14",
        "tramId": 3,
        "noOfHolidays": 2,
        "userCapacities": [
            { "userId": 11, "userName": "Farhana Akter", "allocatedHours": 90 }
        ]
    }"#;

    const DIRECTORY: &str = r#"{
        "teams": {
            "3": [
                { "userId": 11, "userName": "Farhana Akter" },
                { "userId": 12, "userName": "Tanvir Hossain" }
            ]
        }
    }"#;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("spark-capacity-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path: PathBuf = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn session_args(input: &Path, team_directory: Option<PathBuf>) -> SessionArgs {
        SessionArgs {
            input: input.to_path_buf(),
            team_directory,
            default_daily_hours: DEFAULT_DAILY_HOURS,
            pretty: false,
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_with_band() {
        let args: Args = Args::try_parse_from([
            "spark-capacity",
            "plan",
            "sprint.json",
            "--band",
            "over-allocated",
            "--pretty",
        ])
        .unwrap();

        let Command::Plan(plan) = args.command else {
            panic!("expected plan command");
        };
        assert_eq!(plan.band, Some(UtilizationBand::OverAllocated));
        assert!(plan.session.pretty);
        assert_eq!(plan.session.input, PathBuf::from("sprint.json"));
    }

    #[test]
    fn test_parse_rejects_unknown_band() {
        let result: Result<Args, clap::Error> =
            Args::try_parse_from(["spark-capacity", "plan", "sprint.json", "--band", "busy"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_build_session_loads_team_roster() {
        let input: PathBuf = write_fixture("roster-request.json", REQUEST);
        let directory: PathBuf = write_fixture("roster-directory.json", DIRECTORY);

        let session: PlanningSession =
            build_session(&session_args(&input, Some(directory))).unwrap();

        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.duration().working_days, 12);
    }

    #[test]
    fn test_plan_filters_rows_by_band() {
        let input: PathBuf = write_fixture("band-request.json", REQUEST);
        let directory: PathBuf = write_fixture("band-directory.json", DIRECTORY);
        let session: PlanningSession =
            build_session(&session_args(&input, Some(directory))).unwrap();

        let response: SprintCapacityResponse =
            filter_by_band(snapshot(&session), Some(UtilizationBand::UnderUtilized));

        assert_eq!(response.user_capacities.len(), 1);
        assert_eq!(response.user_capacities[0].user_name, "Tanvir Hossain");
    }

    #[test]
    fn test_submit_command_reports_new_sprint() {
        let input: PathBuf = write_fixture("submit-request.json", REQUEST);
        let command: Command = Command::Submit(session_args(&input, None));

        let outcome: Outcome = command.run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();

        assert!(outcome.failure.is_none());

        assert_eq!(value["submit"]["sprintId"], 1);
        assert_eq!(value["submit"]["created"], true);
        assert_eq!(value["sprint"]["phase"], "submitted");
    }

    #[test]
    fn test_validate_command_fails_on_violations() {
        let input: PathBuf = write_fixture(
            "invalid-request.json",
            r#"{ "sprintName": "", "fromDate": "2025-08-01", "tramId": 3 }"#,
        );
        let command: Command = Command::Validate(session_args(&input, None));

        let outcome: Outcome = command.run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();

        assert_eq!(
            outcome.failure.as_deref(),
            Some("Sprint plan has 2 violation(s)")
        );
        assert_eq!(value[0]["code"], "sprint_name_required");
        assert_eq!(value[1]["code"], "to_date_required");
    }

    #[test]
    fn test_validate_command_accepts_valid_plan() {
        let input: PathBuf = write_fixture("valid-request.json", REQUEST);
        let command: Command = Command::Validate(session_args(&input, None));

        let outcome: Outcome = command.run().unwrap();

        assert!(outcome.failure.is_none());
        assert_eq!(outcome.output, "[]");
    }

    #[test]
    fn test_missing_input_file_is_reported() {
        let command: Command = Command::Plan(PlanArgs {
            session: session_args(Path::new("/nonexistent/sprint.json"), None),
            band: None,
        });

        let err: String = command.run().unwrap_err().to_string();

        assert!(err.contains("/nonexistent/sprint.json"));
    }
}
