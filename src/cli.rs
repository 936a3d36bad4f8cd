//! Command-line interface for running farm scenarios headless.

use crate::query::QueryFilters;
use crate::scenario::{Action, Scenario};
use lexopt::prelude::*;
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments for the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    pub scenario_name: String,
    pub scenario_file: Option<PathBuf>,
    pub random_seed: Option<u64>,
    pub weeks: Option<u32>,
    pub manager: Option<String>,
    pub csv_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run,
    Scenarios,
    Query { file: PathBuf, filters: QueryFilters },
    Help,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Run,
            scenario_name: "basic".to_string(),
            scenario_file: None,
            random_seed: None,
            weeks: None,
            manager: None,
            csv_file: None,
            output_file: None,
            verbose: false,
            quiet: false,
        }
    }
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(std::env::args_os().skip(1))
}

/// Parses arguments, excluding the binary name.
pub fn parse_from<I>(iter: I) -> Result<CliArgs, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args = lexopt::Parser::from_args(iter);
    let mut cli_args = CliArgs::default();
    let mut subcommand = None;
    let mut query_file = None;
    let mut query_filters = QueryFilters::default();

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else if subcommand.as_deref() == Some("query") {
                    query_file = Some(PathBuf::from(val_str));
                } else {
                    return Err(lexopt::Error::from(format!("unexpected argument {}", val_str)));
                }
            }
            Long("scenario") => {
                cli_args.scenario_name = args.value()?.string()?;
            }
            Long("scenario-file") => {
                cli_args.scenario_file = Some(PathBuf::from(args.value()?));
            }
            Long("seed") => {
                cli_args.random_seed = Some(args.value()?.parse()?);
            }
            Long("weeks") | Short('w') => {
                cli_args.weeks = Some(args.value()?.parse()?);
            }
            Long("manager") | Short('m') => {
                cli_args.manager = Some(args.value()?.string()?);
            }
            Long("csv") => {
                cli_args.csv_file = Some(PathBuf::from(args.value()?));
            }
            Long("output") | Short('o') => {
                cli_args.output_file = Some(PathBuf::from(args.value()?));
            }
            Long("event-type") => {
                query_filters.event_type = Some(args.value()?.string()?);
            }
            Long("week-range") => {
                let range_str = args.value()?.string()?;
                match range_str.split_once('-') {
                    Some((start, end)) => match (start.parse::<u32>(), end.parse::<u32>()) {
                        (Ok(s), Ok(e)) => query_filters.week_range = Some((s, e)),
                        _ => return Err(lexopt::Error::from("Invalid week range format")),
                    },
                    None => return Err(lexopt::Error::from("Invalid week range format")),
                }
            }
            Long("warnings") => query_filters.warnings_only = true,
            Long("verbose") | Short('v') => cli_args.verbose = true,
            Long("quiet") | Short('q') => cli_args.quiet = true,
            Long("help") | Short('h') => {
                cli_args.command = Command::Help;
                return Ok(cli_args);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    cli_args.command = match subcommand.as_deref() {
        Some("run") | None => Command::Run,
        Some("scenarios") => Command::Scenarios,
        Some("query") => match query_file {
            Some(file) => Command::Query {
                file,
                filters: query_filters,
            },
            None => return Err(lexopt::Error::from("query command requires a file")),
        },
        Some(cmd) => return Err(lexopt::Error::from(format!("unknown command: {}", cmd))),
    };

    Ok(cli_args)
}

/// Apply CLI overrides to a scenario.
pub fn apply_overrides(scenario: &mut Scenario, args: &CliArgs) {
    if let Some(seed) = args.random_seed {
        scenario.random_seed = Some(seed);
    }

    if let Some(ref key) = args.manager {
        scenario
            .script
            .insert(0, Action::SelectManager { key: key.clone() });
    }

    if let Some(weeks) = args.weeks {
        scenario.push(Action::EndTurn { count: weeks });
    }
}

pub fn print_help() {
    println!("\nFarm Simulation\n");
    println!("USAGE:");
    println!("    farm-sim [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    run              Play a scenario script (default)");
    println!("    scenarios        List built-in scenarios");
    println!("    query FILE       Filter a saved event log\n");

    println!("RUN OPTIONS:");
    println!("    --scenario <NAME>          Built-in scenario (default: basic)");
    println!("    --scenario-file <FILE>     Load scenario from JSON or YAML file");
    println!("    --seed <N>                 Random seed for reproducible prices");
    println!("    -w, --weeks <N>            Extra turns to play after the script");
    println!("    -m, --manager <KEY>        Hire a manager before the script (VM1, VM2, VFM1, VFM2)");
    println!("    --csv <FILE>               Export the final grid as CSV");
    println!("    -o, --output <FILE>        Save events as JSON\n");

    println!("QUERY OPTIONS:");
    println!("    --event-type <TYPE>        Filter by event type (e.g. feed_shortage)");
    println!("    --week-range <START-END>   Filter by week (e.g. 2-5)");
    println!("    --warnings                 Only warnings\n");

    println!("GENERAL:");
    println!("    -v, --verbose              Debug logging");
    println!("    -q, --quiet                Only warnings and errors");
    println!("    -h, --help                 Print help information\n");

    println!("EXAMPLES:");
    println!("    farm-sim run --scenario shortage --seed 7 -o events.json");
    println!("    farm-sim query events.json --event-type shortage");
}
