use farm_sim::cli::{self, CliArgs, Command};
use farm_sim::query::{format_query_results, query_events};
use farm_sim::scenario::{Scenario, ScenarioError, create_standard_scenarios};
use farm_sim::session::Session;
use log::{error, info};
use std::process;

fn init_logging(args: &CliArgs) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_scenario(args: &CliArgs) -> Result<Scenario, ScenarioError> {
    let mut scenario = match &args.scenario_file {
        Some(path) => Scenario::load_from_file(path)?,
        None => create_standard_scenarios()
            .remove(&args.scenario_name)
            .ok_or_else(|| ScenarioError::UnknownScenario(args.scenario_name.clone()))?,
    };
    cli::apply_overrides(&mut scenario, args);
    Ok(scenario)
}

fn run(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = load_scenario(args)?;
    let seed = scenario.random_seed.unwrap_or_else(rand::random);
    if !args.quiet {
        println!("{}", scenario);
    }

    let session = Session::from_scenario(&scenario, seed)?;

    if !args.quiet {
        println!("Message Log:");
        for message in session.messages() {
            println!("  {}", message);
        }
        println!();
    }
    println!("{}", session.summary());

    if let Some(path) = &args.csv_file {
        session.write_csv(path)?;
        info!("Grid exported to {}", path.display());
    }
    if let Some(path) = &args.output_file {
        session.events().save_to_file(path)?;
        info!("Events saved to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_help();
            process::exit(1);
        }
    };
    init_logging(&args);

    let result: Result<(), Box<dyn std::error::Error>> = match &args.command {
        Command::Help => {
            cli::print_help();
            Ok(())
        }
        Command::Scenarios => {
            let mut scenarios: Vec<_> = create_standard_scenarios().into_iter().collect();
            scenarios.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, scenario) in scenarios {
                println!("{:<10} {}", key, scenario.description);
            }
            Ok(())
        }
        Command::Query { file, filters } => query_events(file, filters)
            .map(|events| print!("{}", format_query_results(&events, args.verbose)))
            .map_err(Into::into),
        Command::Run => run(&args),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
