mod analysis;
mod conditions;
mod report;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trussopt::{OptimizerConfig, TrussProblem};

use analysis::{run_analysis, run_search};
use conditions::{apply_three_bar_conditions, build_three_bar_truss};
use report::{render_search, render_summary};

#[derive(Parser)]
#[command(name = "trussopt")]
#[command(about = "Equilibrium analysis and topology search for 2D trusses")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a truss for member tensions and support reactions
    Analyze {
        /// JSON problem file; the three-bar demonstration truss when omitted
        #[arg(long)]
        problem: Option<PathBuf>,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search for a low-force truss between two supports and a loaded point
    Optimize {
        /// TOML optimizer configuration; defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of optimizer ticks to run
        #[arg(long, default_value_t = 5000)]
        ticks: u64,
        /// Overrides the seed from the configuration
        #[arg(long)]
        seed: Option<u64>,
        /// Print the best layout as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cmd = Cmd::parse();
    match cmd.action {
        Action::Analyze { problem, json } => analyze(problem, json),
        Action::Optimize {
            config,
            ticks,
            seed,
            json,
        } => optimize(config, ticks, seed, json),
    }
}

fn analyze(path: Option<PathBuf>, json: bool) -> Result<(), Box<dyn Error>> {
    let problem = match path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str::<TrussProblem>(&content)?
        }
        None => {
            // Right triangle pinned at the origin, rolling at (1, 0), pushed sideways at the apex.
            let (mut truss, geometry) = build_three_bar_truss()?;
            apply_three_bar_conditions(&mut truss, &geometry)?;
            truss.to_problem()
        }
    };

    let summary = run_analysis(problem)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

fn optimize(
    path: Option<PathBuf>,
    ticks: u64,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut config = match path {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    tracing::info!(ticks, seed = ?config.seed, fitness = ?config.fitness, "starting search");

    let summary = run_search(config, ticks)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_search(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn every_argument_has_help() {
        let command = Cmd::command();
        command.clone().debug_assert();
        for subcommand in command.get_subcommands() {
            for arg in subcommand.get_arguments() {
                assert!(
                    arg.get_help().is_some(),
                    "{} --{} has no help",
                    subcommand.get_name(),
                    arg.get_id()
                );
            }
        }
    }

    #[test]
    fn optimize_defaults_to_five_thousand_ticks() {
        let cmd = Cmd::try_parse_from(["trussopt", "optimize", "--seed", "4"]).expect("valid args");
        match cmd.action {
            Action::Optimize {
                ticks, seed, json, ..
            } => {
                assert_eq!(ticks, 5000);
                assert_eq!(seed, Some(4));
                assert!(!json);
            }
            Action::Analyze { .. } => panic!("parsed the wrong subcommand"),
        }
    }
}
