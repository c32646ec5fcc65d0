//! field-planner: plan field coverage for a machine fleet.
//!
//! ```text
//! field-planner plan request.json result.json [--csv-dir out/] [--config planner.json]
//! field-planner generate --fields 6 --machines 2 --seed 7 -o request.json
//! field-planner batch requests/ results/
//! ```

mod batch;
mod generate;
mod io;


use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fp_sim::Planner;

use generate::{GenerateArgs, LayoutKind};

#[derive(Parser)]
#[command(name = "field-planner")]
#[command(about = "Multi-machine field coverage planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Planner configuration overrides (JSON, partial)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one request.  On failure an error result is written and the
    /// exit status is 1.
    Plan {
        /// Request JSON
        input: PathBuf,
        /// Result JSON
        output: PathBuf,
        /// Also write CSV tables into this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,
        /// Also write an SQLite database into this directory
        #[cfg(feature = "sqlite")]
        #[arg(long)]
        sqlite_dir: Option<PathBuf>,
        /// Replace an invalid field layout with a generated grid layout
        #[arg(long)]
        fallback_layout: bool,
    },

    /// Generate a synthetic request.
    Generate {
        /// Number of fields
        #[arg(long, default_value = "4")]
        fields: usize,
        /// Number of machines
        #[arg(long, default_value = "2")]
        machines: u32,
        /// Layout: random or grid
        #[arg(long, value_enum, default_value = "random")]
        layout: LayoutKind,
        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Machine capacity in field-equivalents
        #[arg(long, default_value = "1.0")]
        capacity: f64,
        /// Resupply duration, seconds
        #[arg(long, default_value = "30")]
        supply_duration: f64,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plan every `*.json` request in a directory, in parallel.
    Batch {
        /// Directory of request JSON files
        dir: PathBuf,
        /// Directory for result JSON files (created if missing)
        out_dir: PathBuf,
        /// Also write CSV tables per request under `<out_dir>/<name>/`
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Planner from the optional `--config` file.
fn planner(config: Option<&Path>) -> Result<Planner> {
    let planner = Planner::new(io::load_config(config)?)?;
    info!(policy = planner.policy_name(), "planner ready");
    Ok(planner)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan {
            input,
            output,
            csv_dir,
            #[cfg(feature = "sqlite")]
            sqlite_dir,
            fallback_layout,
        } => {
            let tables = io::Tables {
                csv_dir,
                #[cfg(feature = "sqlite")]
                sqlite_dir,
            };
            plan(cli.config.as_deref(), &input, &output, &tables, fallback_layout)?;
        }

        Commands::Generate { fields, machines, layout, seed, capacity, supply_duration, output } => {
            let args = GenerateArgs { fields, machines, layout, seed, capacity, supply_duration };
            let request = generate::build_request(&args)?;
            match output {
                Some(path) => {
                    io::write_json(&path, &request)?;
                    info!(path = %path.display(), fields, "request written");
                }
                None => println!("{}", serde_json::to_string_pretty(&request)?),
            }
        }

        Commands::Batch { dir, out_dir, csv } => {
            batch::run(&planner(cli.config.as_deref())?, &dir, &out_dir, csv)?;
        }
    }
    Ok(())
}

/// The `plan` command.  Any failure, including a bad config, leaves an
/// error result at `output`.
fn plan(config: Option<&Path>, input: &Path, output: &Path, tables: &io::Tables, fallback_layout: bool) -> Result<()> {
    let planned = planner(config).and_then(|p| io::plan_file(&p, input, output, tables, fallback_layout));
    if let Err(e) = planned {
        io::write_error_result(output, &e)?;
        return Err(e);
    }
    Ok(())
}
