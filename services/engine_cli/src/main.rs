//! Launch engine command-line entry point
//!
//! Every subcommand reads one JSON document (a file path or `-` for stdin)
//! and writes one JSON document to stdout. Logs go to stderr.

mod commands;
mod io;
mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use launch_config::EngineConfig;
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "launch-engine")]
#[command(author, version, about = "Off-chain pricing, vesting, merkle and claim computations")]
struct Cli {
    /// Base configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment overlay from config/environments/<ENV>.toml
    #[arg(short, long, global = true)]
    env: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote a swap against a pool row
    Quote {
        #[command(flatten)]
        input: InputArg,
        /// Treat the amount as the desired output instead of the input
        #[arg(long)]
        exact_output: bool,
    },
    /// Vesting status for an allocation at a point in time
    Vesting {
        #[command(flatten)]
        input: InputArg,
        /// Include the full unlock timeline
        #[arg(long)]
        timeline: bool,
    },
    /// Build an allocation tree with proofs
    MerkleBuild(InputArg),
    /// Check one allocation proof against a root
    MerkleVerify(InputArg),
    /// Decide a claim and issue an authorization
    Claim(InputArg),
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
struct InputArg {
    /// JSON input file, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EngineConfig::load(cli.config.as_deref(), cli.env.as_deref())
        .context("Failed to load engine configuration")?;
    logging::init(&config.logging, cli.json_logs)?;
    debug!(?config, "Starting launch-engine");

    let output = match cli.command {
        Command::Quote {
            input,
            exact_output,
        } => io::to_json(&commands::quote(
            io::read_input(&input.input)?,
            exact_output,
            &config,
        )?)?,
        Command::Vesting { input, timeline } => {
            io::to_json(&commands::vesting(io::read_input(&input.input)?, timeline)?)?
        }
        Command::MerkleBuild(input) => {
            io::to_json(&commands::merkle_build(io::read_input(&input.input)?)?)?
        }
        Command::MerkleVerify(input) => {
            io::to_json(&commands::merkle_verify(io::read_input(&input.input)?))?
        }
        Command::Claim(input) => {
            io::to_json(&commands::claim(io::read_input(&input.input)?, &config)?)?
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
    };

    io::write_output(&output, cli.pretty)
}
