//! End-to-End Test Runner for the launch engine

use anyhow::{bail, Context, Result};
use clap::Parser;
use launch_e2e_tests::{
    fixtures, PoolGraduation, TestFramework, TestResult, TestScenario, VestingClaimLifecycle,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Test scenario to run
    #[arg(short, long, default_value = "all")]
    scenario: String,

    /// Output results to file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("launch_e2e_tests={}", log_level).parse()?)
                .add_directive(format!("launch_claims={}", log_level).parse()?)
                .add_directive(format!("launch_merkle={}", log_level).parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting launch engine E2E suite");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let scenarios: Vec<Box<dyn TestScenario>> = match args.scenario.as_str() {
        "vesting" | "vesting_claim_lifecycle" => vec![
            Box::new(VestingClaimLifecycle::default()),
            Box::new(VestingClaimLifecycle {
                schedule: fixtures::monthly_schedule(),
            }),
        ],
        "pool" | "pool_graduation" => vec![Box::new(PoolGraduation::default())],
        "all" => launch_e2e_tests::all_scenarios(),
        other => bail!("Unknown test scenario: {}", other),
    };

    let framework = TestFramework::new();
    let results: Vec<TestResult> = scenarios
        .iter()
        .map(|scenario| framework.run_scenario(scenario.as_ref()))
        .collect();

    print_results_summary(&results);

    if let Some(output_path) = args.output {
        save_results_to_file(&results, &output_path)?;
        info!("Results saved to: {}", output_path.display());
    }

    if !results.iter().all(|r| r.passed) {
        error!("Some scenarios failed");
        std::process::exit(1);
    }

    info!("All scenarios passed");
    Ok(())
}

fn print_results_summary(results: &[TestResult]) {
    let passed = results.iter().filter(|r| r.passed).count();
    println!("Total: {}  Passed: {}  Failed: {}", results.len(), passed, results.len() - passed);

    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!(
            "{} {} ({} checks, {} ms)",
            status,
            result.scenario,
            result.checks.len(),
            result.duration_ms
        );
        if let Some(ref error) = result.error {
            println!("      Error: {}", error);
        }
    }
}

fn save_results_to_file(results: &[TestResult], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
