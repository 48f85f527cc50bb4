//! Compare an RTL simulation output stream against a golden test case
//!
//! Usage:
//!     cargo run --bin verify_results -- sim/rtl_output.txt sim/simple_temporal_conv.json
//!
//! Exits 0 iff every compared sample passed with zero error records. A
//! detailed text report is always written as a side artifact.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcn_verify::golden::load_case;
use tcn_verify::verify::load_trace;
use tcn_verify::Verifier;

/// Compare RTL simulation results with a golden reference
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RTL output file (.json or .txt)
    rtl_output: PathBuf,

    /// Golden reference file (.json)
    golden: PathBuf,

    /// Tolerance in LSBs
    #[arg(short, long, default_value_t = 2)]
    tolerance: u32,

    /// Where to write the detailed report
    #[arg(long, default_value = "verification_report.txt")]
    report: PathBuf,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tcn_verify=info".parse()?),
        )
        .init();

    let args = Args::parse();

    println!("=== RTL Verification ===\n");
    println!("RTL output file:       {}", args.rtl_output.display());
    println!("Golden reference file: {}", args.golden.display());
    println!("Tolerance:             {} LSB\n", args.tolerance);

    // Both loads must succeed before any comparison starts.
    let golden = load_case(&args.golden)
        .with_context(|| format!("failed to load golden case {}", args.golden.display()))?;
    let trace = load_trace(&args.rtl_output)
        .with_context(|| format!("failed to load RTL output {}", args.rtl_output.display()))?;

    println!("Case: {}", golden.name);
    println!("RTL samples: {}", trace.samples.len());

    let mut verifier = Verifier::new(args.tolerance, golden.fixed_point_config);
    let verdict = verifier.compare_case(&golden, &trace)?;

    std::fs::write(&args.report, verifier.report())
        .with_context(|| format!("failed to write report {}", args.report.display()))?;
    println!("\nDetailed report written to: {}", args.report.display());

    if verdict && verifier.passed() {
        println!("\nVERIFICATION PASSED");
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\nVERIFICATION FAILED ({} errors, {} warnings)",
            verifier.errors().len(),
            verifier.warnings().len()
        );
        Ok(ExitCode::FAILURE)
    }
}
