//! Generate golden test vectors for TCN hardware verification
//!
//! Usage:
//!     cargo run --bin generate_vectors -- --output sim --seed 42

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcn_verify::golden::{save_case, write_manifest, TestVectorSuite};
use tcn_verify::svh;
use tcn_verify::FixedPointFormat;

/// Generate golden test vectors for TCN hardware verification
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory for golden artifacts
    #[arg(short, long, default_value = "sim")]
    output: PathBuf,

    /// Seed for the random test data
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Total fixed-point width in bits
    #[arg(long, default_value_t = 16)]
    total_bits: u32,

    /// Fractional bits
    #[arg(long, default_value_t = 8)]
    frac_bits: u32,

    /// Sequence length of the simple case
    #[arg(long, default_value_t = 16)]
    seq_length: usize,

    /// Channel count of the simple and streaming cases
    #[arg(long, default_value_t = 32)]
    channels: usize,

    /// Kernel size of every generated case
    #[arg(long, default_value_t = 4)]
    kernel_size: usize,

    /// Depth (number of dilation levels) of the TCN block case
    #[arg(long, default_value_t = 2)]
    depth: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tcn_verify=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let format = FixedPointFormat::new(args.total_bits, args.frac_bits);
    let suite = TestVectorSuite::new(format);
    let mut rng = StdRng::seed_from_u64(args.seed);

    println!("=== TCN Test Vector Generator ===\n");
    println!(
        "Fixed-point format: Q{}.{}",
        format.total_bits - format.frac_bits,
        format.frac_bits
    );
    println!("Seed: {}\n", args.seed);

    println!("[1/4] Generating simple test case...");
    let simple = suite.simple_case(
        args.seq_length,
        args.channels,
        args.kernel_size,
        args.channels,
        1,
    )?;

    println!("[2/4] Generating quick test case...");
    let quick = suite.quick_case(8, 4, 3, 4)?;

    println!("[3/4] Generating streaming test case...");
    let streaming = suite.streaming_case(
        &mut rng,
        2 * args.seq_length,
        args.channels,
        args.kernel_size,
        args.channels,
    )?;

    println!("[4/4] Generating TCN block test case...");
    let tcn_block = suite.tcn_block_case(
        &mut rng,
        args.depth,
        args.kernel_size,
        args.channels,
        args.channels,
        2 * args.seq_length,
    )?;

    let cases = [simple, quick, streaming, tcn_block];
    for case in &cases {
        let path = save_case(case, &args.output)?;
        println!("  saved {}", path.display());
    }
    let manifest = write_manifest(&cases, format, &args.output)?;
    println!("  saved {}", manifest.display());

    let params_path = args.output.join("test_params.svh");
    std::fs::write(&params_path, svh::test_params_header(&cases, format))?;
    println!("  saved {}", params_path.display());

    let weights_path = args.output.join("tcn_block_weights.svh");
    std::fs::write(&weights_path, svh::weights_header(&cases[3], format))?;
    println!("  saved {}", weights_path.display());

    println!("\nGenerated {} test cases:", cases.len());
    for case in &cases {
        println!("  - {}", case.name);
    }

    Ok(())
}
