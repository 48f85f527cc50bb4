//! Golden test-vector generation and persistence
//!
//! A golden case is the trusted expected output of the reference
//! convolution, serialized together with its configuration and fixed-point
//! format. The JSON files written here are consumed both by the hardware
//! testbench and by the result comparator.

mod suite;
mod types;

pub use suite::TestVectorSuite;
pub use types::{
    BasicCaseConfig, CaseConfig, ConvCaseConfig, GoldenCase, LayerRecord, StreamingSample,
    TcnBlockConfig, TestManifest,
};

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::fixed::FixedPointFormat;

/// Save one case as pretty-printed JSON under `dir`, named `<name>.json`
pub fn save_case(case: &GoldenCase, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", case.name));
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, case)?;
    info!(path = %path.display(), "saved golden case");
    Ok(path)
}

/// Load a golden case from a JSON file
///
/// A missing or malformed file is fatal to the verification run; it is
/// surfaced as an error here, never as a recorded comparison failure.
pub fn load_case(path: &Path) -> Result<GoldenCase> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Write the `test_config.json` manifest listing the generated cases
pub fn write_manifest(
    cases: &[GoldenCase],
    format: FixedPointFormat,
    dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let manifest = TestManifest {
        fixed_point: format,
        test_cases: cases.iter().map(|c| c.name.clone()).collect(),
    };
    let path = dir.join("test_config.json");
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, &manifest)?;
    Ok(path)
}
