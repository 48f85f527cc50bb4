//! # TCN Verify
//!
//! Golden reference generation and result checking for hardware
//! implementations of dilated causal 1-D convolution networks (temporal
//! convolutional networks).
//!
//! ## Overview
//!
//! The crate computes trusted expected outputs for a set of convolution
//! test cases, serializes them as fixed-point golden records, and checks a
//! hardware simulation's output stream against them with an LSB tolerance.
//! The numeric rules (rounding, wraparound, sign extension, padding,
//! alignment, tolerance) are the contract the hardware must satisfy.
//!
//! ## Modules
//!
//! - `fixed` - fixed-point encode/decode with hardware semantics
//! - `conv` - dilated causal convolution reference operator
//! - `golden` - test-vector suite, golden records, persistence
//! - `verify` - RTL trace loading, tolerance comparison, reporting
//! - `svh` - SystemVerilog include-file emission
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tcn_verify::prelude::*;
//!
//! fn main() -> tcn_verify::error::Result<()> {
//!     let format = FixedPointFormat::Q8_8;
//!     let suite = TestVectorSuite::new(format);
//!
//!     // Golden case for a 16-step, 8-channel causal convolution
//!     let case = suite.simple_case(16, 8, 4, 8, 1)?;
//!
//!     // Check the golden output against itself: always passes
//!     let trace = RtlTrace {
//!         samples: case
//!             .output_fixed
//!             .as_ref()
//!             .unwrap()
//!             .iter()
//!             .enumerate()
//!             .map(|(t, row)| RtlSample { cycle: t as u64, output: row.clone() })
//!             .collect(),
//!     };
//!
//!     let mut verifier = Verifier::new(0, format);
//!     let passed = verifier.compare_case(&case, &trace)?;
//!     assert!(passed && verifier.passed());
//!
//!     // Streaming cases draw their data from an explicit seeded source
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let _streaming = suite.streaming_case(&mut rng, 32, 8, 4, 8)?;
//!     Ok(())
//! }
//! ```

pub mod conv;
pub mod error;
pub mod fixed;
pub mod golden;
pub mod svh;
pub mod verify;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::conv::{elu, DilatedConv1d, Padding};
    pub use crate::error::{Error, Result};
    pub use crate::fixed::FixedPointFormat;
    pub use crate::golden::{
        load_case, save_case, write_manifest, CaseConfig, GoldenCase, LayerRecord,
        StreamingSample, TestVectorSuite,
    };
    pub use crate::verify::{
        load_trace, ErrorRecord, RtlSample, RtlTrace, ScalarComparison, Verifier,
    };
}

// Re-export main types at crate root for convenience
pub use fixed::FixedPointFormat;
pub use golden::TestVectorSuite;
pub use verify::Verifier;
