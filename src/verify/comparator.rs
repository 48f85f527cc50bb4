//! Tolerance-based comparison and verification state

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::fixed::FixedPointFormat;
use crate::golden::{GoldenCase, StreamingSample};

use super::rtl::{RtlSample, RtlTrace};

/// Errors shown in full detail before the report truncates
const MAX_REPORTED_ERRORS: usize = 100;

/// One recorded comparison failure
///
/// A closed set: every consumer handles both kinds. Records are created
/// only during comparison and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorRecord {
    /// RTL and golden vectors disagree on length; structural, reported
    /// separately from numeric mismatches
    DimensionMismatch { rtl_len: usize, golden_len: usize },
    /// A decoded value pair differs by more than the tolerance
    ToleranceExceeded {
        channel: usize,
        sample: usize,
        rtl_fixed: i64,
        golden_fixed: i64,
        rtl_float: f64,
        golden_float: f64,
        diff_lsb: f64,
    },
}

/// Outcome of a single scalar comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarComparison {
    pub passed: bool,
    pub diff_lsb: f64,
    pub rtl_float: f64,
    pub golden_float: f64,
}

/// Accumulating comparator for one verification run
///
/// State grows monotonically across repeated comparisons so that many
/// cases feed one aggregate report. Create a fresh verifier per
/// independent run; there is no reset.
#[derive(Debug, Clone)]
pub struct Verifier {
    tolerance_lsb: u32,
    format: FixedPointFormat,
    errors: Vec<ErrorRecord>,
    warnings: Vec<String>,
}

impl Verifier {
    /// Create a verifier with a tolerance in LSBs for the given format
    pub fn new(tolerance_lsb: u32, format: FixedPointFormat) -> Self {
        Self {
            tolerance_lsb,
            format,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Tolerance in LSBs
    pub fn tolerance_lsb(&self) -> u32 {
        self.tolerance_lsb
    }

    /// Recorded comparison failures so far
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Recorded warnings so far
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True iff no error record has been accumulated
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Compare one fixed-point value pair
    ///
    /// Both values are decoded through the configured format;
    /// `diff_lsb = |rtl - golden| / 2^-frac_bits` and the comparison
    /// passes iff `diff_lsb <= tolerance` (the boundary is inclusive). A
    /// failing comparison appends a [`ErrorRecord::ToleranceExceeded`];
    /// this never returns an error.
    pub fn compare_scalar(
        &mut self,
        rtl_raw: i64,
        golden_raw: i64,
        channel: usize,
        sample: usize,
    ) -> ScalarComparison {
        let rtl_float = self.format.decode(rtl_raw);
        let golden_float = self.format.decode(golden_raw);
        let diff_lsb = (rtl_float - golden_float).abs() / self.format.lsb();
        let passed = diff_lsb <= f64::from(self.tolerance_lsb);

        if !passed {
            self.errors.push(ErrorRecord::ToleranceExceeded {
                channel,
                sample,
                rtl_fixed: rtl_raw,
                golden_fixed: golden_raw,
                rtl_float,
                golden_float,
                diff_lsb,
            });
        }

        ScalarComparison {
            passed,
            diff_lsb,
            rtl_float,
            golden_float,
        }
    }

    /// Compare two fixed-point vectors elementwise
    ///
    /// A length mismatch appends a single
    /// [`ErrorRecord::DimensionMismatch`] and fails immediately, without
    /// producing any per-element records.
    pub fn compare_vector(&mut self, rtl: &[i64], golden: &[i64], sample: usize) -> bool {
        if rtl.len() != golden.len() {
            self.errors.push(ErrorRecord::DimensionMismatch {
                rtl_len: rtl.len(),
                golden_len: golden.len(),
            });
            return false;
        }

        let mut all_passed = true;
        for (channel, (&r, &g)) in rtl.iter().zip(golden.iter()).enumerate() {
            all_passed &= self.compare_scalar(r, g, channel, sample).passed;
        }
        all_passed
    }

    /// Align RTL samples to golden samples and compare them all
    ///
    /// Alignment is a two-step lookup per RTL sample: first an exact
    /// `cycle` match, else the positional golden sample at the current
    /// comparison index. The fallback covers untagged hardware traces
    /// without a second code path at the call site. An RTL sample with no
    /// golden counterpart records a warning and is skipped. The verdict is
    /// the AND of every vector comparison.
    pub fn align_and_compare(
        &mut self,
        rtl_samples: &[RtlSample],
        golden_samples: &[StreamingSample],
    ) -> bool {
        let mut all_passed = true;
        let mut compared = 0usize;

        for rtl_sample in rtl_samples {
            let golden = golden_samples
                .iter()
                .find(|g| g.cycle == rtl_sample.cycle)
                .or_else(|| golden_samples.get(compared));

            let Some(golden) = golden else {
                warn!(cycle = rtl_sample.cycle, "no golden sample for RTL sample");
                self.warnings.push(format!(
                    "missing golden sample for RTL cycle {}",
                    rtl_sample.cycle
                ));
                continue;
            };

            all_passed &=
                self.compare_vector(&rtl_sample.output, &golden.expected_output_fixed, compared);
            compared += 1;
        }

        all_passed
    }

    /// Compare a full golden case against a hardware trace
    ///
    /// Streaming cases compare against their per-cycle samples; other
    /// cases compare against samples synthesized from the output tensor.
    /// An empty trace fails the case with a warning: a simulation that
    /// produced nothing is not a pass.
    pub fn compare_case(&mut self, case: &GoldenCase, trace: &RtlTrace) -> Result<bool> {
        let golden_samples = case.golden_samples()?;

        if trace.samples.is_empty() {
            self.warnings
                .push(format!("RTL trace for case '{}' contains no samples", case.name));
            return Ok(false);
        }

        Ok(self.align_and_compare(&trace.samples, &golden_samples))
    }

    /// Render the verification report
    ///
    /// A pure projection of accumulated state; calling it repeatedly or
    /// between comparisons is fine.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(70);
        let thin = "-".repeat(70);

        out.push_str(&format!("{rule}\nVERIFICATION REPORT\n{rule}\n\n"));
        out.push_str(&format!("Total errors: {}\n", self.errors.len()));
        out.push_str(&format!("Total warnings: {}\n", self.warnings.len()));
        out.push_str(&format!("Tolerance: {} LSB\n\n", self.tolerance_lsb));

        if !self.errors.is_empty() {
            out.push_str(&format!("{thin}\nERROR DETAILS:\n{thin}\n"));

            let hex_digits = (self.format.total_bits as usize + 3) / 4;
            for (idx, err) in self.errors.iter().take(MAX_REPORTED_ERRORS).enumerate() {
                match err {
                    ErrorRecord::DimensionMismatch { rtl_len, golden_len } => {
                        out.push_str(&format!(
                            "\n{}. Dimension mismatch: RTL length {}, golden length {}\n",
                            idx + 1,
                            rtl_len,
                            golden_len
                        ));
                    }
                    ErrorRecord::ToleranceExceeded {
                        channel,
                        sample,
                        rtl_fixed,
                        golden_fixed,
                        rtl_float,
                        golden_float,
                        diff_lsb,
                    } => {
                        out.push_str(&format!("\n{}. Sample {sample}, Channel {channel}:\n", idx + 1));
                        out.push_str(&format!(
                            "   RTL:    {rtl_float:.6} (0x{:0width$x})\n",
                            self.format.to_bits(*rtl_fixed),
                            width = hex_digits
                        ));
                        out.push_str(&format!(
                            "   Golden: {golden_float:.6} (0x{:0width$x})\n",
                            self.format.to_bits(*golden_fixed),
                            width = hex_digits
                        ));
                        out.push_str(&format!(
                            "   Diff:   {:.6} ({diff_lsb:.2} LSB)\n",
                            diff_lsb * self.format.lsb()
                        ));
                    }
                }
            }

            if self.errors.len() > MAX_REPORTED_ERRORS {
                out.push_str(&format!(
                    "\n... and {} more errors\n",
                    self.errors.len() - MAX_REPORTED_ERRORS
                ));
            }
        }

        if !self.warnings.is_empty() {
            out.push_str(&format!("\n{thin}\nWARNINGS:\n{thin}\n"));
            for (idx, warning) in self.warnings.iter().enumerate() {
                out.push_str(&format!("{}. {warning}\n", idx + 1));
            }
        }

        out
    }
}
