//! Result comparison against golden references
//!
//! Loads an externally produced hardware output stream, aligns it to a
//! golden case, applies an LSB tolerance comparison, and renders a report.
//! The protocol of a run is strict: load the golden case, load the
//! hardware trace (either load failing aborts the run), then compare one
//! or more cases, then report. Mismatches found while comparing are
//! accumulated, never thrown, so a single run surfaces every error.

mod comparator;
mod rtl;

pub use comparator::{ErrorRecord, ScalarComparison, Verifier};
pub use rtl::{load_trace, parse_text_trace, RtlSample, RtlTrace};
