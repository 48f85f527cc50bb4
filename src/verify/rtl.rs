//! RTL output trace loading
//!
//! Two on-disk forms are accepted: a JSON file
//! `{"samples": [{"cycle": N, "output": [...]}, ...]}` or a line-oriented
//! text log where each contributing line looks like
//!
//! ```text
//! CYCLE: 12 VALID: 1 OUTPUT: 258,0x0100,-256
//! ```
//!
//! Only lines with `VALID: 1` contribute samples. Values are decimal, or
//! hexadecimal with a `0x` prefix.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One captured output sample of the hardware simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtlSample {
    pub cycle: u64,
    pub output: Vec<i64>,
}

/// A full hardware output stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RtlTrace {
    pub samples: Vec<RtlSample>,
}

/// Load an RTL trace, dispatching on the file extension
///
/// `.json` and `.txt` are supported; anything else (including waveform
/// dumps) must be converted first and is rejected as unsupported. Load
/// failures are fatal to the run.
pub fn load_trace(path: &Path) -> Result<RtlTrace> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(file)?)
        }
        Some("txt") => parse_text_trace(&std::fs::read_to_string(path)?),
        _ => Err(Error::UnsupportedFormat(format!(
            "unknown RTL trace format: {}",
            path.display()
        ))),
    }
}

/// Parse the line-oriented text trace format
///
/// Lines without an `OUTPUT:` token are ignored; lines with `VALID: 0`
/// are skipped. A contributing line with a missing `CYCLE:` token or a
/// malformed integer is a parse error.
pub fn parse_text_trace(text: &str) -> Result<RtlTrace> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if !line.contains("OUTPUT:") {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut cycle = None;
        let mut valid = false;
        let mut output = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let value = tokens.get(i + 1);
            match (*token, value) {
                ("CYCLE:", Some(&v)) => {
                    cycle = Some(v.parse::<u64>().map_err(|_| {
                        Error::TraceParse(format!("line {}: bad cycle '{v}'", line_no + 1))
                    })?);
                }
                ("VALID:", Some(&v)) => {
                    valid = parse_int(v, line_no)? == 1;
                }
                ("OUTPUT:", Some(&v)) => {
                    output = v
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(|s| parse_int(s, line_no))
                        .collect::<Result<Vec<i64>>>()?;
                }
                _ => {}
            }
        }

        if !valid {
            continue;
        }
        let cycle = cycle.ok_or_else(|| {
            Error::TraceParse(format!("line {}: missing CYCLE token", line_no + 1))
        })?;
        samples.push(RtlSample { cycle, output });
    }

    Ok(RtlTrace { samples })
}

fn parse_int(token: &str, line_no: usize) -> Result<i64> {
    let parsed = match token.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => token.parse(),
    };
    parsed.map_err(|_| {
        Error::TraceParse(format!(
            "line {}: invalid integer token '{token}'",
            line_no + 1
        ))
    })
}
