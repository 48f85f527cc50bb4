//! Golden record types
//!
//! The serialized forms here are the external interface consumed by the
//! result comparator and by the hardware testbench. Field names follow the
//! JSON contract exactly.

use serde::{Deserialize, Serialize};

use crate::conv::Padding;
use crate::error::{Error, Result};
use crate::fixed::FixedPointFormat;

/// Parameters of a single-convolution case with explicit dilation/padding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvCaseConfig {
    pub seq_length: usize,
    pub input_channels: usize,
    pub output_channels: usize,
    pub kernel_size: usize,
    pub dilation_rate: usize,
    pub padding: Padding,
}

/// Parameters of a minimal case (quick smoke test, streaming)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicCaseConfig {
    pub seq_length: usize,
    pub input_channels: usize,
    pub output_channels: usize,
    pub kernel_size: usize,
}

/// Parameters of a multi-layer TCN block case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcnBlockConfig {
    pub depth: usize,
    pub kernel_size: usize,
    pub filters: usize,
    pub input_dimension: usize,
    pub seq_length: usize,
}

/// Per-case configuration
///
/// Serialized untagged: the JSON `config` object carries only the fields
/// of the concrete case kind. Variant order matters for deserialization;
/// the most field-rich shapes come first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseConfig {
    Conv(ConvCaseConfig),
    TcnBlock(TcnBlockConfig),
    Basic(BasicCaseConfig),
}

impl CaseConfig {
    /// Integer parameters of this configuration, for include-file emission
    pub fn int_params(&self) -> Vec<(&'static str, i64)> {
        match self {
            CaseConfig::Conv(c) => vec![
                ("SEQ_LENGTH", c.seq_length as i64),
                ("INPUT_CHANNELS", c.input_channels as i64),
                ("OUTPUT_CHANNELS", c.output_channels as i64),
                ("KERNEL_SIZE", c.kernel_size as i64),
                ("DILATION_RATE", c.dilation_rate as i64),
            ],
            CaseConfig::TcnBlock(c) => vec![
                ("DEPTH", c.depth as i64),
                ("KERNEL_SIZE", c.kernel_size as i64),
                ("FILTERS", c.filters as i64),
                ("INPUT_DIMENSION", c.input_dimension as i64),
                ("SEQ_LENGTH", c.seq_length as i64),
            ],
            CaseConfig::Basic(c) => vec![
                ("SEQ_LENGTH", c.seq_length as i64),
                ("INPUT_CHANNELS", c.input_channels as i64),
                ("OUTPUT_CHANNELS", c.output_channels as i64),
                ("KERNEL_SIZE", c.kernel_size as i64),
            ],
        }
    }
}

/// One expected step of a cycle-accurate hardware trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingSample {
    /// Cycle index, starting at zero
    pub cycle: u64,
    /// Fixed-point input vector presented at this cycle
    pub input_fixed: Vec<i64>,
    /// Fixed-point output vector expected at this cycle
    pub expected_output_fixed: Vec<i64>,
    /// True once the dilated kernel window is filled:
    /// `cycle >= (kernel_size - 1) * dilation`
    pub valid: bool,
}

/// Fixed-point checkpoint of one convolution layer inside a TCN block
///
/// Recorded per layer so the hardware can be checked layer by layer, not
/// only at the block output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Index of the convolution within its level (0 or 1)
    pub conv_idx: usize,
    /// Dilation of this layer
    pub dilation: usize,
    /// Shape `[T, C]` of the layer input
    pub input_shape: Vec<usize>,
    pub kernel_fixed: Vec<Vec<Vec<i64>>>,
    pub bias_fixed: Vec<i64>,
    pub output_fixed: Vec<Vec<i64>>,
}

/// A self-describing golden test case
///
/// Immutable after generation; regenerating with new parameters is the
/// only way to change one. Float tensors are carried where the case is
/// meant for hand inspection; the fixed tensors are the hardware contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenCase {
    pub name: String,
    pub config: CaseConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_float: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_float: Option<Vec<Vec<Vec<f64>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_float: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_float: Option<Vec<Vec<f64>>>,

    pub input_fixed: Vec<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_fixed: Option<Vec<Vec<Vec<i64>>>>,
    pub bias_fixed: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_fixed: Option<Vec<Vec<i64>>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streaming_samples: Vec<StreamingSample>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_output_fixed: Option<Vec<Vec<i64>>>,

    pub fixed_point_config: FixedPointFormat,
}

impl GoldenCase {
    /// Expected samples of this case, one per output row
    ///
    /// Streaming cases carry their samples directly. Other cases
    /// synthesize one always-valid sample per row of the output tensor
    /// (the block-final output for TCN block cases), with the row index as
    /// the cycle.
    pub fn golden_samples(&self) -> Result<Vec<StreamingSample>> {
        if !self.streaming_samples.is_empty() {
            return Ok(self.streaming_samples.clone());
        }
        let rows = self
            .output_fixed
            .as_ref()
            .or(self.final_output_fixed.as_ref())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "golden case '{}' carries neither streaming samples nor an output tensor",
                    self.name
                ))
            })?;
        Ok(rows
            .iter()
            .enumerate()
            .map(|(t, row)| StreamingSample {
                cycle: t as u64,
                input_fixed: Vec::new(),
                expected_output_fixed: row.clone(),
                valid: true,
            })
            .collect())
    }
}

/// Manifest written next to the generated cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestManifest {
    pub fixed_point: FixedPointFormat,
    pub test_cases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip_untagged() {
        let conv = CaseConfig::Conv(ConvCaseConfig {
            seq_length: 16,
            input_channels: 32,
            output_channels: 32,
            kernel_size: 4,
            dilation_rate: 1,
            padding: Padding::Causal,
        });
        let json = serde_json::to_string(&conv).unwrap();
        assert!(json.contains("\"causal\""));
        let back: CaseConfig = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, CaseConfig::Conv(_)));

        let block = CaseConfig::TcnBlock(TcnBlockConfig {
            depth: 2,
            kernel_size: 4,
            filters: 32,
            input_dimension: 32,
            seq_length: 32,
        });
        let json = serde_json::to_string(&block).unwrap();
        let back: CaseConfig = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, CaseConfig::TcnBlock(_)));

        let basic = CaseConfig::Basic(BasicCaseConfig {
            seq_length: 8,
            input_channels: 4,
            output_channels: 4,
            kernel_size: 3,
        });
        let json = serde_json::to_string(&basic).unwrap();
        let back: CaseConfig = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, CaseConfig::Basic(_)));
    }

    #[test]
    fn test_golden_samples_synthesized_from_output() {
        let case = GoldenCase {
            name: "t".into(),
            config: CaseConfig::Basic(BasicCaseConfig {
                seq_length: 2,
                input_channels: 1,
                output_channels: 2,
                kernel_size: 1,
            }),
            input_float: None,
            kernel_float: None,
            bias_float: None,
            output_float: None,
            input_fixed: vec![vec![1], vec![2]],
            kernel_fixed: None,
            bias_fixed: None,
            output_fixed: Some(vec![vec![10, 11], vec![20, 21]]),
            streaming_samples: Vec::new(),
            layers: Vec::new(),
            final_output_fixed: None,
            fixed_point_config: FixedPointFormat::Q8_8,
        };
        let samples = case.golden_samples().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].cycle, 0);
        assert!(samples[1].valid);
        assert_eq!(samples[1].expected_output_fixed, vec![20, 21]);
    }
}
