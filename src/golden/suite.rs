//! Test Vector Suite
//!
//! Builds the concrete golden cases checked against the hardware: a simple
//! ramp/averaging case, a minimal identity smoke case, a cycle-accurate
//! streaming case, and a multi-layer TCN block with activations and a
//! residual connection.
//!
//! All randomness is drawn from a caller-provided seeded generator, so two
//! runs with the same seed produce identical golden artifacts. That is a
//! correctness requirement for regression-testing the hardware across
//! design iterations, not a style preference.

use ndarray::{Array1, Array2, Array3};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::info;

use crate::conv::{elu, DilatedConv1d, Padding};
use crate::error::Result;
use crate::fixed::FixedPointFormat;

use super::types::{
    BasicCaseConfig, CaseConfig, ConvCaseConfig, GoldenCase, LayerRecord, StreamingSample,
    TcnBlockConfig,
};

/// Golden test-case generator for one fixed-point format
#[derive(Debug, Clone, Copy)]
pub struct TestVectorSuite {
    format: FixedPointFormat,
}

impl TestVectorSuite {
    /// Create a suite emitting vectors in the given fixed-point format
    pub fn new(format: FixedPointFormat) -> Self {
        Self { format }
    }

    /// Fixed-point format used for emitted vectors
    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Deterministic single-layer case with a ramp input
    ///
    /// Input is `input[t, c] = (t * in_channels + c) * 0.01`; the kernel is
    /// a per-channel averaging diagonal, `kernel[k, i, i] = 1/kernel_size`
    /// for `i < min(in_channels, out_channels)`, zero elsewhere; bias is
    /// zero. Causal padding. Emits float and fixed forms of every tensor.
    pub fn simple_case(
        &self,
        seq_length: usize,
        in_channels: usize,
        kernel_size: usize,
        out_channels: usize,
        dilation: usize,
    ) -> Result<GoldenCase> {
        let input = Array2::from_shape_fn((seq_length, in_channels), |(t, c)| {
            (t * in_channels + c) as f64 * 0.01
        });

        let mut kernel = Array3::zeros((kernel_size, in_channels, out_channels));
        for k in 0..kernel_size {
            for i in 0..in_channels.min(out_channels) {
                kernel[[k, i, i]] = 1.0 / kernel_size as f64;
            }
        }
        let bias = Array1::zeros(out_channels);

        let conv =
            DilatedConv1d::new(kernel.clone(), Some(bias.clone()), dilation, Padding::Causal)?;
        let output = conv.forward(&input)?;

        info!(
            seq_length,
            in_channels, out_channels, kernel_size, dilation, "generated simple case"
        );

        Ok(GoldenCase {
            name: "simple_temporal_conv".to_string(),
            config: CaseConfig::Conv(ConvCaseConfig {
                seq_length,
                input_channels: in_channels,
                output_channels: out_channels,
                kernel_size,
                dilation_rate: dilation,
                padding: Padding::Causal,
            }),
            input_float: Some(rows(&input)),
            kernel_float: Some(cube(&kernel)),
            bias_float: Some(bias.to_vec()),
            output_float: Some(rows(&output)),
            input_fixed: self.format.encode_array2(&input),
            kernel_fixed: Some(self.format.encode_array3(&kernel)),
            bias_fixed: Some(self.format.encode_array1(&bias)),
            output_fixed: Some(self.format.encode_array2(&output)),
            streaming_samples: Vec::new(),
            layers: Vec::new(),
            final_output_fixed: None,
            fixed_point_config: self.format,
        })
    }

    /// Minimal smoke case: counting input through a single-tap identity
    /// kernel
    ///
    /// `input[t, c] = (t + c) * 0.1` and only `kernel[0, i, i] = 1.0`, so
    /// the expected output equals the input sample for sample. Useful as
    /// the first case to run against new hardware.
    pub fn quick_case(
        &self,
        seq_length: usize,
        in_channels: usize,
        kernel_size: usize,
        out_channels: usize,
    ) -> Result<GoldenCase> {
        let input =
            Array2::from_shape_fn((seq_length, in_channels), |(t, c)| (t + c) as f64 * 0.1);

        let mut kernel = Array3::zeros((kernel_size, in_channels, out_channels));
        for i in 0..in_channels.min(out_channels) {
            kernel[[0, i, i]] = 1.0;
        }

        let conv = DilatedConv1d::new(kernel.clone(), None, 1, Padding::Causal)?;
        let output = conv.forward(&input)?;

        info!(seq_length, in_channels, "generated quick case");

        Ok(GoldenCase {
            name: "quick_test".to_string(),
            config: CaseConfig::Basic(BasicCaseConfig {
                seq_length,
                input_channels: in_channels,
                output_channels: out_channels,
                kernel_size,
            }),
            input_float: Some(rows(&input)),
            kernel_float: Some(cube(&kernel)),
            bias_float: None,
            output_float: Some(rows(&output)),
            input_fixed: self.format.encode_array2(&input),
            kernel_fixed: Some(self.format.encode_array3(&kernel)),
            bias_fixed: None,
            output_fixed: Some(self.format.encode_array2(&output)),
            streaming_samples: Vec::new(),
            layers: Vec::new(),
            final_output_fixed: None,
            fixed_point_config: self.format,
        })
    }

    /// Streaming case: one golden sample per cycle
    ///
    /// Generates a random dilation-1 causal convolution, then explodes the
    /// result into an ordered sequence of [`StreamingSample`] records
    /// carrying the per-cycle input and expected output. A sample is valid
    /// once the kernel window has filled, i.e. from cycle
    /// `(kernel_size - 1) * dilation` on.
    pub fn streaming_case(
        &self,
        rng: &mut StdRng,
        seq_length: usize,
        in_channels: usize,
        kernel_size: usize,
        out_channels: usize,
    ) -> Result<GoldenCase> {
        let input = randn2(rng, seq_length, in_channels, 0.1);
        let kernel = randn3(rng, kernel_size, in_channels, out_channels, 0.1);
        let bias = Array1::zeros(out_channels);

        let conv = DilatedConv1d::new(kernel.clone(), Some(bias.clone()), 1, Padding::Causal)?;
        let output = conv.forward(&input)?;

        let warmup = (kernel_size - 1) * conv.dilation();
        let input_fixed = self.format.encode_array2(&input);
        let output_fixed = self.format.encode_array2(&output);

        let streaming_samples = (0..seq_length)
            .map(|t| StreamingSample {
                cycle: t as u64,
                input_fixed: input_fixed[t].clone(),
                expected_output_fixed: output_fixed[t].clone(),
                valid: t >= warmup,
            })
            .collect();

        info!(seq_length, warmup, "generated streaming case");

        Ok(GoldenCase {
            name: "streaming_test".to_string(),
            config: CaseConfig::Basic(BasicCaseConfig {
                seq_length,
                input_channels: in_channels,
                output_channels: out_channels,
                kernel_size,
            }),
            input_float: None,
            kernel_float: None,
            bias_float: None,
            output_float: None,
            input_fixed,
            kernel_fixed: Some(self.format.encode_array3(&kernel)),
            bias_fixed: Some(self.format.encode_array1(&bias)),
            output_fixed: Some(output_fixed),
            streaming_samples,
            layers: Vec::new(),
            final_output_fixed: None,
            fixed_point_config: self.format,
        })
    }

    /// Multi-layer TCN block with ELU activations and a residual connection
    ///
    /// Builds `depth` levels of two causal convolutions each, at dilation
    /// `2^level`, every convolution followed by an elementwise ELU. After
    /// the first level only, if `input_dimension == filters`, the running
    /// output is added elementwise to the original input. Each convolution
    /// layer is recorded as a fixed-point checkpoint so the hardware can be
    /// verified layer by layer.
    pub fn tcn_block_case(
        &self,
        rng: &mut StdRng,
        depth: usize,
        kernel_size: usize,
        filters: usize,
        input_dimension: usize,
        seq_length: usize,
    ) -> Result<GoldenCase> {
        let input = randn2(rng, seq_length, input_dimension, 0.1);

        let mut layers = Vec::with_capacity(depth * 2);
        let mut current = input.clone();

        for level in 0..depth {
            let dilation = 1 << level;
            for conv_idx in 0..2 {
                let in_channels = current.dim().1;
                let kernel = randn3(rng, kernel_size, in_channels, filters, 0.1);
                let bias = randn1(rng, filters, 0.01);

                let conv = DilatedConv1d::new(
                    kernel.clone(),
                    Some(bias.clone()),
                    dilation,
                    Padding::Causal,
                )?;
                let output = elu(&conv.forward(&current)?);

                layers.push(LayerRecord {
                    conv_idx,
                    dilation,
                    input_shape: vec![current.dim().0, current.dim().1],
                    kernel_fixed: self.format.encode_array3(&kernel),
                    bias_fixed: self.format.encode_array1(&bias),
                    output_fixed: self.format.encode_array2(&output),
                });
                current = output;
            }

            // The residual join happens exactly once, at the first level
            // boundary, and only when the channel counts line up.
            if level == 0 && input_dimension == filters {
                current = current + &input;
            }
        }

        info!(depth, filters, layers = layers.len(), "generated TCN block case");

        Ok(GoldenCase {
            name: "tcn_block".to_string(),
            config: CaseConfig::TcnBlock(TcnBlockConfig {
                depth,
                kernel_size,
                filters,
                input_dimension,
                seq_length,
            }),
            input_float: None,
            kernel_float: None,
            bias_float: None,
            output_float: None,
            input_fixed: self.format.encode_array2(&input),
            kernel_fixed: None,
            bias_fixed: None,
            output_fixed: None,
            streaming_samples: Vec::new(),
            layers,
            final_output_fixed: Some(self.format.encode_array2(&current)),
            fixed_point_config: self.format,
        })
    }
}

fn rows(a: &Array2<f64>) -> Vec<Vec<f64>> {
    a.outer_iter().map(|row| row.to_vec()).collect()
}

fn cube(a: &Array3<f64>) -> Vec<Vec<Vec<f64>>> {
    a.outer_iter()
        .map(|plane| plane.outer_iter().map(|row| row.to_vec()).collect())
        .collect()
}

fn randn1(rng: &mut StdRng, n: usize, scale: f64) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| rng.sample::<f64, _>(StandardNormal) * scale)
}

fn randn2(rng: &mut StdRng, rows: usize, cols: usize, scale: f64) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |_| {
        rng.sample::<f64, _>(StandardNormal) * scale
    })
}

fn randn3(rng: &mut StdRng, d0: usize, d1: usize, d2: usize, scale: f64) -> Array3<f64> {
    Array3::from_shape_fn((d0, d1, d2), |_| {
        rng.sample::<f64, _>(StandardNormal) * scale
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_simple_case_ramp_and_shapes() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);
        let case = suite.simple_case(16, 32, 4, 32, 1).unwrap();

        assert_eq!(case.name, "simple_temporal_conv");
        assert_eq!(case.input_fixed.len(), 16);
        assert_eq!(case.input_fixed[0].len(), 32);
        // input[0][1] = 0.01 -> round(2.56) = 3
        assert_eq!(case.input_fixed[0][1], 3);
        let output = case.output_fixed.as_ref().unwrap();
        assert_eq!(output.len(), 16);
        assert_eq!(output[0].len(), 32);
    }

    #[test]
    fn test_quick_case_is_identity() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);
        let case = suite.quick_case(8, 4, 3, 4).unwrap();

        assert_eq!(case.output_float, case.input_float);
        assert_eq!(case.output_fixed.as_ref().unwrap(), &case.input_fixed);
    }

    #[test]
    fn test_streaming_validity_boundary() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);
        let mut rng = StdRng::seed_from_u64(7);
        let case = suite.streaming_case(&mut rng, 32, 8, 4, 8).unwrap();

        assert_eq!(case.streaming_samples.len(), 32);
        // dilation 1, kernel 4: warmup ends at cycle 3
        assert!(!case.streaming_samples[2].valid);
        assert!(case.streaming_samples[3].valid);
        for (t, sample) in case.streaming_samples.iter().enumerate() {
            assert_eq!(sample.cycle, t as u64);
            assert_eq!(sample.expected_output_fixed.len(), 8);
        }
    }

    #[test]
    fn test_streaming_case_deterministic_for_seed() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = suite.streaming_case(&mut rng_a, 16, 4, 3, 4).unwrap();
        let b = suite.streaming_case(&mut rng_b, 16, 4, 3, 4).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_tcn_block_layer_records() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);
        let mut rng = StdRng::seed_from_u64(3);
        let case = suite.tcn_block_case(&mut rng, 2, 4, 32, 32, 32).unwrap();

        // two convolutions per level
        assert_eq!(case.layers.len(), 4);
        let dilations: Vec<usize> = case.layers.iter().map(|l| l.dilation).collect();
        assert_eq!(dilations, vec![1, 1, 2, 2]);
        assert_eq!(case.layers[0].input_shape, vec![32, 32]);
        assert_eq!(case.final_output_fixed.as_ref().unwrap().len(), 32);
    }

    #[test]
    fn test_tcn_block_residual_requires_matching_dims() {
        let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);

        // With matching dims the residual join changes the block output;
        // regenerate with identical weights (same seed) but a different
        // input dimension and the level-0 output shape still holds.
        let mut rng = StdRng::seed_from_u64(11);
        let matched = suite.tcn_block_case(&mut rng, 1, 3, 8, 8, 16).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let unmatched = suite.tcn_block_case(&mut rng, 1, 3, 8, 4, 16).unwrap();

        assert_eq!(matched.layers.len(), 2);
        assert_eq!(unmatched.layers.len(), 2);
        assert_eq!(unmatched.layers[0].input_shape, vec![16, 4]);
    }
}
