//! SystemVerilog include-file emission
//!
//! String templating over already-computed fixed-point values: test
//! parameters for the testbench and packed weight arrays for TCN block
//! layers. Nothing here computes; the numbers come from the golden module.

use crate::fixed::FixedPointFormat;
use crate::golden::{GoldenCase, LayerRecord};

/// Render `test_params.svh` with the fixed-point configuration and the
/// integer parameters of every case
pub fn test_params_header(cases: &[GoldenCase], format: FixedPointFormat) -> String {
    let mut out = String::new();

    out.push_str("// Auto-generated test vector parameters\n\n");
    out.push_str("`ifndef TEST_PARAMS_SVH\n`define TEST_PARAMS_SVH\n\n");
    out.push_str("// Fixed-point configuration\n");
    out.push_str(&format!(
        "parameter int FIXED_TOTAL_BITS = {};\n",
        format.total_bits
    ));
    out.push_str(&format!(
        "parameter int FIXED_FRAC_BITS = {};\n",
        format.frac_bits
    ));

    for case in cases {
        out.push_str(&format!("\n// {} parameters\n", case.name.to_uppercase()));
        let prefix = case.name.to_uppercase();
        for (key, value) in case.config.int_params() {
            out.push_str(&format!("parameter int {prefix}_{key} = {value};\n"));
        }
    }

    out.push_str("\n`endif // TEST_PARAMS_SVH\n");
    out
}

/// Render packed kernel and bias parameter arrays for the layers of a TCN
/// block case
pub fn weights_header(case: &GoldenCase, format: FixedPointFormat) -> String {
    let mut out = String::new();

    out.push_str("// Auto-generated TCN block weights\n");
    out.push_str(&format!(
        "// Fixed-point format: Q{}.{}\n",
        format.total_bits - format.frac_bits,
        format.frac_bits
    ));

    for (idx, layer) in case.layers.iter().enumerate() {
        out.push_str(&layer_params(idx, layer, format));
    }

    out
}

fn layer_params(idx: usize, layer: &LayerRecord, format: FixedPointFormat) -> String {
    let mut out = String::new();
    let prefix = format!("L{idx}");
    let width = format.total_bits;
    let hex_digits = (width as usize + 3) / 4;

    let kernel_size = layer.kernel_fixed.len();
    let in_channels = layer.kernel_fixed.first().map_or(0, |p| p.len());
    let out_channels = layer
        .kernel_fixed
        .first()
        .and_then(|p| p.first())
        .map_or(0, |r| r.len());

    out.push_str(&format!("\n// Layer {idx}: dilation {}\n", layer.dilation));
    out.push_str(&format!(
        "parameter int {prefix}_KERNEL_SIZE = {kernel_size};\n"
    ));
    out.push_str(&format!(
        "parameter int {prefix}_IN_CHANNELS = {in_channels};\n"
    ));
    out.push_str(&format!(
        "parameter int {prefix}_OUT_CHANNELS = {out_channels};\n"
    ));

    out.push_str(&format!(
        "\nparameter logic [{}:0] {prefix}_KERNEL[0:{}][0:{}][0:{}] = '{{\n",
        width - 1,
        kernel_size.saturating_sub(1),
        in_channels.saturating_sub(1),
        out_channels.saturating_sub(1)
    ));
    for (k, plane) in layer.kernel_fixed.iter().enumerate() {
        out.push_str("  {\n");
        for (i, row) in plane.iter().enumerate() {
            out.push_str("    {");
            for (o, &value) in row.iter().enumerate() {
                out.push_str(&format!(
                    "{width}'h{:0hex_digits$x}",
                    format.to_bits(value)
                ));
                if o + 1 < row.len() {
                    out.push_str(", ");
                }
            }
            out.push('}');
            if i + 1 < plane.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("  }");
        if k + 1 < layer.kernel_fixed.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};\n");

    out.push_str(&format!(
        "\nparameter logic [{}:0] {prefix}_BIAS[0:{}] = '{{\n  ",
        width - 1,
        layer.bias_fixed.len().saturating_sub(1)
    ));
    for (b, &value) in layer.bias_fixed.iter().enumerate() {
        out.push_str(&format!(
            "{width}'h{:0hex_digits$x}",
            format.to_bits(value)
        ));
        if b + 1 < layer.bias_fixed.len() {
            out.push_str(", ");
            if (b + 1) % 8 == 0 {
                out.push_str("\n  ");
            }
        }
    }
    out.push_str("\n};\n");

    out
}
