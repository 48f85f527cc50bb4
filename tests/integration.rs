//! Integration tests for golden generation and RTL verification

use rand::rngs::StdRng;
use rand::SeedableRng;
use tcn_verify::prelude::*;

/// Build an RTL trace echoing a golden case's output rows, cycle-tagged
fn trace_from_output(rows: &[Vec<i64>]) -> RtlTrace {
    RtlTrace {
        samples: rows
            .iter()
            .enumerate()
            .map(|(t, row)| RtlSample {
                cycle: t as u64,
                output: row.clone(),
            })
            .collect(),
    }
}

#[test]
fn test_simple_case_file_round_trip() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.simple_case(16, 8, 4, 8, 1).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = save_case(&case, dir.path()).unwrap();
    let loaded = load_case(&path).unwrap();

    assert_eq!(loaded.name, case.name);
    assert_eq!(loaded.input_fixed, case.input_fixed);
    assert_eq!(loaded.output_fixed, case.output_fixed);
    assert_eq!(loaded.fixed_point_config, format);

    // the golden output compared against itself always passes at zero
    // tolerance
    let trace = trace_from_output(loaded.output_fixed.as_ref().unwrap());
    let mut verifier = Verifier::new(0, loaded.fixed_point_config);
    let verdict = verifier.compare_case(&loaded, &trace).unwrap();
    assert!(verdict);
    assert!(verifier.passed());
}

#[test]
fn test_text_trace_end_to_end() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.quick_case(8, 4, 3, 4).unwrap();
    let output = case.output_fixed.as_ref().unwrap();

    // text log: a warm-up line with VALID: 0, then one line per sample
    // with the first channel rendered as masked hex
    let mut text = String::from("CYCLE: 0 VALID: 0 OUTPUT: 0,0,0,0\n");
    for (t, row) in output.iter().enumerate() {
        let values: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, &v)| {
                if c == 0 {
                    format!("0x{:04x}", format.to_bits(v))
                } else {
                    v.to_string()
                }
            })
            .collect();
        text.push_str(&format!("CYCLE: {t} VALID: 1 OUTPUT: {}\n", values.join(",")));
    }

    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("rtl_output.txt");
    std::fs::write(&trace_path, text).unwrap();

    let trace = load_trace(&trace_path).unwrap();
    assert_eq!(trace.samples.len(), 8);

    let mut verifier = Verifier::new(0, format);
    let verdict = verifier.compare_case(&case, &trace).unwrap();
    assert!(verdict);
    assert!(verifier.passed());
}

#[test]
fn test_tolerance_violation_is_reported() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.simple_case(8, 4, 3, 4, 1).unwrap();

    let mut trace = trace_from_output(case.output_fixed.as_ref().unwrap());
    trace.samples[5].output[2] += 3;

    let mut verifier = Verifier::new(2, format);
    let verdict = verifier.compare_case(&case, &trace).unwrap();
    assert!(!verdict);
    assert_eq!(verifier.errors().len(), 1);
    assert!(matches!(
        verifier.errors()[0],
        ErrorRecord::ToleranceExceeded { sample: 5, channel: 2, .. }
    ));

    let report = verifier.report();
    assert!(report.contains("Total errors: 1"));
    assert!(report.contains("Sample 5, Channel 2"));
}

#[test]
fn test_within_tolerance_passes() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.simple_case(8, 4, 3, 4, 1).unwrap();

    let mut trace = trace_from_output(case.output_fixed.as_ref().unwrap());
    trace.samples[5].output[2] += 2;

    let mut verifier = Verifier::new(2, format);
    assert!(verifier.compare_case(&case, &trace).unwrap());
    assert!(verifier.passed());
}

#[test]
fn test_dimension_mismatch_is_structural() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.simple_case(8, 4, 3, 4, 1).unwrap();

    let mut trace = trace_from_output(case.output_fixed.as_ref().unwrap());
    trace.samples[3].output.pop();

    let mut verifier = Verifier::new(2, format);
    let verdict = verifier.compare_case(&case, &trace).unwrap();
    assert!(!verdict);
    // one structural record for the short vector, no per-element records
    assert_eq!(verifier.errors().len(), 1);
    assert_eq!(
        verifier.errors()[0],
        ErrorRecord::DimensionMismatch {
            rtl_len: 3,
            golden_len: 4
        }
    );
}

#[test]
fn test_streaming_case_against_own_samples() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let mut rng = StdRng::seed_from_u64(9);
    let case = suite.streaming_case(&mut rng, 32, 8, 4, 8).unwrap();

    // hardware reports only post-warmup samples, keeping cycle tags
    let trace = RtlTrace {
        samples: case
            .streaming_samples
            .iter()
            .filter(|s| s.valid)
            .map(|s| RtlSample {
                cycle: s.cycle,
                output: s.expected_output_fixed.clone(),
            })
            .collect(),
    };
    assert_eq!(trace.samples.len(), 32 - 3);

    let mut verifier = Verifier::new(0, format);
    assert!(verifier.compare_case(&case, &trace).unwrap());
    assert!(verifier.passed());
}

#[test]
fn test_tcn_block_final_output_comparison() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let mut rng = StdRng::seed_from_u64(5);
    let case = suite.tcn_block_case(&mut rng, 2, 4, 16, 16, 24).unwrap();

    let trace = trace_from_output(case.final_output_fixed.as_ref().unwrap());
    let mut verifier = Verifier::new(0, format);
    assert!(verifier.compare_case(&case, &trace).unwrap());
    assert!(verifier.passed());
}

#[test]
fn test_same_seed_same_artifacts() {
    let suite = TestVectorSuite::new(FixedPointFormat::Q8_8);

    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);

    let streaming_a = suite.streaming_case(&mut rng_a, 64, 32, 4, 32).unwrap();
    let streaming_b = suite.streaming_case(&mut rng_b, 64, 32, 4, 32).unwrap();
    assert_eq!(
        serde_json::to_string(&streaming_a).unwrap(),
        serde_json::to_string(&streaming_b).unwrap()
    );

    let block_a = suite.tcn_block_case(&mut rng_a, 2, 4, 32, 32, 32).unwrap();
    let block_b = suite.tcn_block_case(&mut rng_b, 2, 4, 32, 32, 32).unwrap();
    assert_eq!(
        serde_json::to_string(&block_a).unwrap(),
        serde_json::to_string(&block_b).unwrap()
    );
}

#[test]
fn test_empty_trace_fails_with_warning() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let case = suite.quick_case(8, 4, 3, 4).unwrap();

    let mut verifier = Verifier::new(2, format);
    let verdict = verifier
        .compare_case(&case, &RtlTrace::default())
        .unwrap();
    assert!(!verdict);
    assert_eq!(verifier.warnings().len(), 1);
}

#[test]
fn test_unsupported_trace_format_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.vcd");
    std::fs::write(&path, "$var wire 16 ! out $end").unwrap();
    assert!(matches!(
        load_trace(&path),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_golden_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_case(&dir.path().join("nope.json")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_verifier_accumulates_across_cases() {
    let format = FixedPointFormat::Q8_8;
    let suite = TestVectorSuite::new(format);
    let quick = suite.quick_case(8, 4, 3, 4).unwrap();
    let simple = suite.simple_case(8, 4, 3, 4, 1).unwrap();

    let mut bad_trace = trace_from_output(quick.output_fixed.as_ref().unwrap());
    bad_trace.samples[0].output[0] += 100;

    let mut verifier = Verifier::new(2, format);
    assert!(!verifier.compare_case(&quick, &bad_trace).unwrap());

    let good_trace = trace_from_output(simple.output_fixed.as_ref().unwrap());
    assert!(verifier.compare_case(&simple, &good_trace).unwrap());

    // errors from the first case persist into the aggregate state
    assert_eq!(verifier.errors().len(), 1);
    assert!(!verifier.passed());
}
