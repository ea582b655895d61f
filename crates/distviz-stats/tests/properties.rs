use approx::assert_abs_diff_eq;
use distviz_catalog::{DistributionFamily, EVALUATION_POINTS, ParameterSet, build};
use distviz_stats::{
    curves::curves,
    evaluation::{EvaluationRequest, evaluate},
    likelihood::{LikelihoodError, log_likelihood, mle},
    sample::{ExponentialSample, SampleSeed},
    summary::summary_statistics,
    value::Value,
};

const SEED: SampleSeed = SampleSeed::from_bytes([
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
]);

fn params(pairs: &[(&str, f64)]) -> ParameterSet {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

/// Schema defaults of every family plus parameters at the extremes of the slider ticks.
fn parameter_sweep() -> Vec<(DistributionFamily, ParameterSet)> {
    use DistributionFamily as F;

    let mut cases = DistributionFamily::ALL
        .into_iter()
        .map(|family| (family, ParameterSet::defaults(family)))
        .collect::<Vec<_>>();
    cases.extend([
        (F::NoncentralT, params(&[("df", 0.25), ("noncentrality", 100.0)])),
        (F::NoncentralT, params(&[("df", 0.25), ("noncentrality", -100.0)])),
        (F::Gamma, params(&[("shape", 0.25), ("scale", 2.0)])),
        (F::Beta, params(&[("alpha", 0.25), ("beta", 0.25)])),
        (F::KolmogorovSmirnov, params(&[("n", 1.0)])),
        (F::KolmogorovSmirnov, params(&[("n", 100.0)])),
        (F::Pareto, params(&[("shape", 0.25)])),
        (F::LogLogistic, params(&[("shape", 0.25)])),
        (F::LogNormal, params(&[("mu", 100.0), ("sigma", 100.0)])),
        (F::NoncentralChiSquare, params(&[("df", 100.0), ("noncentrality", 100.0)])),
    ]);
    cases
}

#[test]
fn reliability_complements_cdf_across_parameters() {
    for (family, p) in parameter_sweep() {
        let (instance, range) = build(family, &p).unwrap();
        let curves = curves(&instance, &range);
        assert_eq!(curves.len(), EVALUATION_POINTS, "{family} {p:?}");
        for (c, r) in curves.cdf.iter().zip(&curves.reliability) {
            match (c.get(), r.get()) {
                (Some(c), Some(r)) => assert_abs_diff_eq!(c + r, 1.0, epsilon = 1e-12),
                (None, None) => {}
                _ => panic!("{family} {p:?}: cdf and reliability disagree on definedness"),
            }
        }
    }
}

#[test]
fn hazard_is_undefined_where_reliability_vanishes() {
    for (family, p) in parameter_sweep() {
        let (instance, range) = build(family, &p).unwrap();
        let curves = curves(&instance, &range);
        for i in 0..curves.len() {
            let [pdf, _, reliability, hazard] = curves.row(i).unwrap();
            if reliability == Value::new(0.0) || pdf.is_undefined() {
                assert!(hazard.is_undefined(), "{family} {p:?} at {i}");
            }
            if let Some(h) = hazard.get() {
                assert!(h.is_finite(), "{family} {p:?} at {i}");
            }
        }
    }
}

#[test]
fn cdf_is_non_decreasing_across_parameters() {
    for (family, p) in parameter_sweep() {
        let (instance, range) = build(family, &p).unwrap();
        let cdf = curves(&instance, &range).cdf;
        for w in cdf.windows(2) {
            let (a, b) = (w[0].get().unwrap(), w[1].get().unwrap());
            assert!(b >= a - 1e-12, "{family} {p:?}: {a} > {b}");
        }
    }
}

#[test]
fn standard_normal_summary_and_range() {
    let (instance, range) = build(
        DistributionFamily::Normal,
        &params(&[("mean", 0.0), ("std_dev", 1.0)]),
    )
    .unwrap();
    let summary = summary_statistics(&instance);
    assert_eq!(summary.mean, Value::new(0.0));
    assert_eq!(summary.std_dev, Value::new(1.0));
    assert_eq!(summary.skewness, Value::new(0.0));
    assert_eq!(range.start(), Some(-4.0));
    assert_eq!(range.end(), Some(4.0));
}

#[test]
fn beta_curves_on_unit_interval() {
    let (instance, range) = build(
        DistributionFamily::Beta,
        &params(&[("alpha", 2.0), ("beta", 5.0)]),
    )
    .unwrap();
    assert_eq!(range.start(), Some(0.0));
    assert_eq!(range.end(), Some(1.0));
    let curves = curves(&instance, &range);
    assert!(curves.pdf[0].is_defined());
    assert_abs_diff_eq!(curves.cdf[EVALUATION_POINTS - 1].get().unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn exponential_likelihood_identities() {
    let sample = ExponentialSample::with_seed(2.0, 100, SEED).unwrap();
    let sum = sample.sum();
    assert_eq!(mle(sum, 100), Ok(100.0 / sum));
    assert_eq!(
        log_likelihood(sum, 100, 2.0),
        Value::new(100.0 * 2.0_f64.ln() - 2.0 * sum)
    );
    assert_eq!(mle(0.0, 100), Err(LikelihoodError::DivisionByZero));
}

#[test]
fn evaluation_report_matches_direct_computation() {
    let family = DistributionFamily::Exponential;
    let mut request = EvaluationRequest::new(family, params(&[("scale", 0.5)]));
    request.rate = Some(2.0);
    request.seed = Some(SEED);
    let report = evaluate(&request).unwrap();

    let (instance, range) = build(family, &request.parameters).unwrap();
    assert_eq!(report.range, range.points());
    assert_eq!(report.curves, curves(&instance, &range));
    assert_eq!(report.summary, summary_statistics(&instance));

    let panel = report.likelihood.unwrap();
    let sum = ExponentialSample::with_seed(2.0, 100, SEED).unwrap().sum();
    assert_eq!(panel.mle, 100.0 / sum);
    assert_eq!(panel.seed, SEED);
}

#[test]
fn evaluation_is_idempotent() {
    for family in DistributionFamily::ALL {
        let request = EvaluationRequest::new(family, ParameterSet::defaults(family));
        let a = evaluate(&request).unwrap();
        let b = evaluate(&request).unwrap();
        assert_eq!(a, b, "{family}");
    }
}

#[test]
fn invalid_requests_fail() {
    let err = "Triangular".parse::<DistributionFamily>().unwrap_err();
    assert!(err.is_unknown_family());

    let request = EvaluationRequest::new(
        DistributionFamily::Gamma,
        params(&[("shape", -1.0), ("scale", 2.0)]),
    );
    let err = evaluate(&request).unwrap_err();
    assert!(err.is_catalog());
    assert!(err.to_string().contains("shape"));
}

#[test]
fn undefined_moments_serialize_as_sentinel() {
    let family = DistributionFamily::Cauchy;
    let report = evaluate(&EvaluationRequest::new(family, ParameterSet::defaults(family))).unwrap();
    assert!(report.markers.is_none());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["mean"], "undefined");
    assert_eq!(json["range"].as_array().unwrap().len(), EVALUATION_POINTS);
}
