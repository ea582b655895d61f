//! Plain-text rendering of evaluation results.

use std::fmt::{self, Write as _};

use distviz_stats::evaluation::{EvaluationReport, LikelihoodPanel};

/// Every `CURVE_ROW_STRIDE`-th curve row is printed.
const CURVE_ROW_STRIDE: usize = 50;

pub fn render_report(report: &EvaluationReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Family:     {}", report.family)?;
    let params = report
        .parameters
        .iter()
        .map(|(name, value)| format!("{name} = {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "Parameters: {params}")?;
    writeln!(out)?;
    writeln!(out, "Mean:       {:.2}", report.summary.mean)?;
    writeln!(out, "Std Dev:    {:.2}", report.summary.std_dev)?;
    writeln!(out, "Skewness:   {:.2}", report.summary.skewness)?;
    if let Some(markers) = &report.markers {
        writeln!(
            out,
            "Markers:    mean {:.2} (pdf {:.4}), -1 SD {:.2}, +1 SD {:.2}",
            markers.mean.x, markers.mean.height, markers.lower.x, markers.upper.x
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>12} {:>12} {:>12} {:>12} {:>12}",
        "x", "pdf", "cdf", "reliability", "hazard"
    )?;
    for i in (0..report.range.len()).step_by(CURVE_ROW_STRIDE) {
        let Some([pdf, cdf, reliability, hazard]) = report.curves.row(i) else {
            break;
        };
        writeln!(
            out,
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            report.range[i], pdf, cdf, reliability, hazard
        )?;
    }

    if let Some(panel) = &report.likelihood {
        writeln!(out)?;
        out.push_str(&render_likelihood(panel)?);
    }
    Ok(out)
}

pub fn render_likelihood(panel: &LikelihoodPanel) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let stats = &panel.sample_summary;
    writeln!(out, "Exponential sample")?;
    writeln!(out, "  rate:     {}", panel.rate)?;
    writeln!(out, "  samples:  {}", panel.sample_count)?;
    writeln!(out, "  seed:     {}", panel.seed)?;
    writeln!(
        out,
        "  min {:.2}, max {:.2}, mean {:.2}, median {:.2}, std dev {:.2}",
        stats.min, stats.max, stats.mean, stats.median, stats.std_dev
    )?;
    writeln!(out, "MLE rate:   {:.4}", panel.mle)?;
    writeln!(
        out,
        "log L({}):  {:.4}",
        panel.rate, panel.chosen_log_likelihood
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use distviz_catalog::{DistributionFamily, ParameterSet};
    use distviz_stats::{
        evaluation::{EvaluationRequest, evaluate},
        sample::SampleSeed,
    };

    use super::*;

    #[test]
    fn test_report_rows_and_rounding() {
        let family = DistributionFamily::Normal;
        let report = evaluate(&EvaluationRequest::new(family, ParameterSet::defaults(family))).unwrap();
        let text = render_report(&report).unwrap();
        assert!(text.contains("Mean:       0.00"));
        assert!(text.contains("Std Dev:    1.00"));
        let rows = text
            .lines()
            .skip_while(|line| !line.trim_start().starts_with("x "))
            .skip(1)
            .take_while(|line| !line.is_empty())
            .count();
        assert_eq!(rows, 10);
    }

    #[test]
    fn test_undefined_statistics_are_labelled() {
        let family = DistributionFamily::Cauchy;
        let report = evaluate(&EvaluationRequest::new(family, ParameterSet::defaults(family))).unwrap();
        let text = render_report(&report).unwrap();
        assert!(text.contains("Mean:       undefined"));
        assert!(!text.contains("Markers:"));
    }

    #[test]
    fn test_likelihood_section() {
        let family = DistributionFamily::Exponential;
        let mut request = EvaluationRequest::new(family, ParameterSet::defaults(family));
        request.rate = Some(2.0);
        request.seed = Some(SampleSeed::from_bytes([1; 16]));
        let report = evaluate(&request).unwrap();
        let text = render_report(&report).unwrap();
        assert!(text.contains("seed:     01010101010101010101010101010101"));

        let panel = report.likelihood.unwrap();
        assert!(text.contains(&format!("MLE rate:   {:.4}\n", panel.mle)));
        assert!(text.contains(&format!("log L(2):  {:.4}\n", panel.chosen_log_likelihood)));
    }
}
