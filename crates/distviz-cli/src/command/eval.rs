use std::path::PathBuf;

use anyhow::Context;
use distviz_catalog::DistributionFamily;
use distviz_stats::{
    evaluation::{EvaluationRequest, evaluate},
    sample::SampleSeed,
};

use crate::{
    presets::{self, RATE_TICKS, SAMPLE_COUNT_TICKS},
    text,
    util::{self, Output, OutputFormat},
};

/// How parameter values were entered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum InputMethod {
    /// Snap every value to the nearest slider tick
    Sliders,
    /// Use values as given
    #[default]
    Numeric,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvalArg {
    /// Distribution family, e.g. `normal`, `"Chi-Square"` or `ncx2`
    #[arg(required_unless_present = "request", conflicts_with = "request")]
    family: Option<DistributionFamily>,
    /// Parameter value as NAME=VALUE; missing parameters take their defaults
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    params: Vec<(String, f64)>,
    /// Read the evaluation request from a JSON file
    #[arg(long, conflicts_with = "params")]
    request: Option<PathBuf>,
    /// How parameter values were entered
    #[arg(long, value_enum, default_value_t)]
    input_method: InputMethod,
    /// Exponential sample size for the likelihood panel
    #[arg(long)]
    samples: Option<usize>,
    /// Exponential rate for the likelihood panel
    #[arg(long)]
    rate: Option<f64>,
    /// Seed for the exponential sample (32 hex digits)
    #[arg(long)]
    seed: Option<SampleSeed>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.to_owned(), value))
}

fn build_request(arg: &EvalArg) -> anyhow::Result<EvaluationRequest> {
    let mut request = match (&arg.request, arg.family) {
        (Some(path), _) => util::read_json_file::<EvaluationRequest, _>("request", path)?,
        (None, Some(family)) => {
            let params = arg.params.iter().map(|(k, v)| (k.as_str(), *v)).collect();
            EvaluationRequest::new(family, params)
        }
        (None, None) => anyhow::bail!("either a family or --request must be given"),
    };
    request.sample_count = arg.samples.or(request.sample_count);
    request.rate = arg.rate.or(request.rate);
    request.seed = arg.seed.or(request.seed);

    let family = request.family;
    request.parameters.fill_defaults(family);
    if arg.input_method == InputMethod::Sliders {
        snap_request(&mut request);
    }
    Ok(request)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn snap_request(request: &mut EvaluationRequest) {
    presets::snap_parameters(request.family, &mut request.parameters);
    request.rate = request.rate.map(|rate| RATE_TICKS.snap(rate));
    request.sample_count = request
        .sample_count
        .map(|n| SAMPLE_COUNT_TICKS.snap(n as f64) as usize);
}

pub(crate) fn run(arg: &EvalArg) -> anyhow::Result<()> {
    let request = build_request(arg)?;
    let family: DistributionFamily = request.family;
    let report = evaluate(&request).with_context(|| format!("Failed to evaluate {family}"))?;

    let mut output = Output::from_output_path(arg.output.as_deref())?;
    match arg.format {
        OutputFormat::Json => output.write_json(&report),
        OutputFormat::Text => {
            let text = text::render_report(&report).context("Failed to render report")?;
            output.write_text(&text)
        }
    }
}
