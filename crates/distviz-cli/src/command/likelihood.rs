use std::path::PathBuf;

use anyhow::Context;
use distviz_stats::{
    evaluation::{DEFAULT_RATE, DEFAULT_SAMPLE_COUNT, LikelihoodPanel},
    sample::SampleSeed,
};
use rand::Rng as _;

use crate::{
    text,
    util::{Output, OutputFormat},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LikelihoodArg {
    /// Number of exponential draws
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,
    /// Rate of the exponential distribution the sample is drawn from
    #[arg(long, default_value_t = DEFAULT_RATE)]
    rate: f64,
    /// Seed for the sample (32 hex digits); random when omitted
    #[arg(long)]
    seed: Option<SampleSeed>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &LikelihoodArg) -> anyhow::Result<()> {
    let LikelihoodArg {
        samples,
        rate,
        seed,
        format,
        output,
    } = arg;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let panel = LikelihoodPanel::compute(*rate, *samples, seed)
        .with_context(|| format!("Failed to compute likelihood for rate {rate} with {samples} samples"))?;

    let mut output = Output::from_output_path(output.as_deref())?;
    match format {
        OutputFormat::Json => output.write_json(&panel),
        OutputFormat::Text => {
            let text = text::render_likelihood(&panel).context("Failed to render likelihood")?;
            output.write_text(&text)
        }
    }
}
