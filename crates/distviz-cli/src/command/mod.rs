use clap::{Parser, Subcommand};

use self::{eval::EvalArg, families::FamiliesArg, likelihood::LikelihoodArg};

mod eval;
mod families;
mod likelihood;

#[derive(Debug, Clone, Parser)]
#[command(name = "distviz", author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List distribution families with their parameters, defaults and tick marks
    Families(#[clap(flatten)] FamiliesArg),
    /// Evaluate a distribution: summary statistics and curves
    Eval(#[clap(flatten)] EvalArg),
    /// Draw an exponential sample and compute its likelihood panel
    Likelihood(#[clap(flatten)] LikelihoodArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::Families(arg) => families::run(&arg)?,
        Mode::Eval(arg) => eval::run(&arg)?,
        Mode::Likelihood(arg) => likelihood::run(&arg)?,
    }
    Ok(())
}
