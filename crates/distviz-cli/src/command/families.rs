use std::path::PathBuf;

use distviz_catalog::{DistributionFamily, ParamDomain};
use serde::Serialize;

use crate::{presets::TickSet, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FamiliesArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FamilyEntry {
    id: &'static str,
    label: String,
    parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Serialize)]
struct ParameterEntry {
    name: &'static str,
    label: &'static str,
    domain: ParamDomain,
    default: f64,
    ticks: TickSet,
}

fn family_entries() -> Vec<FamilyEntry> {
    DistributionFamily::ALL
        .into_iter()
        .map(|family| FamilyEntry {
            id: family.id(),
            label: family.to_string(),
            parameters: family
                .schema()
                .iter()
                .map(|spec| ParameterEntry {
                    name: spec.name,
                    label: spec.label,
                    domain: spec.domain,
                    default: spec.default,
                    ticks: TickSet::for_parameter(family, spec),
                })
                .collect(),
        })
        .collect()
}

pub(crate) fn run(arg: &FamiliesArg) -> anyhow::Result<()> {
    let FamiliesArg { output } = arg;
    let mut output = Output::from_output_path(output.as_deref())?;
    output.write_json(&family_entries())
}
