use std::{collections::BTreeMap, path::PathBuf};

use staffviz_stats::summary;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// JSON file mapping group names to arrays of numbers
    groups: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let groups: BTreeMap<String, Vec<f64>> = util::read_json_file("groups", &arg.groups)?;
    for (name, values) in &groups {
        if values.is_empty() {
            tracing::warn!("Group {name:?} is empty; its summary is all zeros");
        }
    }
    let summaries = summary::summarize(&groups);
    tracing::info!("Summarized {} groups", summaries.len());
    util::save_json(&summaries, arg.output.as_deref())
}
