use std::{num::NonZeroUsize, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use staffviz_dashboard::{
    dashboard::{ClusteringRequest, DashboardData},
    record::EmployeeRecord,
};

use super::KMeansArg;
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DashboardArg {
    /// Employee records JSON file (array of objects)
    records: PathBuf,
    /// Number of k-means clusters; clustering is skipped if omitted
    #[arg(long)]
    pub(super) clusters: Option<NonZeroUsize>,
    #[clap(flatten)]
    pub(super) kmeans: KMeansArg,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardOutput {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    data: DashboardData,
}

pub(crate) fn run(arg: &DashboardArg) -> anyhow::Result<()> {
    let records: Vec<EmployeeRecord> = util::read_json_file("records", &arg.records)?;
    tracing::info!("Loaded {} records from {}", records.len(), arg.records.display());

    let request = arg.clusters.map(|k| ClusteringRequest {
        kmeans: arg.kmeans.to_kmeans(k),
        seed: arg.kmeans.seed_or_random(),
    });
    let data = DashboardData::from_records(&records, request);
    tracing::info!(
        valid = data.debug.valid_rows,
        dropped = data.debug.total_rows - data.debug.valid_rows,
        "Built dashboard"
    );
    if let Some(report) = &data.kmeans_data.clustering {
        tracing::info!(
            k = report.k,
            seed = %report.seed,
            iterations = report.iterations,
            "Clustered employees"
        );
    }

    let output = DashboardOutput {
        generated_at: Utc::now(),
        data,
    };
    util::save_json(&output, arg.output.as_deref())
}
