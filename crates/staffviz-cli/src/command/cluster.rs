use std::{num::NonZeroUsize, path::PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use staffviz_cluster::{ClusterResult, ClusterSeed, Point};

use super::KMeansArg;
use crate::util;

/// Arbitrary per-point fields carried through clustering untouched.
type Metadata = Map<String, Value>;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    /// JSON file with an array of `{"x": .., "y": .., ...}` points
    points: PathBuf,
    /// Number of clusters
    #[arg(long)]
    pub(super) clusters: NonZeroUsize,
    #[clap(flatten)]
    pub(super) kmeans: KMeansArg,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ClusterOutput {
    seed: ClusterSeed,
    sizes: Vec<usize>,
    #[serde(flatten)]
    result: ClusterResult<Metadata>,
}

pub(crate) fn run(arg: &ClusterArg) -> anyhow::Result<()> {
    let points: Vec<Point<Metadata>> = util::read_json_file("points", &arg.points)?;
    tracing::info!("Loaded {} points from {}", points.len(), arg.points.display());

    let kmeans = arg.kmeans.to_kmeans(arg.clusters);
    let seed = arg.kmeans.seed_or_random();
    let result = kmeans.cluster(points, &mut seed.to_rng());
    tracing::info!(
        %seed,
        iterations = result.iterations,
        "Clustered {} points into {} clusters",
        result.clusters.iter().map(Vec::len).sum::<usize>(),
        result.len()
    );

    let output = ClusterOutput {
        seed,
        sizes: result.cluster_sizes(),
        result,
    };
    util::save_json(&output, arg.output.as_deref())
}
