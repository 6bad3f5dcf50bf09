use clap::{ArgAction, Parser, Subcommand};
use rand::Rng as _;
use staffviz_cluster::{
    ClusterSeed, DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERATIONS, KMeans,
};
use tracing::Level;

use self::{cluster::ClusterArg, dashboard::DashboardArg, summarize::SummarizeArg};

mod cluster;
mod dashboard;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the full dashboard payload from employee records
    Dashboard(#[clap(flatten)] DashboardArg),
    /// Compute five-number summaries for named groups of values
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Run k-means over a list of 2D points
    Cluster(#[clap(flatten)] ClusterArg),
}

/// k-means tuning shared by the `dashboard` and `cluster` commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct KMeansArg {
    /// Seed for centroid initialization (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<ClusterSeed>,
    /// Maximum number of centroid updates
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Per-axis centroid movement below which the run counts as converged
    #[arg(long, default_value_t = DEFAULT_CONVERGENCE_THRESHOLD)]
    threshold: f64,
}

impl KMeansArg {
    fn to_kmeans(&self, k: std::num::NonZeroUsize) -> KMeans {
        KMeans::new(k)
            .with_max_iterations(self.max_iterations)
            .with_convergence_threshold(self.threshold)
    }

    fn seed_or_random(&self) -> ClusterSeed {
        self.seed.unwrap_or_else(|| {
            let seed = rand::rng().random();
            tracing::debug!(%seed, "generated clustering seed");
            seed
        })
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(args.verbose))
        .with_target(false)
        .init();

    match args.mode {
        Mode::Dashboard(arg) => dashboard::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Cluster(arg) => cluster::run(&arg)?,
    }
    Ok(())
}
