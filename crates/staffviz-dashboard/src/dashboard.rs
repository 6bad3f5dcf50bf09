//! The dashboard response
//!
//! [`DashboardData`] is everything the charts need, computed from one batch of
//! employee records:
//!
//! ```text
//! EmployeeRecord[]
//!     ↓ validate
//! ValidRecord[]
//!     ├─ tally by department        → departmentData   (bar chart)
//!     ├─ tally by job satisfaction  → satisfactionData (pie chart)
//!     ├─ incomes by rating 3 / 4    → boxPlotData      (summaries)
//!     └─ (satisfaction, income)     → kmeansData       (scatter + clusters)
//! ```
//!
//! The response serializes with camelCase keys:
//!
//! ```json
//! {
//!   "departmentData": { "labels": [...], "data": [...] },
//!   "satisfactionData": { "labels": [...], "data": [...] },
//!   "boxPlotData": { "labels": [...], "data": [[...], [...]], "summaries": [...] },
//!   "kmeansData": { "rawData": [...], "clustering": null },
//!   "debug": { "totalRows": 0, "validRows": 0, "boxPlotCounts": { "rating3": 0, "rating4": 0 } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use staffviz_cluster::{Centroid, ClusterSeed, KMeans, Point};
use staffviz_stats::summary::{GroupSummary, summarize};
use tracing::debug;

use crate::{
    profile::ClusterProfile,
    record::{EmployeeRecord, EmployeeTag, ValidRecord},
    tally::CategoryTally,
};

/// Job satisfaction levels and their chart labels.
pub const SATISFACTION_LEVELS: [(u32, &str); 4] = [
    (1, "1: Dissatisfied"),
    (2, "2: Neutral"),
    (3, "3: Satisfied"),
    (4, "4: Very Satisfied"),
];

/// Performance ratings compared in the income box plot, with their labels.
pub const PERFORMANCE_GROUPS: [(u32, &str); 2] = [(3, "Good (3)"), (4, "Excellent (4)")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub department_data: CategoryTally,
    pub satisfaction_data: CategoryTally,
    pub box_plot_data: BoxPlotData,
    pub kmeans_data: KMeansData,
    pub debug: DebugInfo,
}

/// Monthly incomes per performance rating, raw and summarized.
///
/// `labels`, `data` and `summaries` are parallel and follow
/// [`PERFORMANCE_GROUPS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotData {
    pub labels: Vec<String>,
    pub data: Vec<Vec<f64>>,
    pub summaries: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KMeansData {
    /// One point per valid record (x: job satisfaction, y: monthly income)
    pub raw_data: Vec<Point<EmployeeTag>>,
    /// Present when clustering was requested
    pub clustering: Option<ClusteringReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringReport {
    pub k: usize,
    /// Seed that reproduces this clustering
    pub seed: ClusterSeed,
    pub iterations: usize,
    pub centroids: Vec<Centroid>,
    pub clusters: Vec<Vec<Point<EmployeeTag>>>,
    pub profiles: Vec<ClusterProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub box_plot_counts: BoxPlotCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxPlotCounts {
    pub rating3: usize,
    pub rating4: usize,
}

/// How to cluster the employee points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringRequest {
    pub kmeans: KMeans,
    pub seed: ClusterSeed,
}

impl DashboardData {
    /// Builds the full dashboard from parsed records.
    ///
    /// Invalid records are dropped first (see [`EmployeeRecord::validate`]);
    /// they only show up in [`DebugInfo::total_rows`]. Clustering runs only
    /// when `clustering` is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffviz_dashboard::{dashboard::DashboardData, record::EmployeeRecord};
    ///
    /// let records = vec![
    ///     EmployeeRecord {
    ///         department: Some("Sales".to_owned()),
    ///         job_satisfaction: Some(4),
    ///         performance_rating: Some(3),
    ///         monthly_income: Some(5993.0),
    ///     },
    ///     EmployeeRecord::default(),
    /// ];
    /// let dashboard = DashboardData::from_records(&records, None);
    ///
    /// assert_eq!(dashboard.debug.total_rows, 2);
    /// assert_eq!(dashboard.debug.valid_rows, 1);
    /// assert_eq!(dashboard.department_data.data, [1]);
    /// assert_eq!(dashboard.box_plot_data.summaries[0].median, 5993.0);
    /// ```
    #[must_use]
    pub fn from_records(
        records: &[EmployeeRecord],
        clustering: Option<ClusteringRequest>,
    ) -> Self {
        let valid = ValidRecord::filter_valid(records);
        debug!(
            total = records.len(),
            valid = valid.len(),
            "filtered employee records"
        );

        let department_data = CategoryTally::by_first_seen(valid.iter().map(|r| &r.department));
        let satisfaction_data = CategoryTally::by_buckets(
            &SATISFACTION_LEVELS,
            valid.iter().map(|r| r.job_satisfaction),
        );
        let box_plot_data = BoxPlotData::from_records(&valid);
        let raw_data = valid.iter().map(ValidRecord::to_point).collect::<Vec<_>>();
        let clustering =
            clustering.map(|request| ClusteringReport::new(raw_data.clone(), request));

        let debug_info = DebugInfo {
            total_rows: records.len(),
            valid_rows: valid.len(),
            box_plot_counts: BoxPlotCounts {
                rating3: box_plot_data.data[0].len(),
                rating4: box_plot_data.data[1].len(),
            },
        };
        debug!(
            rating3 = debug_info.box_plot_counts.rating3,
            rating4 = debug_info.box_plot_counts.rating4,
            "grouped incomes by performance rating"
        );

        Self {
            department_data,
            satisfaction_data,
            box_plot_data,
            kmeans_data: KMeansData {
                raw_data,
                clustering,
            },
            debug: debug_info,
        }
    }
}

impl BoxPlotData {
    /// Groups incomes by performance rating and summarizes each group.
    ///
    /// Both groups of [`PERFORMANCE_GROUPS`] are always present; records with
    /// any other rating are left out.
    #[must_use]
    pub fn from_records(records: &[ValidRecord]) -> Self {
        let mut groups = PERFORMANCE_GROUPS
            .iter()
            .map(|&(rating, _)| (rating, vec![]))
            .collect::<BTreeMap<u32, Vec<f64>>>();
        for record in records {
            if let Some(incomes) = groups.get_mut(&record.performance_rating) {
                incomes.push(record.monthly_income);
            }
        }
        let summaries = summarize(&groups);

        let mut data = vec![];
        let mut labels = vec![];
        let mut ordered_summaries = vec![];
        for (rating, label) in PERFORMANCE_GROUPS {
            labels.push(label.to_owned());
            ordered_summaries.push(summaries[&rating]);
            data.push(groups.remove(&rating).unwrap_or_default());
        }

        Self {
            labels,
            data,
            summaries: ordered_summaries,
        }
    }
}

impl ClusteringReport {
    /// Clusters the employee points and profiles the resulting clusters.
    #[must_use]
    pub fn new(points: Vec<Point<EmployeeTag>>, request: ClusteringRequest) -> Self {
        let ClusteringRequest { kmeans, seed } = request;
        let result = kmeans.cluster(points, &mut seed.to_rng());
        let profiles = ClusterProfile::from_result(&result);
        Self {
            k: kmeans.k.get(),
            seed,
            iterations: result.iterations,
            centroids: result.centroids,
            clusters: result.clusters,
            profiles,
        }
    }
}
