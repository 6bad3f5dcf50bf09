//! Employee dashboard aggregation
//!
//! This crate turns parsed employee records into the data behind the
//! dashboard charts. It sits between the ingestion step (which hands over
//! loosely typed rows) and the rendering layer (which draws whatever JSON it
//! is given), and delegates the numeric work to two leaf crates:
//!
//! - `staffviz-stats` for the income box plots (nearest-rank summaries)
//! - `staffviz-cluster` for the satisfaction/income scatter (k-means)
//!
//! # Workflow
//!
//! 1. **Validate** ([`record::EmployeeRecord::validate`]): drop rows with a
//!    missing or zero department, satisfaction, rating or income
//! 2. **Tally** ([`tally::CategoryTally`]): count employees per department and
//!    per satisfaction level
//! 3. **Summarize** ([`dashboard::BoxPlotData`]): income summaries for
//!    performance ratings 3 and 4
//! 4. **Cluster** ([`dashboard::ClusteringReport`]): optional k-means over
//!    (satisfaction, income) with per-cluster profiles
//!    ([`profile::ClusterProfile`])
//!
//! Everything is assembled into [`dashboard::DashboardData`].
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use staffviz_cluster::{ClusterSeed, KMeans};
//! use staffviz_dashboard::{
//!     dashboard::{ClusteringRequest, DashboardData},
//!     record::EmployeeRecord,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"[
//!     {"Department": "Sales", "JobSatisfaction": 4, "PerformanceRating": 3, "MonthlyIncome": 5993},
//!     {"Department": "Research & Development", "JobSatisfaction": 2, "PerformanceRating": 4, "MonthlyIncome": 5130},
//!     {"Department": "Research & Development", "JobSatisfaction": 3, "PerformanceRating": 3, "MonthlyIncome": 2090}
//! ]"#;
//! let records: Vec<EmployeeRecord> = serde_json::from_str(json)?;
//!
//! let request = ClusteringRequest {
//!     kmeans: KMeans::new(NonZeroUsize::new(2).unwrap()),
//!     seed: ClusterSeed::from_bytes([1; 16]),
//! };
//! let dashboard = DashboardData::from_records(&records, Some(request));
//!
//! assert_eq!(dashboard.debug.valid_rows, 3);
//! assert_eq!(dashboard.box_plot_data.summaries[0].median, 5993.0);
//! assert_eq!(dashboard.kmeans_data.clustering.unwrap().clusters.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod dashboard;
pub mod profile;
pub mod record;
pub mod tally;
