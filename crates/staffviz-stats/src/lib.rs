//! Distribution summaries for the staffviz dashboard.
//!
//! This crate computes the numbers behind the dashboard's box plots:
//!
//! - **Nearest-rank quantiles**: select an existing sorted element by truncated
//!   index, without interpolation
//! - **Group summaries**: min, quartiles, median, max and mean for each named
//!   group of samples
//!
//! # Modules
//!
//! - [`percentiles`]: Truncated-rank quantile selection
//! - [`summary`]: Per-group five-number summaries
//!
//! # Quantile Method
//!
//! For a sorted sample of `n` values the quantile at fraction `p` is the value
//! at zero-based index `floor(n * p)`. For `[10, 20, 30, 40]` this gives
//! `q1 = 20`, `median = 30` and `q3 = 40`, where an interpolating method would
//! give 17.5, 25 and 32.5. The output must match the truncated method exactly.
//!
//! # Examples
//!
//! ## Summarizing groups
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use staffviz_stats::summary::summarize;
//!
//! let groups = BTreeMap::from([("g", vec![10.0, 20.0, 30.0, 40.0])]);
//! let summaries = summarize(&groups);
//!
//! assert_eq!(summaries["g"].q1, 20.0);
//! assert_eq!(summaries["g"].mean, 25.0);
//! ```
//!
//! ## Selecting a single quantile
//!
//! ```
//! use staffviz_stats::percentiles::nearest_rank;
//!
//! let mut values = vec![5.0, 1.0, 3.0];
//! values.sort_by(f64::total_cmp);
//! assert_eq!(nearest_rank(&values, 0.5), Some(3.0));
//! ```

pub mod percentiles;
pub mod summary;
