use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::percentiles::{MEDIAN_FRACTION, Q1_FRACTION, Q3_FRACTION, nearest_rank};

/// Five-number summary plus mean for one group of samples.
///
/// The rank statistics satisfy `min <= q1 <= median <= q3 <= max` because they
/// are selected from sorted data. The mean is computed independently and may
/// fall outside `[q1, q3]`.
///
/// A group without samples is summarized as all zeros (see [`Default`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// The smallest sample.
    pub min: f64,
    /// The sample at index `floor(n * 0.25)`.
    pub q1: f64,
    /// The sample at index `floor(n * 0.5)`.
    pub median: f64,
    /// The sample at index `floor(n * 0.75)`.
    pub q3: f64,
    /// The largest sample.
    pub max: f64,
    /// The arithmetic mean of all samples.
    pub mean: f64,
}

impl GroupSummary {
    /// Summarizes unsorted samples.
    ///
    /// The samples are copied and sorted internally; the input is never
    /// modified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use staffviz_stats::summary::GroupSummary;
    /// let summary = GroupSummary::new([40.0, 10.0, 30.0, 20.0]);
    /// assert_eq!(summary.min, 10.0);
    /// assert_eq!(summary.q1, 20.0);
    /// assert_eq!(summary.median, 30.0);
    /// assert_eq!(summary.q3, 40.0);
    /// assert_eq!(summary.max, 40.0);
    /// assert_eq!(summary.mean, 25.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Summarizes samples that are already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        let (Some(q1), Some(median), Some(q3)) = (
            nearest_rank(sorted_values, Q1_FRACTION),
            nearest_rank(sorted_values, MEDIAN_FRACTION),
            nearest_rank(sorted_values, Q3_FRACTION),
        ) else {
            return Self::default();
        };
        let n = sorted_values.len();

        Self {
            min: sorted_values[0],
            q1,
            median,
            q3,
            max: sorted_values[n - 1],
            mean: sorted_values.iter().sum::<f64>() / n as f64,
        }
    }
}

/// Summarizes every group independently.
///
/// Each group keeps its own sorted copy of the samples, so calls on shared
/// input are safe from multiple threads. Empty groups yield an all-zero
/// summary and an empty mapping yields an empty result.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use staffviz_stats::summary::{GroupSummary, summarize};
///
/// let groups = BTreeMap::from([
///     ("good", vec![3000.0, 5000.0, 4000.0]),
///     ("excellent", vec![]),
/// ]);
/// let summaries = summarize(&groups);
///
/// assert_eq!(summaries["good"].median, 4000.0);
/// assert_eq!(summaries["excellent"], GroupSummary::default());
/// ```
pub fn summarize<'a, K, I, V>(groups: I) -> BTreeMap<K, GroupSummary>
where
    K: Ord + Clone + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    V: AsRef<[f64]> + ?Sized + 'a,
{
    groups
        .into_iter()
        .map(|(name, samples)| {
            let summary = GroupSummary::new(samples.as_ref().iter().copied());
            (name.clone(), summary)
        })
        .collect()
}
