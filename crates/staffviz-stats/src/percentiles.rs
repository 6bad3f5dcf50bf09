/// Fraction of the sorted sample selected for the first quartile.
pub const Q1_FRACTION: f64 = 0.25;
/// Fraction of the sorted sample selected for the median.
pub const MEDIAN_FRACTION: f64 = 0.5;
/// Fraction of the sorted sample selected for the third quartile.
pub const Q3_FRACTION: f64 = 0.75;

/// Returns the zero-based index selected for `fraction` in a sample of `len` values.
///
/// The index is `floor(len * fraction)`, clamped to the last element so that a
/// fraction of `1.0` still lands inside the sample.
///
/// # Examples
///
/// ```
/// use staffviz_stats::percentiles::rank_index;
///
/// assert_eq!(rank_index(4, 0.25), 1);
/// assert_eq!(rank_index(4, 0.75), 3);
/// assert_eq!(rank_index(4, 1.0), 3);
/// assert_eq!(rank_index(1, 0.5), 0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn rank_index(len: usize, fraction: f64) -> usize {
    debug_assert!(len > 0, "rank index of an empty sample");
    let idx = (len as f64 * fraction) as usize;
    idx.min(len.saturating_sub(1))
}

/// Selects a quantile from sorted data by truncated rank.
///
/// This is the nearest-rank method without interpolation: the value at
/// position `floor(n * fraction)` is returned as-is, so for small samples the
/// quartiles can coincide with the minimum, median or maximum.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `fraction` - The quantile to select (0.0 to 1.0)
///
/// # Returns
///
/// The selected value, or `None` if the input is empty.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use staffviz_stats::percentiles::nearest_rank;
///
/// let values = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(nearest_rank(&values, 0.25), Some(20.0));
/// assert_eq!(nearest_rank(&values, 0.5), Some(30.0));
/// assert_eq!(nearest_rank(&[], 0.5), None);
/// ```
#[must_use]
pub fn nearest_rank(sorted_values: &[f64], fraction: f64) -> Option<f64> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
        "values must be sorted in ascending order"
    );
    if sorted_values.is_empty() {
        return None;
    }
    Some(sorted_values[rank_index(sorted_values.len(), fraction)])
}
