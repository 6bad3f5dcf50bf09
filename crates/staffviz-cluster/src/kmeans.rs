use std::num::NonZeroUsize;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::point::{Centroid, Point};

/// Default upper bound on update passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default per-axis displacement below which a centroid counts as settled.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.001;

/// Parameters for a k-means run over 2-D points.
///
/// # Algorithm
///
/// 1. **Initialize** - Copy the coordinates of `k` points sampled uniformly
///    with replacement
/// 2. **Assign** - Put every point in the cluster of its nearest centroid
///    (Euclidean distance, ties go to the lowest index)
/// 3. **Update** - Move each non-empty cluster's centroid to the mean of its
///    members; an empty cluster keeps its centroid unchanged
/// 4. **Check** - Stop once no centroid moved more than
///    `convergence_threshold` along either axis, or after `max_iterations`
///    update passes; otherwise go back to step 2
///
/// An empty cluster is never re-seeded. If one centroid loses every point it
/// usually stays empty for the rest of the run.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use staffviz_cluster::{KMeans, Point};
///
/// let points = vec![
///     Point::new(1.0, 1.0),
///     Point::new(1.2, 0.8),
///     Point::new(8.0, 8.0),
///     Point::new(8.1, 7.9),
/// ];
/// let kmeans = KMeans::new(NonZeroUsize::new(2).unwrap()).with_max_iterations(50);
/// let result = kmeans.cluster(points, &mut Pcg32::seed_from_u64(42));
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.cluster_sizes().iter().sum::<usize>(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    /// Number of clusters
    pub k: NonZeroUsize,
    /// Maximum number of update passes
    pub max_iterations: usize,
    /// Per-axis centroid displacement that still counts as "not moved"
    pub convergence_threshold: f64,
}

/// Output of a k-means run.
///
/// `clusters` and `centroids` are parallel: `clusters[i]` holds the points
/// whose nearest centroid was `centroids[i]` in the final assignment pass.
/// Every input point appears in exactly one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult<M = ()> {
    pub clusters: Vec<Vec<Point<M>>>,
    pub centroids: Vec<Centroid>,
    /// Number of completed update passes that moved at least one centroid.
    pub iterations: usize,
}

impl KMeans {
    /// Creates k-means parameters with the default iteration bound and
    /// convergence threshold.
    #[must_use]
    pub const fn new(k: NonZeroUsize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
        }
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn with_convergence_threshold(mut self, convergence_threshold: f64) -> Self {
        self.convergence_threshold = convergence_threshold;
        self
    }

    /// Partitions `points` into `k` clusters.
    ///
    /// The initial centroids are drawn from `rng`; pass a seeded generator
    /// (see [`ClusterSeed`](crate::ClusterSeed)) for reproducible output.
    ///
    /// Empty input returns an empty result with zero iterations. When `k`
    /// exceeds the number of points the result still has `k` clusters, some
    /// of which are empty.
    ///
    /// With `max_iterations == 0` the points are assigned once to the initial
    /// centroids and the result reports zero iterations.
    pub fn cluster<M, R>(&self, points: Vec<Point<M>>, rng: &mut R) -> ClusterResult<M>
    where
        R: Rng + ?Sized,
    {
        if points.is_empty() {
            return ClusterResult::empty();
        }
        let centroids = (0..self.k.get())
            .map(|_| Centroid::from(&points[rng.random_range(0..points.len())]))
            .collect();
        self.cluster_from(points, centroids)
    }

    fn cluster_from<M>(
        &self,
        points: Vec<Point<M>>,
        mut centroids: Vec<Centroid>,
    ) -> ClusterResult<M> {
        debug_assert_eq!(centroids.len(), self.k.get());

        let mut labels = assign(&points, &centroids);
        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.max_iterations {
            if !update(&points, &labels, &mut centroids, self.convergence_threshold) {
                converged = true;
                break;
            }
            iterations += 1;
            trace!(iterations, "centroids moved");
            if iterations < self.max_iterations {
                labels = assign(&points, &centroids);
            }
        }

        if converged {
            debug!(k = self.k.get(), iterations, "k-means converged");
        } else {
            debug!(
                k = self.k.get(),
                iterations, "k-means stopped at iteration limit"
            );
        }

        ClusterResult {
            clusters: partition(points, &labels, self.k.get()),
            centroids,
            iterations,
        }
    }
}

/// Partitions `points` into `k` clusters with the default parameters.
///
/// Shorthand for `KMeans::new(k).cluster(points, rng)`.
pub fn cluster<M, R>(points: Vec<Point<M>>, k: NonZeroUsize, rng: &mut R) -> ClusterResult<M>
where
    R: Rng + ?Sized,
{
    KMeans::new(k).cluster(points, rng)
}

impl<M> ClusterResult<M> {
    /// The result for empty input: no clusters, no centroids, zero iterations.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            clusters: vec![],
            centroids: vec![],
            iterations: 0,
        }
    }

    /// Number of clusters (equal to `k` unless the input was empty).
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of points in each cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}

/// Index of the centroid nearest to `point`.
///
/// A later centroid replaces the current best only when strictly closer, so
/// ties resolve to the lowest index.
fn nearest_centroid<M>(point: &Point<M>, centroids: &[Centroid]) -> usize {
    let mut best = 0;
    let mut min_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = point.distance_to(centroid);
        if distance < min_distance {
            min_distance = distance;
            best = i;
        }
    }
    best
}

fn assign<M>(points: &[Point<M>], centroids: &[Centroid]) -> Vec<usize> {
    points
        .iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

/// Moves every non-empty cluster's centroid to the mean of its members.
///
/// Returns `true` if any centroid moved by more than `threshold` on either
/// axis. Centroids of empty clusters are left untouched.
#[expect(clippy::cast_precision_loss)]
fn update<M>(
    points: &[Point<M>],
    labels: &[usize],
    centroids: &mut [Centroid],
    threshold: f64,
) -> bool {
    let mut sums = vec![(0.0, 0.0, 0_usize); centroids.len()];
    for (point, &label) in points.iter().zip(labels) {
        let (sx, sy, count) = &mut sums[label];
        *sx += point.x;
        *sy += point.y;
        *count += 1;
    }

    let mut moved = false;
    for (centroid, (sx, sy, count)) in centroids.iter_mut().zip(sums) {
        if count == 0 {
            continue;
        }
        let n = count as f64;
        let next = Centroid::new(sx / n, sy / n);
        moved |= next.moved_from(centroid, threshold);
        *centroid = next;
    }
    moved
}

fn partition<M>(points: Vec<Point<M>>, labels: &[usize], k: usize) -> Vec<Vec<Point<M>>> {
    let mut clusters = (0..k).map(|_| Vec::new()).collect::<Vec<_>>();
    for (point, &label) in points.into_iter().zip(labels) {
        clusters[label].push(point);
    }
    clusters
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg32;

    use super::*;

    fn k(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Points tagged with their input position.
    fn indexed(coords: &[(f64, f64)]) -> Vec<Point<usize>> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::with_metadata(x, y, i))
            .collect()
    }

    fn sample_points() -> Vec<Point<usize>> {
        indexed(&[
            (1.0, 3000.0),
            (1.0, 3200.0),
            (2.0, 4100.0),
            (3.0, 5900.0),
            (3.0, 6100.0),
            (4.0, 9800.0),
            (4.0, 10400.0),
            (2.0, 2500.0),
            (4.0, 15000.0),
            (1.0, 19000.0),
        ])
    }

    fn assert_partition(result: &ClusterResult<usize>, point_count: usize) {
        let mut seen = result
            .clusters
            .iter()
            .flatten()
            .map(|p| p.metadata)
            .collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(seen, (0..point_count).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        for n in [1, 3, 10] {
            let result = cluster(Vec::<Point>::new(), k(n), &mut Pcg32::seed_from_u64(0));
            assert_eq!(result, ClusterResult::empty());
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_every_point_assigned_once() {
        for n in 1..=6 {
            let mut rng = Pcg32::seed_from_u64(n as u64);
            let result = cluster(sample_points(), k(n), &mut rng);
            assert_eq!(result.clusters.len(), n);
            assert_eq!(result.centroids.len(), n);
            assert_partition(&result, 10);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let kmeans = KMeans::new(k(3));
        let a = kmeans.cluster(sample_points(), &mut Pcg32::seed_from_u64(1234));
        let b = kmeans.cluster(sample_points(), &mut Pcg32::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_max_iterations_assigns_once() {
        let kmeans = KMeans::new(k(3)).with_max_iterations(0);
        let points = sample_points();
        let result = kmeans.cluster(points.clone(), &mut Pcg32::seed_from_u64(7));

        assert_eq!(result.iterations, 0);
        assert_partition(&result, 10);
        // Initial centroids are copies of input coordinates
        for centroid in &result.centroids {
            assert!(points.iter().any(|p| Centroid::from(p) == *centroid));
        }
        // Membership matches the nearest initial centroid
        for (i, members) in result.clusters.iter().enumerate() {
            for p in members {
                assert_eq!(nearest_centroid(p, &result.centroids), i);
            }
        }
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let centroids = [Centroid::new(0.0, 0.0), Centroid::new(2.0, 0.0)];
        assert_eq!(nearest_centroid(&Point::new(1.0, 0.0), &centroids), 0);

        let duplicates = [Centroid::new(5.0, 5.0); 4];
        assert_eq!(nearest_centroid(&Point::new(-3.0, 8.0), &duplicates), 0);
    }

    #[test]
    fn test_nan_point_goes_to_first_cluster() {
        let centroids = [Centroid::new(0.0, 0.0), Centroid::new(2.0, 0.0)];
        assert_eq!(nearest_centroid(&Point::new(f64::NAN, 0.0), &centroids), 0);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let points = indexed(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (1.0, -1.0)]);
        let initial = vec![
            Centroid::new(1.0, 0.0),
            Centroid::new(1.0, 0.0),
            Centroid::new(40.0, -7.25),
        ];
        let result = KMeans::new(k(3)).cluster_from(points, initial.clone());

        assert_eq!(result.iterations, 0);
        assert_eq!(result.cluster_sizes(), vec![4, 0, 0]);
        for i in [1, 2] {
            assert_eq!(result.centroids[i].x.to_bits(), initial[i].x.to_bits());
            assert_eq!(result.centroids[i].y.to_bits(), initial[i].y.to_bits());
        }
    }

    #[test]
    fn test_empty_cluster_frozen_across_iterations() {
        let points = indexed(&[
            (-1.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (9.0, 0.0),
            (11.0, 0.0),
            (10.0, 1.0),
        ]);
        let initial = vec![
            Centroid::new(0.0, 0.0),
            Centroid::new(10.0, 0.0),
            Centroid::new(100.0, 100.0),
        ];
        let result = KMeans::new(k(3)).cluster_from(points, initial);

        assert_eq!(result.iterations, 1);
        assert_eq!(result.cluster_sizes(), vec![3, 3, 0]);
        assert_eq!(result.centroids[2].x.to_bits(), 100.0_f64.to_bits());
        assert_eq!(result.centroids[2].y.to_bits(), 100.0_f64.to_bits());
        assert_eq!(result.centroids[0], Centroid::new(0.0, 1.0 / 3.0));
        assert_eq!(result.centroids[1], Centroid::new(10.0, 1.0 / 3.0));
    }

    #[test]
    fn test_iteration_limit() {
        // Same layout as above; it needs one moving pass before it settles
        let points = indexed(&[
            (-1.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (9.0, 0.0),
            (11.0, 0.0),
            (10.0, 1.0),
        ]);
        let initial = vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 0.0)];
        let result = KMeans::new(k(2))
            .with_max_iterations(1)
            .cluster_from(points, initial);

        assert_eq!(result.iterations, 1);
        assert_eq!(result.cluster_sizes(), vec![3, 3]);
    }

    #[test]
    fn test_large_threshold_stops_after_first_pass() {
        let kmeans = KMeans::new(k(2)).with_convergence_threshold(1e12);
        let result = kmeans.cluster(sample_points(), &mut Pcg32::seed_from_u64(3));
        assert_eq!(result.iterations, 0);
        assert_partition(&result, 10);
    }

    #[test]
    fn test_k_larger_than_point_count() {
        let points = indexed(&[(0.0, 0.0), (5.0, 5.0)]);
        let result = cluster(points, k(5), &mut Pcg32::seed_from_u64(99));

        assert_eq!(result.len(), 5);
        assert_eq!(result.centroids.len(), 5);
        assert_partition(&result, 2);
        let empty = result.clusters.iter().filter(|c| c.is_empty()).count();
        assert!(empty >= 3);
    }

    #[test]
    fn test_identical_points() {
        let points = indexed(&[(2.0, 2.0); 6]);
        let result = cluster(points, k(3), &mut Pcg32::seed_from_u64(5));

        assert_eq!(result.iterations, 0);
        assert_eq!(result.cluster_sizes(), vec![6, 0, 0]);
        assert!(result.centroids.iter().all(|c| *c == Centroid::new(2.0, 2.0)));
    }

    #[test]
    fn test_separates_gaussian_blobs() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let noise = Normal::new(0.0, 0.5).unwrap();
        let mut points = vec![];
        for (blob, (cx, cy)) in [(0.0, 0.0), (20.0, 20.0)].into_iter().enumerate() {
            for _ in 0..50 {
                let x = cx + noise.sample(&mut rng);
                let y = cy + noise.sample(&mut rng);
                points.push(Point::with_metadata(x, y, blob));
            }
        }
        let initial = vec![Centroid::new(1.0, 1.0), Centroid::new(19.0, 19.0)];
        let result = KMeans::new(k(2)).cluster_from(points, initial);

        assert!(result.iterations < DEFAULT_MAX_ITERATIONS);
        for (i, members) in result.clusters.iter().enumerate() {
            assert_eq!(members.len(), 50);
            assert!(members.iter().all(|p| p.metadata == i));
        }
        assert!(result.centroids[0].x.abs() < 1.0);
        assert!((result.centroids[1].y - 20.0).abs() < 1.0);
    }

    #[test]
    fn test_centroids_are_member_means() {
        let result = cluster(sample_points(), k(3), &mut Pcg32::seed_from_u64(11));
        if result.iterations < DEFAULT_MAX_ITERATIONS {
            for (members, centroid) in result.clusters.iter().zip(&result.centroids) {
                if members.is_empty() {
                    continue;
                }
                #[expect(clippy::cast_precision_loss)]
                let n = members.len() as f64;
                let mx = members.iter().map(|p| p.x).sum::<f64>() / n;
                let my = members.iter().map(|p| p.y).sum::<f64>() / n;
                assert!((centroid.x - mx).abs() <= DEFAULT_CONVERGENCE_THRESHOLD);
                assert!((centroid.y - my).abs() <= DEFAULT_CONVERGENCE_THRESHOLD);
            }
        }
    }
}
