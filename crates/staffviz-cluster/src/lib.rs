//! K-means clustering over 2-D points with attached metadata.
//!
//! This crate groups the dashboard's employee points (job satisfaction vs.
//! monthly income) into `k` clusters:
//!
//! - [`Point`] - Coordinates plus opaque metadata that rides along untouched
//! - [`Centroid`] - A cluster center (coordinates only)
//! - [`KMeans`] - Run parameters (k, iteration bound, convergence threshold)
//! - [`ClusterResult`] - Clusters, centroids and iteration count of one run
//! - [`ClusterSeed`] - Seed for reproducible centroid initialization
//!
//! # Randomness
//!
//! Initialization is the only random step. The generator is always passed in
//! by the caller, so each run owns its state and concurrent runs never share a
//! generator. Pass `rand::rng()` for a fresh clustering each time, or
//! [`ClusterSeed::to_rng`] to replay one.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use staffviz_cluster::{ClusterSeed, Point, cluster};
//!
//! let points = vec![
//!     Point::with_metadata(1.0, 2500.0, "R&D"),
//!     Point::with_metadata(4.0, 19000.0, "Sales"),
//!     Point::with_metadata(3.0, 2700.0, "R&D"),
//! ];
//! let seed = ClusterSeed::from_bytes([7; 16]);
//! let result = cluster(points, NonZeroUsize::new(2).unwrap(), &mut seed.to_rng());
//!
//! assert_eq!(result.clusters.len(), 2);
//! assert_eq!(result.centroids.len(), 2);
//! ```

pub use self::{kmeans::*, point::*, seed::*};

mod kmeans;
mod point;
mod seed;
