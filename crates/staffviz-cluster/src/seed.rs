use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for reproducible centroid initialization.
///
/// A 128-bit (16-byte) seed for the [`Pcg32`] generator that picks the initial
/// centroids. Clustering the same points with the same seed always produces
/// the same result, which makes a dashboard run replayable:
///
/// - The CLI prints the seed it used alongside the clustering
/// - Passing that seed back reproduces the clustering bit-for-bit
///
/// The textual form is 32 hexadecimal characters (big-endian).
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use rand::Rng as _;
/// use staffviz_cluster::{ClusterSeed, Point, cluster};
///
/// let seed: ClusterSeed = rand::rng().random();
/// let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(9.0, 9.0)];
/// let k = NonZeroUsize::new(2).unwrap();
///
/// let first = cluster(points.clone(), k, &mut seed.to_rng());
/// let second = cluster(points, k, &mut seed.to_rng());
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterSeed([u8; 16]);

/// Error returned when a seed string is not 32 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseClusterSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {value}")]
    Digits { value: String },
}

impl ClusterSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Builds the generator used for centroid initialization.
    #[must_use]
    pub fn to_rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for ClusterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for ClusterSeed {
    type Err = ParseClusterSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseClusterSeedError::Length { len: s.len() });
        }
        // from_str_radix would also accept a leading sign
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseClusterSeedError::Digits { value: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseClusterSeedError::Digits {
            value: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ClusterSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClusterSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `ClusterSeed` values with `rng.random()`.
impl Distribution<ClusterSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ClusterSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ClusterSeed(seed)
    }
}
