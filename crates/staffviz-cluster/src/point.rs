use serde::{Deserialize, Serialize};

/// A 2-D point carrying opaque metadata.
///
/// The clustering engine reads only `x` and `y`. The metadata is moved through
/// clustering untouched and is serialized next to the coordinates, so a point
/// tagged with `{department, performance}` becomes
/// `{"x": .., "y": .., "department": .., "performance": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<M = ()> {
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub metadata: M,
}

impl Point {
    /// Creates a point without metadata.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, metadata: () }
    }
}

impl<M> Point<M> {
    /// Creates a point tagged with `metadata`.
    #[must_use]
    pub const fn with_metadata(x: f64, y: f64, metadata: M) -> Self {
        Self { x, y, metadata }
    }

    /// Euclidean distance from this point to `centroid`.
    #[must_use]
    pub fn distance_to(&self, centroid: &Centroid) -> f64 {
        let dx = self.x - centroid.x;
        let dy = self.y - centroid.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The center of a cluster.
///
/// Unlike [`Point`], a centroid never carries metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if this centroid moved more than `threshold` along
    /// either axis relative to `previous`.
    #[must_use]
    pub fn moved_from(&self, previous: &Centroid, threshold: f64) -> bool {
        (self.x - previous.x).abs() > threshold || (self.y - previous.y).abs() > threshold
    }
}

impl<M> From<&Point<M>> for Centroid {
    fn from(point: &Point<M>) -> Self {
        Self::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        department: String,
        performance: u32,
    }

    #[test]
    fn test_distance() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(p.distance_to(&Centroid::new(3.0, 4.0)), 5.0);
        assert_eq!(p.distance_to(&Centroid::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_centroid_from_point_drops_metadata() {
        let p = Point::with_metadata(1.5, -2.0, "sales");
        assert_eq!(Centroid::from(&p), Centroid::new(1.5, -2.0));
    }

    #[test]
    fn test_moved_from_is_per_axis() {
        let prev = Centroid::new(1.0, 1.0);
        assert!(!Centroid::new(1.0005, 0.9995).moved_from(&prev, 0.001));
        assert!(Centroid::new(1.01, 1.0).moved_from(&prev, 0.001));
        assert!(Centroid::new(1.0, 0.98).moved_from(&prev, 0.001));
    }

    #[test]
    fn test_metadata_flattened_in_json() {
        let p = Point::with_metadata(
            3.0,
            5993.0,
            Tag {
                department: "Sales".to_owned(),
                performance: 3,
            },
        );
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "x": 3.0,
                "y": 5993.0,
                "department": "Sales",
                "performance": 3,
            })
        );

        let back: Point<Tag> = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
