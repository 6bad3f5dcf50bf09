use serde::{Deserialize, Serialize};
use staffviz_cluster::{ClusterResult, Point};

use crate::{record::EmployeeTag, tally::CategoryTally};

/// Summary of one non-empty employee cluster, as shown under the scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProfile {
    /// 1-based cluster number (matches the chart legend)
    pub cluster: usize,
    pub size: usize,
    pub mean_satisfaction: f64,
    pub mean_income: f64,
    pub dominant_department: DepartmentCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub name: String,
    pub count: usize,
}

impl ClusterProfile {
    /// Profiles a single cluster; `None` if it has no members.
    ///
    /// The dominant department is the most frequent one; on a tie the
    /// department met first in the cluster wins.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_members(index: usize, members: &[Point<EmployeeTag>]) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        let n = members.len() as f64;
        let mean_satisfaction = members.iter().map(|p| p.x).sum::<f64>() / n;
        let mean_income = members.iter().map(|p| p.y).sum::<f64>() / n;

        let departments =
            CategoryTally::by_first_seen(members.iter().map(|p| &p.metadata.department));
        // max_by_key keeps the last maximum, so scan in reverse to keep the first
        let (name, &count) = departments
            .labels
            .iter()
            .zip(&departments.data)
            .rev()
            .max_by_key(|(_, count)| **count)?;

        Some(Self {
            cluster: index + 1,
            size: members.len(),
            mean_satisfaction,
            mean_income,
            dominant_department: DepartmentCount {
                name: name.clone(),
                count,
            },
        })
    }

    /// Profiles every non-empty cluster of a clustering result, in cluster order.
    #[must_use]
    pub fn from_result(result: &ClusterResult<EmployeeTag>) -> Vec<Self> {
        result
            .clusters
            .iter()
            .enumerate()
            .filter_map(|(i, members)| Self::from_members(i, members))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use staffviz_cluster::Centroid;

    use super::*;

    fn employee(x: f64, y: f64, department: &str) -> Point<EmployeeTag> {
        Point::with_metadata(
            x,
            y,
            EmployeeTag {
                department: department.to_owned(),
                performance: 3,
            },
        )
    }

    #[test]
    fn test_empty_cluster_has_no_profile() {
        assert_eq!(ClusterProfile::from_members(0, &[]), None);
    }

    #[test]
    fn test_means_and_dominant_department() {
        let members = [
            employee(1.0, 2000.0, "Sales"),
            employee(2.0, 3000.0, "R&D"),
            employee(3.0, 4000.0, "R&D"),
            employee(2.0, 3000.0, "HR"),
        ];
        let profile = ClusterProfile::from_members(2, &members).unwrap();
        assert_eq!(profile.cluster, 3);
        assert_eq!(profile.size, 4);
        assert_eq!(profile.mean_satisfaction, 2.0);
        assert_eq!(profile.mean_income, 3000.0);
        assert_eq!(
            profile.dominant_department,
            DepartmentCount {
                name: "R&D".to_owned(),
                count: 2
            }
        );
    }

    #[test]
    fn test_dominant_department_tie_keeps_first_seen() {
        let members = [
            employee(1.0, 1.0, "HR"),
            employee(1.0, 1.0, "Sales"),
            employee(1.0, 1.0, "Sales"),
            employee(1.0, 1.0, "HR"),
        ];
        let profile = ClusterProfile::from_members(0, &members).unwrap();
        assert_eq!(profile.dominant_department.name, "HR");
        assert_eq!(profile.dominant_department.count, 2);
    }

    #[test]
    fn test_from_result_skips_empty_clusters() {
        let result = ClusterResult {
            clusters: vec![
                vec![employee(1.0, 100.0, "Sales")],
                vec![],
                vec![employee(4.0, 900.0, "R&D"), employee(2.0, 700.0, "R&D")],
            ],
            centroids: vec![
                Centroid::new(1.0, 100.0),
                Centroid::new(0.0, 0.0),
                Centroid::new(3.0, 800.0),
            ],
            iterations: 1,
        };
        let profiles = ClusterProfile::from_result(&result);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].cluster, 1);
        assert_eq!(profiles[1].cluster, 3);
        assert_eq!(profiles[1].mean_satisfaction, 3.0);
        assert_eq!(profiles[1].mean_income, 800.0);
    }
}
