use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Counts per category, shaped for a bar or pie chart.
///
/// `labels[i]` is the display label of the i-th category and `data[i]` its
/// count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

impl CategoryTally {
    /// Counts occurrences of each distinct key, ordered by first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffviz_dashboard::tally::CategoryTally;
    ///
    /// let tally = CategoryTally::by_first_seen(["Sales", "R&D", "Sales"]);
    /// assert_eq!(tally.labels, ["Sales", "R&D"]);
    /// assert_eq!(tally.data, [2, 1]);
    /// ```
    pub fn by_first_seen<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = HashMap::<String, usize>::new();
        let mut tally = Self::default();
        for key in keys {
            let key = key.as_ref();
            if let Some(&i) = index.get(key) {
                tally.data[i] += 1;
            } else {
                index.insert(key.to_owned(), tally.labels.len());
                tally.labels.push(key.to_owned());
                tally.data.push(1);
            }
        }
        tally
    }

    /// Counts keys into a fixed set of buckets.
    ///
    /// Every bucket appears in the output, in the given order, even with a
    /// zero count. Keys that match no bucket are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffviz_dashboard::tally::CategoryTally;
    ///
    /// let tally = CategoryTally::by_buckets(&[(1, "Low"), (2, "High")], [2, 2, 7]);
    /// assert_eq!(tally.labels, ["Low", "High"]);
    /// assert_eq!(tally.data, [0, 2]);
    /// ```
    pub fn by_buckets<K, I>(buckets: &[(K, &str)], keys: I) -> Self
    where
        K: PartialEq,
        I: IntoIterator<Item = K>,
    {
        let mut data = vec![0; buckets.len()];
        for key in keys {
            if let Some(i) = buckets.iter().position(|(bucket, _)| *bucket == key) {
                data[i] += 1;
            }
        }
        Self {
            labels: buckets.iter().map(|(_, label)| (*label).to_owned()).collect(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_empty() {
        let tally = CategoryTally::by_first_seen(Vec::<String>::new());
        assert!(tally.labels.is_empty());
        assert!(tally.data.is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let departments = [
            "Sales",
            "Research & Development",
            "Research & Development",
            "Human Resources",
            "Sales",
            "Research & Development",
        ];
        let tally = CategoryTally::by_first_seen(departments);
        assert_eq!(
            tally.labels,
            ["Sales", "Research & Development", "Human Resources"]
        );
        assert_eq!(tally.data, [2, 3, 1]);
    }

    #[test]
    fn test_buckets_keep_zero_counts() {
        let buckets = [(1, "a"), (2, "b"), (3, "c"), (4, "d")];
        let tally = CategoryTally::by_buckets(&buckets, [4, 4, 1, 4]);
        assert_eq!(tally.labels, ["a", "b", "c", "d"]);
        assert_eq!(tally.data, [1, 0, 0, 3]);
    }

    #[test]
    fn test_buckets_ignore_unknown_keys() {
        let tally = CategoryTally::by_buckets(&[(1, "one")], [0, 5, 1]);
        assert_eq!(tally.data, [1]);
    }
}
