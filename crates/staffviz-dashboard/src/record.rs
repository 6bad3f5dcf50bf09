//! Employee records as handed over by the ingestion step
//!
//! Rows arrive already parsed but loosely typed: any column may be missing,
//! empty, or hold a value of the wrong type. This module defines the row shape, the validity rule the dashboard
//! applies before any aggregation, and the conversion to clustering points.
//!
//! # Serialization
//!
//! Field names follow the source columns, so a record file looks like:
//!
//! ```json
//! [
//!   {
//!     "Age": 41,
//!     "Department": "Sales",
//!     "JobSatisfaction": 4,
//!     "MonthlyIncome": 5993,
//!     "PerformanceRating": 3
//!   }
//! ]
//! ```
//!
//! Columns other than the four used here are ignored. A cell that cannot be
//! read as its column's type (an empty string, `true`, `"n/a"`) becomes `None`
//! so the row is dropped by validation instead of failing the whole batch.
//! Numeric text such as `"5993"` is read as a number, and the integer columns
//! accept integral floats (`4.0`).

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use staffviz_cluster::Point;

/// One parsed row of the employee table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_level")]
    pub job_satisfaction: Option<u32>,
    #[serde(default, deserialize_with = "lenient_level")]
    pub performance_rating: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub monthly_income: Option<f64>,
}

/// Any JSON value a record cell may hold.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Cell {
    fn into_number(self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Text(text) => text.trim().parse().ok(),
            Cell::Other(_) => None,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Cell::deserialize(deserializer)? {
        Cell::Text(text) => Ok(Some(text)),
        Cell::Number(_) | Cell::Other(_) => Ok(None),
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Cell::deserialize(deserializer)?.into_number())
}

/// Reads a non-negative integral cell; fractional or out-of-range values are `None`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_level<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let level = Cell::deserialize(deserializer)?
        .into_number()
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n));
    Ok(level.map(|n| n as u32))
}

/// A record that passed [`EmployeeRecord::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub department: String,
    pub job_satisfaction: u32,
    pub performance_rating: u32,
    pub monthly_income: f64,
}

/// Descriptive fields carried by each clustering point for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTag {
    pub department: String,
    pub performance: u32,
}

impl EmployeeRecord {
    /// Returns the record's fields if all four are usable.
    ///
    /// A record is valid when the department is non-empty, satisfaction and
    /// rating are present and non-zero, and the income is present, non-zero
    /// and not NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffviz_dashboard::record::EmployeeRecord;
    ///
    /// let record = EmployeeRecord {
    ///     department: Some("Sales".to_owned()),
    ///     job_satisfaction: Some(4),
    ///     performance_rating: Some(3),
    ///     monthly_income: Some(5993.0),
    /// };
    /// assert!(record.validate().is_some());
    ///
    /// let missing_income = EmployeeRecord {
    ///     monthly_income: None,
    ///     ..record
    /// };
    /// assert!(missing_income.validate().is_none());
    /// ```
    #[must_use]
    pub fn validate(&self) -> Option<ValidRecord> {
        let department = self.department.as_deref().filter(|d| !d.is_empty())?;
        let job_satisfaction = self.job_satisfaction.filter(|&s| s != 0)?;
        let performance_rating = self.performance_rating.filter(|&r| r != 0)?;
        let monthly_income = self
            .monthly_income
            .filter(|&income| income != 0.0 && !income.is_nan())?;
        Some(ValidRecord {
            department: department.to_owned(),
            job_satisfaction,
            performance_rating,
            monthly_income,
        })
    }
}

impl ValidRecord {
    /// Keeps only the valid records, in input order.
    pub fn filter_valid<'a, I>(records: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a EmployeeRecord>,
    {
        records
            .into_iter()
            .filter_map(EmployeeRecord::validate)
            .collect()
    }

    /// Builds the clustering point: job satisfaction on x, monthly income on y.
    #[must_use]
    pub fn to_point(&self) -> Point<EmployeeTag> {
        Point::with_metadata(
            f64::from(self.job_satisfaction),
            self.monthly_income,
            EmployeeTag {
                department: self.department.clone(),
                performance: self.performance_rating,
            },
        )
    }
}
