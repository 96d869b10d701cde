use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::correlation as consts;
use crate::record::{Dataset, IndexField};

/// Pearson outcome for one index column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Correlation {
    /// Defined coefficient in `[-1, 1]`.
    Coefficient(f64),
    /// Fewer than two valid pairs, or a constant column.
    Undefined,
}

impl Correlation {
    /// The raw coefficient, when defined.
    pub fn coefficient(self) -> Option<f64> {
        match self {
            Correlation::Coefficient(value) => Some(value),
            Correlation::Undefined => None,
        }
    }

    /// The coefficient rounded to display precision, when defined.
    pub fn rounded(self) -> Option<f64> {
        let factor = 10f64.powi(consts::DISPLAY_DECIMALS);
        self.coefficient().map(|value| (value * factor).round() / factor)
    }

    /// Returns `true` when a coefficient could be computed.
    pub fn is_defined(self) -> bool {
        matches!(self, Correlation::Coefficient(_))
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Coefficient(value) => {
                write!(f, "{value:.prec$}", prec = consts::DISPLAY_DECIMALS as usize)
            }
            Correlation::Undefined => f.write_str("undefined"),
        }
    }
}

/// Premium-vs-index correlation outcomes in canonical column order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    columns: IndexMap<String, Correlation>,
}

impl CorrelationReport {
    /// Outcome for one index column.
    pub fn get(&self, field: IndexField) -> Option<Correlation> {
        self.columns.get(field.column_name()).copied()
    }

    /// Per-column outcomes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Correlation)> + '_ {
        self.columns
            .iter()
            .map(|(column, outcome)| (column.as_str(), *outcome))
    }

    /// Rendered per-column summary lines in canonical order.
    pub fn summary_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(column, outcome)| {
                format!("Correlation coefficient between Premium and {column}: {outcome}")
            })
            .collect()
    }
}

/// Pairwise-complete `(premium, index)` observations in row order.
///
/// These are the scatter points a presentation layer plots for one index
/// column, and exactly the observations the coefficient is computed from.
pub fn paired_observations(dataset: &Dataset, field: IndexField) -> Vec<(f64, f64)> {
    dataset
        .records()
        .iter()
        .filter_map(|record| record.premium.zip(record.index_value(field)))
        .collect()
}

/// Pearson correlation between the premium column and every index column.
///
/// Computed over the entire dataset, never a filtered view; population-wide
/// coefficients are what make the number statistically meaningful. Rows
/// missing either value of a pair are dropped from that pair's computation
/// only. Columns with fewer than two valid pairs report
/// [`Correlation::Undefined`] instead of failing the report.
pub fn correlate(dataset: &Dataset) -> CorrelationReport {
    let mut columns = IndexMap::with_capacity(IndexField::ALL.len());
    for field in IndexField::ALL {
        let pairs = paired_observations(dataset, field);
        columns.insert(field.column_name().to_string(), pearson(&pairs));
    }
    CorrelationReport { columns }
}

fn pearson(pairs: &[(f64, f64)]) -> Correlation {
    if pairs.len() < consts::MIN_VALID_PAIRS {
        return Correlation::Undefined;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x < consts::VARIANCE_FLOOR || variance_y < consts::VARIANCE_FLOOR {
        return Correlation::Undefined;
    }

    let coefficient = covariance / (variance_x.sqrt() * variance_y.sqrt());
    Correlation::Coefficient(coefficient.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PropertyRecord;

    fn dataset_with_pairs(pairs: &[(Option<f64>, Option<f64>)]) -> Dataset {
        Dataset::new(
            pairs
                .iter()
                .map(|(premium, price_index)| PropertyRecord {
                    premium: *premium,
                    price_index: *price_index,
                    ..PropertyRecord::default()
                })
                .collect(),
        )
    }

    #[test]
    fn perfectly_increasing_pairs_correlate_to_one() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.1)),
            (Some(2_000.0), Some(0.2)),
            (Some(3_000.0), Some(0.3)),
        ]);
        let outcome = correlate(&dataset).get(IndexField::PriceIndex).unwrap();
        assert_eq!(outcome.rounded(), Some(1.0));
        assert_eq!(outcome.to_string(), "1.00");
    }

    #[test]
    fn inverse_pairs_correlate_to_negative_one() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.3)),
            (Some(2_000.0), Some(0.2)),
            (Some(3_000.0), Some(0.1)),
        ]);
        let outcome = correlate(&dataset).get(IndexField::PriceIndex).unwrap();
        assert_eq!(outcome.rounded(), Some(-1.0));
    }

    #[test]
    fn incomplete_rows_are_dropped_pairwise() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.1)),
            (None, Some(0.9)),
            (Some(2_000.0), None),
            (Some(3_000.0), Some(0.3)),
        ]);
        assert_eq!(
            paired_observations(&dataset, IndexField::PriceIndex),
            vec![(1_000.0, 0.1), (3_000.0, 0.3)]
        );
        let outcome = correlate(&dataset).get(IndexField::PriceIndex).unwrap();
        assert!(outcome.is_defined());
    }

    #[test]
    fn fewer_than_two_valid_pairs_is_undefined() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.1)),
            (None, Some(0.2)),
            (Some(3_000.0), None),
        ]);
        let outcome = correlate(&dataset).get(IndexField::PriceIndex).unwrap();
        assert_eq!(outcome, Correlation::Undefined);
        assert_eq!(outcome.to_string(), "undefined");
        assert_eq!(outcome.rounded(), None);
    }

    #[test]
    fn constant_columns_are_undefined() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.5)),
            (Some(2_000.0), Some(0.5)),
            (Some(3_000.0), Some(0.5)),
        ]);
        assert_eq!(
            correlate(&dataset).get(IndexField::PriceIndex),
            Some(Correlation::Undefined)
        );
    }

    #[test]
    fn coefficients_stay_within_unit_interval() {
        let dataset = dataset_with_pairs(&[
            (Some(1_000.0), Some(0.4)),
            (Some(1_500.0), Some(0.1)),
            (Some(2_200.0), Some(0.9)),
            (Some(2_900.0), Some(0.2)),
        ]);
        let outcome = correlate(&dataset).get(IndexField::PriceIndex).unwrap();
        let value = outcome.coefficient().unwrap();
        assert!((-1.0..=1.0).contains(&value));
    }

    #[test]
    fn report_iterates_every_index_column_in_canonical_order() {
        let dataset = dataset_with_pairs(&[(Some(1_000.0), Some(0.1))]);
        let report = correlate(&dataset);
        let columns: Vec<&str> = report.iter().map(|(column, _)| column).collect();
        assert_eq!(
            columns,
            vec![
                "Price_index",
                "Sq_ft_index",
                "Year_built_index",
                "Fire_index",
                "High_risk_index",
                "Medium_risk_index",
                "Low_risk_index",
            ]
        );
        assert_eq!(report.summary_lines().len(), 7);
        assert!(
            report.summary_lines()[0]
                .starts_with("Correlation coefficient between Premium and Price_index:")
        );
    }
}
