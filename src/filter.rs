use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, annotate};
use crate::record::{Dataset, PropertyRecord};
use crate::types::NeighborhoodName;

/// Neighborhood membership constraint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum NeighborhoodSelection {
    /// No restriction.
    #[default]
    All,
    /// Restrict to rows whose neighborhood exactly matches one of these
    /// names. Rows with a missing neighborhood never match.
    Only(Vec<NeighborhoodName>),
}

impl NeighborhoodSelection {
    fn matches(&self, neighborhood: Option<&str>) -> bool {
        match self {
            NeighborhoodSelection::All => true,
            NeighborhoodSelection::Only(names) => {
                neighborhood.is_some_and(|value| names.iter().any(|name| name == value))
            }
        }
    }
}

/// Inclusive numeric bound applied to one column.
///
/// A row missing the bounded field fails the bound; only an absent
/// `RangeFilter` (the `None` side of `Option<RangeFilter>`) admits
/// missing values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl RangeFilter {
    /// Build an inclusive `[min, max]` bound.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn admits(&self, value: Option<f64>) -> bool {
        value.is_some_and(|value| value >= self.min && value <= self.max)
    }
}

fn range_admits(range: Option<&RangeFilter>, value: Option<f64>) -> bool {
    match range {
        None => true,
        Some(range) => range.admits(value),
    }
}

/// One filter pass's constraint set, supplied by the presentation layer.
///
/// The default value is fully unrestricted: every row of a dataset passes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConstraints {
    /// Neighborhood membership constraint.
    pub neighborhoods: NeighborhoodSelection,
    /// Case-insensitive address substring. `None` or an empty string
    /// applies no predicate; otherwise rows with a missing address never
    /// match.
    pub address_substring: Option<String>,
    /// Inclusive price bound, or `None` for unconstrained.
    pub price_range: Option<RangeFilter>,
    /// Inclusive construction-year bound, or `None` for unconstrained.
    pub year_built_range: Option<RangeFilter>,
    /// Inclusive square-footage bound, or `None` for unconstrained.
    pub sq_ft_range: Option<RangeFilter>,
}

impl FilterConstraints {
    /// Constraints that admit every row.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Restrict to the given neighborhood names.
    pub fn with_neighborhoods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NeighborhoodName>,
    {
        self.neighborhoods =
            NeighborhoodSelection::Only(names.into_iter().map(Into::into).collect());
        self
    }

    /// Require the address to contain `needle`, case-insensitively.
    pub fn with_address_substring(mut self, needle: impl Into<String>) -> Self {
        self.address_substring = Some(needle.into());
        self
    }

    /// Bound the price column to `[min, max]`.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(RangeFilter::new(min, max));
        self
    }

    /// Bound the construction-year column to `[min, max]`.
    pub fn with_year_built_range(mut self, min: f64, max: f64) -> Self {
        self.year_built_range = Some(RangeFilter::new(min, max));
        self
    }

    /// Bound the square-footage column to `[min, max]`.
    pub fn with_sq_ft_range(mut self, min: f64, max: f64) -> Self {
        self.sq_ft_range = Some(RangeFilter::new(min, max));
        self
    }

    /// Address needle normalized for matching, when one applies.
    fn address_needle(&self) -> Option<String> {
        self.address_substring
            .as_deref()
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
    }
}

impl Dataset {
    /// Apply `constraints` as a strict conjunction, preserving row order.
    ///
    /// Predicates narrow in sequence: neighborhood membership, address
    /// substring, price range, year range, footage range. The cheap
    /// categorical checks run first; since all predicates are independent
    /// the order never changes the result set. Filtering has no error
    /// path and never mutates the dataset; an empty view is a valid
    /// outcome.
    pub fn filter(&self, constraints: &FilterConstraints) -> FilteredView<'_> {
        let needle = constraints.address_needle();
        let rows = self
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                constraints
                    .neighborhoods
                    .matches(record.neighborhood.as_deref())
            })
            .filter(|(_, record)| match needle.as_deref() {
                None => true,
                Some(needle) => record
                    .address
                    .as_deref()
                    .is_some_and(|address| address.to_lowercase().contains(needle)),
            })
            .filter(|(_, record)| range_admits(constraints.price_range.as_ref(), record.price))
            .filter(|(_, record)| {
                range_admits(constraints.year_built_range.as_ref(), record.year_built)
            })
            .filter(|(_, record)| range_admits(constraints.sq_ft_range.as_ref(), record.sq_ft))
            .map(|(idx, _)| idx)
            .collect();
        FilteredView { dataset: self, rows }
    }
}

/// Order-preserving subset of dataset rows produced by one filter pass.
///
/// An empty view is a valid outcome. "No filter has run yet" is expressed
/// by the absence of a view (callers keep `Option<FilteredView>`); a view
/// value always means a filter pass completed.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when no row matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source-order indices of the matching rows.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    /// Matching records in source order.
    pub fn records(&self) -> impl Iterator<Item = &'a PropertyRecord> + '_ {
        self.rows.iter().map(|idx| &self.dataset.records()[*idx])
    }

    /// The single matching record, when the view narrowed to exactly one.
    pub fn single(&self) -> Option<&'a PropertyRecord> {
        match self.rows.as_slice() {
            [idx] => Some(&self.dataset.records()[*idx]),
            _ => None,
        }
    }

    /// Diagnostics for the single matching record.
    ///
    /// Produced if and only if exactly one row matched; advisory notes are
    /// only actionable for a single identified property.
    pub fn diagnostics(&self) -> Option<Diagnostics> {
        self.single().map(annotate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        address: &str,
        neighborhood: &str,
        price: f64,
        year_built: f64,
        sq_ft: f64,
    ) -> PropertyRecord {
        PropertyRecord {
            address: Some(address.to_string()),
            neighborhood: Some(neighborhood.to_string()),
            price: Some(price),
            premium: Some(1_200.0),
            year_built: Some(year_built),
            sq_ft: Some(sq_ft),
            ..PropertyRecord::default()
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            record("12 Oak St", "Mission", 900_000.0, 1927.0, 1_500.0),
            record("48 Pine Ave", "Sunset", 1_400_000.0, 1962.0, 2_100.0),
            record("7 Oakdale Rd", "Mission", 750_000.0, 1985.0, 1_100.0),
        ])
    }

    #[test]
    fn unrestricted_constraints_reproduce_the_dataset_in_order() {
        let dataset = sample_dataset();
        let view = dataset.filter(&FilterConstraints::unrestricted());
        assert_eq!(view.len(), dataset.len());
        assert_eq!(view.row_indices(), &[0, 1, 2]);
        assert!(
            view.records()
                .zip(dataset.records())
                .all(|(filtered, source)| filtered == source)
        );
    }

    #[test]
    fn neighborhood_selection_is_exact_and_excludes_missing() {
        let mut records = sample_dataset().records().to_vec();
        records.push(PropertyRecord::default());
        let dataset = Dataset::new(records);

        let view = dataset.filter(&FilterConstraints::unrestricted().with_neighborhoods(["Mission"]));
        assert_eq!(view.row_indices(), &[0, 2]);

        let lowercase =
            dataset.filter(&FilterConstraints::unrestricted().with_neighborhoods(["mission"]));
        assert!(lowercase.is_empty());
    }

    #[test]
    fn address_substring_is_case_insensitive_and_skips_missing_addresses() {
        let mut records = vec![PropertyRecord::default()];
        records.extend(sample_dataset().records().to_vec());
        let dataset = Dataset::new(records);

        let view = dataset.filter(&FilterConstraints::unrestricted().with_address_substring("oak"));
        assert_eq!(view.row_indices(), &[1, 3]);

        let empty_needle =
            dataset.filter(&FilterConstraints::unrestricted().with_address_substring(""));
        assert_eq!(empty_needle.len(), dataset.len());
    }

    #[test]
    fn range_bounds_are_inclusive_and_exclude_missing_values() {
        let mut records = sample_dataset().records().to_vec();
        records.push(PropertyRecord {
            address: Some("99 Fog Ln".to_string()),
            neighborhood: Some("Sunset".to_string()),
            price: None,
            ..PropertyRecord::default()
        });
        let dataset = Dataset::new(records);

        let view =
            dataset.filter(&FilterConstraints::unrestricted().with_price_range(750_000.0, 900_000.0));
        assert_eq!(view.row_indices(), &[0, 2]);

        let unbounded = dataset.filter(&FilterConstraints::unrestricted());
        assert_eq!(unbounded.len(), 4);
    }

    #[test]
    fn conjunction_is_strict_across_predicates() {
        let dataset = sample_dataset();
        let constraints = FilterConstraints::unrestricted()
            .with_neighborhoods(["Mission"])
            .with_address_substring("oak")
            .with_price_range(800_000.0, 1_000_000.0)
            .with_year_built_range(1900.0, 1950.0)
            .with_sq_ft_range(1_000.0, 2_000.0);
        let view = dataset.filter(&constraints);
        assert_eq!(view.row_indices(), &[0]);

        // Row 2 passes every predicate except the price range.
        let no_price = dataset.filter(
            &FilterConstraints::unrestricted()
                .with_neighborhoods(["Mission"])
                .with_address_substring("oak"),
        );
        assert_eq!(no_price.row_indices(), &[0, 2]);
    }

    #[test]
    fn filtering_is_deterministic() {
        let dataset = sample_dataset();
        let constraints = FilterConstraints::unrestricted().with_neighborhoods(["Mission"]);
        assert_eq!(
            dataset.filter(&constraints).row_indices(),
            dataset.filter(&constraints).row_indices()
        );
    }

    #[test]
    fn single_yields_a_record_only_for_one_row_views() {
        let dataset = sample_dataset();

        let none = dataset.filter(&FilterConstraints::unrestricted().with_neighborhoods(["Marina"]));
        assert!(none.single().is_none());
        assert!(none.diagnostics().is_none());

        let many = dataset.filter(&FilterConstraints::unrestricted());
        assert!(many.single().is_none());
        assert!(many.diagnostics().is_none());

        let one = dataset.filter(&FilterConstraints::unrestricted().with_address_substring("pine"));
        assert_eq!(one.len(), 1);
        assert_eq!(one.single().unwrap().address.as_deref(), Some("48 Pine Ave"));
        assert!(one.diagnostics().is_some());
    }
}
