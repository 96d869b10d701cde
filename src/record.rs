use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::schema;
use crate::types::{ColumnName, NeighborhoodName};

/// The seven derived index columns, in canonical report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexField {
    /// Relative price contribution.
    PriceIndex,
    /// Relative square-footage contribution.
    SqFtIndex,
    /// Relative construction-age contribution.
    YearBuiltIndex,
    /// Relative fire-incident frequency.
    FireIndex,
    /// Relative high-risk crime frequency.
    HighRiskIndex,
    /// Relative medium-risk crime frequency.
    MediumRiskIndex,
    /// Relative low-risk crime frequency.
    LowRiskIndex,
}

impl IndexField {
    /// Every index field in canonical report order.
    pub const ALL: [IndexField; 7] = [
        IndexField::PriceIndex,
        IndexField::SqFtIndex,
        IndexField::YearBuiltIndex,
        IndexField::FireIndex,
        IndexField::HighRiskIndex,
        IndexField::MediumRiskIndex,
        IndexField::LowRiskIndex,
    ];

    /// Header name of the column backing this field.
    pub fn column_name(self) -> ColumnName {
        match self {
            IndexField::PriceIndex => schema::COL_PRICE_INDEX,
            IndexField::SqFtIndex => schema::COL_SQ_FT_INDEX,
            IndexField::YearBuiltIndex => schema::COL_YEAR_BUILT_INDEX,
            IndexField::FireIndex => schema::COL_FIRE_INDEX,
            IndexField::HighRiskIndex => schema::COL_HIGH_RISK_INDEX,
            IndexField::MediumRiskIndex => schema::COL_MEDIUM_RISK_INDEX,
            IndexField::LowRiskIndex => schema::COL_LOW_RISK_INDEX,
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One row of the property table.
///
/// Missing-ness is modeled per field: a structurally absent cell, the
/// literal `None` token, and an uncoercible cell all normalize to `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Street address.
    pub address: Option<String>,
    /// Neighborhood name (categorical).
    pub neighborhood: Option<NeighborhoodName>,
    /// Listing price in dollars.
    pub price: Option<f64>,
    /// Modeled annual insurance premium in dollars.
    pub premium: Option<f64>,
    /// Construction year.
    pub year_built: Option<f64>,
    /// Interior square footage.
    pub sq_ft: Option<f64>,
    /// Bedroom count; excluded from completeness checks.
    pub beds: Option<f64>,
    /// Relative price contribution score.
    pub price_index: Option<f64>,
    /// Relative square-footage contribution score.
    pub sq_ft_index: Option<f64>,
    /// Relative construction-age contribution score.
    pub year_built_index: Option<f64>,
    /// Relative fire-incident frequency score.
    pub fire_index: Option<f64>,
    /// Relative high-risk crime frequency score.
    pub high_risk_index: Option<f64>,
    /// Relative medium-risk crime frequency score.
    pub medium_risk_index: Option<f64>,
    /// Relative low-risk crime frequency score.
    pub low_risk_index: Option<f64>,
}

/// A dynamically addressed cell, used by column-driven completeness checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellValue<'a> {
    /// A text column's cell.
    Text(Option<&'a str>),
    /// A numeric column's cell.
    Number(Option<f64>),
}

impl PropertyRecord {
    /// Value of the given index column.
    pub fn index_value(&self, field: IndexField) -> Option<f64> {
        match field {
            IndexField::PriceIndex => self.price_index,
            IndexField::SqFtIndex => self.sq_ft_index,
            IndexField::YearBuiltIndex => self.year_built_index,
            IndexField::FireIndex => self.fire_index,
            IndexField::HighRiskIndex => self.high_risk_index,
            IndexField::MediumRiskIndex => self.medium_risk_index,
            IndexField::LowRiskIndex => self.low_risk_index,
        }
    }

    /// Look up a cell by canonical column name.
    ///
    /// Returns `None` for names outside the fixed schema.
    pub fn cell(&self, column: &str) -> Option<CellValue<'_>> {
        let cell = match column {
            schema::COL_ADDRESS => CellValue::Text(self.address.as_deref()),
            schema::COL_NEIGHBORHOOD => CellValue::Text(self.neighborhood.as_deref()),
            schema::COL_PRICE => CellValue::Number(self.price),
            schema::COL_PREMIUM => CellValue::Number(self.premium),
            schema::COL_YEAR_BUILT => CellValue::Number(self.year_built),
            schema::COL_SQ_FT => CellValue::Number(self.sq_ft),
            schema::COL_BEDS => CellValue::Number(self.beds),
            schema::COL_PRICE_INDEX => CellValue::Number(self.price_index),
            schema::COL_SQ_FT_INDEX => CellValue::Number(self.sq_ft_index),
            schema::COL_YEAR_BUILT_INDEX => CellValue::Number(self.year_built_index),
            schema::COL_FIRE_INDEX => CellValue::Number(self.fire_index),
            schema::COL_HIGH_RISK_INDEX => CellValue::Number(self.high_risk_index),
            schema::COL_MEDIUM_RISK_INDEX => CellValue::Number(self.medium_risk_index),
            schema::COL_LOW_RISK_INDEX => CellValue::Number(self.low_risk_index),
            _ => return None,
        };
        Some(cell)
    }
}

/// Observed min/max of one numeric column over the non-missing rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl ValueBounds {
    fn fold(bounds: Option<ValueBounds>, value: Option<f64>) -> Option<ValueBounds> {
        match (bounds, value) {
            (current, None) => current,
            (None, Some(value)) => Some(ValueBounds {
                min: value,
                max: value,
            }),
            (Some(current), Some(value)) => Some(ValueBounds {
                min: current.min.min(value),
                max: current.max.max(value),
            }),
        }
    }
}

/// Min/max of the range-filterable columns, used to seed default filter
/// ranges in whatever controls the presentation layer exposes.
///
/// A column with no non-missing values has no bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetBounds {
    /// Observed price bounds.
    pub price: Option<ValueBounds>,
    /// Observed construction-year bounds.
    pub year_built: Option<ValueBounds>,
    /// Observed square-footage bounds.
    pub sq_ft: Option<ValueBounds>,
}

/// Immutable, loaded property table plus derived filter-seeding bounds.
///
/// A dataset never changes after load; filtering derives views over it and
/// correlation reads it in place. Share it across sessions behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<PropertyRecord>,
    bounds: DatasetBounds,
}

impl Dataset {
    /// Build a dataset from normalized records, deriving bounds.
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        let bounds = records
            .iter()
            .fold(DatasetBounds::default(), |bounds, record| DatasetBounds {
                price: ValueBounds::fold(bounds.price, record.price),
                year_built: ValueBounds::fold(bounds.year_built, record.year_built),
                sq_ft: ValueBounds::fold(bounds.sq_ft, record.sq_ft),
            });
        Self { records, bounds }
    }

    /// All records in source order.
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derived min/max of the range-filterable columns.
    pub fn bounds(&self) -> &DatasetBounds {
        &self.bounds
    }

    /// Distinct non-missing neighborhood names in first-seen order.
    pub fn neighborhoods(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(name) = record.neighborhood.as_deref()
                && !seen.contains(&name)
            {
                seen.push(name);
            }
        }
        seen
    }
}
