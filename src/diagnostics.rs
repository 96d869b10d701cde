use serde::Serialize;

use crate::constants::diagnostics as consts;
use crate::constants::schema;
use crate::record::{CellValue, IndexField, PropertyRecord};
use crate::types::{AdvisoryText, ColumnName};

/// Advisory output computed for a single identified property.
///
/// Both lists iterate in canonical column order and may be empty.
/// Serialize-only: diagnostics are produced for display, never read back.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Index columns whose value strictly exceeds the high-impact
    /// threshold. Missing index values never qualify.
    pub high_impact_indexes: Vec<IndexField>,
    /// Columns (`Beds` excluded) whose value is missing or numerically
    /// zero. Text columns qualify only when missing.
    pub missing_or_zero_fields: Vec<ColumnName>,
}

/// Compute diagnostics for one record.
///
/// Pure and deterministic. Callers gate invocation on a single-row view;
/// `FilteredView::diagnostics` does this for them.
pub fn annotate(record: &PropertyRecord) -> Diagnostics {
    let high_impact_indexes = IndexField::ALL
        .into_iter()
        .filter(|field| {
            record
                .index_value(*field)
                .is_some_and(|value| value > consts::HIGH_IMPACT_THRESHOLD)
        })
        .collect();

    let missing_or_zero_fields = schema::ALL_COLUMNS
        .into_iter()
        .filter(|column| *column != consts::COMPLETENESS_EXEMPT_COLUMN)
        .filter(|column| is_missing_or_zero(record, column))
        .collect();

    Diagnostics {
        high_impact_indexes,
        missing_or_zero_fields,
    }
}

/// A numeric zero counts as missing here. That conflates a genuine zero
/// measurement with absence of data; the behavior is kept for
/// compatibility with the upstream data preparation, where 0 marks
/// "no data" in the index and measurement columns.
fn is_missing_or_zero(record: &PropertyRecord, column: &str) -> bool {
    match record.cell(column) {
        Some(CellValue::Text(value)) => value.is_none(),
        Some(CellValue::Number(value)) => value.is_none_or(|number| number == 0.0),
        None => false,
    }
}

impl Diagnostics {
    /// Returns `true` when neither list has entries.
    pub fn is_empty(&self) -> bool {
        self.high_impact_indexes.is_empty() && self.missing_or_zero_fields.is_empty()
    }

    /// Rendered advisory sentences for the non-empty lists.
    ///
    /// Presentation layers typically show these after the static
    /// [`RISK_CATEGORY_NOTES`](crate::constants::diagnostics::RISK_CATEGORY_NOTES).
    pub fn advisories(&self) -> Vec<AdvisoryText> {
        let mut notes = Vec::new();
        if !self.high_impact_indexes.is_empty() {
            let joined = self
                .high_impact_indexes
                .iter()
                .map(|field| field.column_name())
                .collect::<Vec<_>>()
                .join(", ");
            notes.push(format!(
                "Be aware of the '{joined}' because of the high index(es), \
                 which will cause significant impact on estimating premium."
            ));
        }
        if !self.missing_or_zero_fields.is_empty() {
            notes.push(format!(
                "Be aware of and look up manually the following missing value(s): '{}'.",
                self.missing_or_zero_fields.join(", ")
            ));
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> PropertyRecord {
        PropertyRecord {
            address: Some("12 Oak St".to_string()),
            neighborhood: Some("Mission".to_string()),
            price: Some(900_000.0),
            premium: Some(1_844.0),
            year_built: Some(1927.0),
            sq_ft: Some(1_500.0),
            beds: Some(3.0),
            price_index: Some(0.5),
            sq_ft_index: Some(0.2),
            year_built_index: Some(0.9),
            fire_index: Some(0.3),
            high_risk_index: Some(0.4),
            medium_risk_index: Some(0.1),
            low_risk_index: Some(0.6),
        }
    }

    #[test]
    fn complete_low_index_record_yields_empty_diagnostics() {
        let diagnostics = annotate(&complete_record());
        assert!(diagnostics.is_empty());
        assert!(diagnostics.advisories().is_empty());
    }

    #[test]
    fn only_indexes_strictly_above_threshold_are_high_impact() {
        let record = PropertyRecord {
            price_index: Some(1.5),
            fire_index: Some(0.8),
            year_built_index: Some(1.0),
            ..complete_record()
        };
        let diagnostics = annotate(&record);
        assert_eq!(diagnostics.high_impact_indexes, vec![IndexField::PriceIndex]);
    }

    #[test]
    fn high_impact_indexes_keep_canonical_order() {
        let record = PropertyRecord {
            low_risk_index: Some(2.0),
            price_index: Some(1.2),
            fire_index: Some(3.5),
            ..complete_record()
        };
        let diagnostics = annotate(&record);
        assert_eq!(
            diagnostics.high_impact_indexes,
            vec![
                IndexField::PriceIndex,
                IndexField::FireIndex,
                IndexField::LowRiskIndex,
            ]
        );
    }

    #[test]
    fn missing_index_values_are_never_high_impact() {
        let record = PropertyRecord {
            price_index: None,
            ..complete_record()
        };
        let diagnostics = annotate(&record);
        assert!(diagnostics.high_impact_indexes.is_empty());
        assert_eq!(diagnostics.missing_or_zero_fields, vec!["Price_index"]);
    }

    #[test]
    fn zero_and_missing_report_identically_and_beds_is_exempt() {
        let record = PropertyRecord {
            sq_ft: Some(0.0),
            year_built: None,
            beds: None,
            ..complete_record()
        };
        let diagnostics = annotate(&record);
        assert_eq!(
            diagnostics.missing_or_zero_fields,
            vec!["Year_built", "Sq_ft"]
        );
    }

    #[test]
    fn text_columns_qualify_only_when_missing() {
        let record = PropertyRecord {
            address: None,
            ..complete_record()
        };
        let diagnostics = annotate(&record);
        assert_eq!(diagnostics.missing_or_zero_fields, vec!["Address"]);
    }

    #[test]
    fn advisories_render_both_sentences() {
        let record = PropertyRecord {
            fire_index: Some(1.4),
            high_risk_index: Some(2.1),
            premium: None,
            ..complete_record()
        };
        let notes = annotate(&record).advisories();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("'Fire_index, High_risk_index'"));
        assert!(notes[1].contains("missing value(s): 'Premium'"));
    }

    #[test]
    fn risk_category_notes_cover_all_event_tiers() {
        assert_eq!(consts::RISK_CATEGORY_NOTES.len(), 4);
        assert!(consts::RISK_CATEGORY_NOTES[0].starts_with("High risk events"));
        assert!(consts::RISK_CATEGORY_NOTES[3].contains("Fire_index"));
    }
}
