use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::constants::schema;
use crate::errors::EngineError;
use crate::record::{Dataset, PropertyRecord};

/// Resolved header positions for the fixed schema.
struct ColumnLayout {
    address: usize,
    neighborhood: usize,
    price: usize,
    premium: usize,
    year_built: usize,
    sq_ft: usize,
    beds: Option<usize>,
    price_index: usize,
    sq_ft_index: usize,
    year_built_index: usize,
    fire_index: usize,
    high_risk_index: usize,
    medium_risk_index: usize,
    low_risk_index: usize,
}

impl ColumnLayout {
    /// Validate the header and record where each schema column lives.
    ///
    /// All required columns are reported together so a caller sees the full
    /// extent of a schema mismatch in one error.
    fn resolve(headers: &StringRecord) -> Result<Self, EngineError> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let missing: Vec<String> = schema::REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::MissingColumns { columns: missing });
        }

        let required = |name: &str| position(name).expect("required column present");
        Ok(Self {
            address: required(schema::COL_ADDRESS),
            neighborhood: required(schema::COL_NEIGHBORHOOD),
            price: required(schema::COL_PRICE),
            premium: required(schema::COL_PREMIUM),
            year_built: required(schema::COL_YEAR_BUILT),
            sq_ft: required(schema::COL_SQ_FT),
            beds: position(schema::COL_BEDS),
            price_index: required(schema::COL_PRICE_INDEX),
            sq_ft_index: required(schema::COL_SQ_FT_INDEX),
            year_built_index: required(schema::COL_YEAR_BUILT_INDEX),
            fire_index: required(schema::COL_FIRE_INDEX),
            high_risk_index: required(schema::COL_HIGH_RISK_INDEX),
            medium_risk_index: required(schema::COL_MEDIUM_RISK_INDEX),
            low_risk_index: required(schema::COL_LOW_RISK_INDEX),
        })
    }

    fn record_from_row(&self, row: &StringRecord, line: usize) -> PropertyRecord {
        PropertyRecord {
            address: text_cell(row, self.address).map(str::to_string),
            neighborhood: text_cell(row, self.neighborhood).map(str::to_string),
            price: currency_cell(row, self.price, schema::COL_PRICE, line),
            premium: currency_cell(row, self.premium, schema::COL_PREMIUM, line),
            year_built: numeric_cell(row, self.year_built, schema::COL_YEAR_BUILT, line),
            sq_ft: numeric_cell(row, self.sq_ft, schema::COL_SQ_FT, line),
            beds: self
                .beds
                .and_then(|idx| numeric_cell(row, idx, schema::COL_BEDS, line)),
            price_index: numeric_cell(row, self.price_index, schema::COL_PRICE_INDEX, line),
            sq_ft_index: numeric_cell(row, self.sq_ft_index, schema::COL_SQ_FT_INDEX, line),
            year_built_index: numeric_cell(
                row,
                self.year_built_index,
                schema::COL_YEAR_BUILT_INDEX,
                line,
            ),
            fire_index: numeric_cell(row, self.fire_index, schema::COL_FIRE_INDEX, line),
            high_risk_index: numeric_cell(
                row,
                self.high_risk_index,
                schema::COL_HIGH_RISK_INDEX,
                line,
            ),
            medium_risk_index: numeric_cell(
                row,
                self.medium_risk_index,
                schema::COL_MEDIUM_RISK_INDEX,
                line,
            ),
            low_risk_index: numeric_cell(row, self.low_risk_index, schema::COL_LOW_RISK_INDEX, line),
        }
    }
}

/// Raw cell text with missing-value normalization applied.
///
/// An absent cell, an empty cell, and the literal `None` token are treated
/// identically.
fn text_cell(row: &StringRecord, idx: usize) -> Option<&str> {
    let raw = row.get(idx)?;
    if raw.is_empty() || raw == schema::MISSING_TOKEN {
        None
    } else {
        Some(raw)
    }
}

/// Coerce a plain numeric cell, degrading to missing on failure.
fn numeric_cell(row: &StringRecord, idx: usize, column: &str, line: usize) -> Option<f64> {
    let raw = text_cell(row, idx)?;
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(column, line, value = raw, "cell failed numeric coercion, storing as missing");
            None
        }
    }
}

/// Coerce a currency-formatted cell (`$1,234,567`), degrading to missing on
/// failure.
fn currency_cell(row: &StringRecord, idx: usize, column: &str, line: usize) -> Option<f64> {
    let raw = text_cell(row, idx)?;
    let stripped: String = raw
        .chars()
        .filter(|ch| *ch != schema::CURRENCY_SYMBOL && *ch != schema::THOUSANDS_SEPARATOR)
        .collect();
    match stripped.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(column, line, value = raw, "cell failed currency coercion, storing as missing");
            None
        }
    }
}

impl Dataset {
    /// Load and normalize a property table from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset, EngineError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load and normalize a property table from any CSV byte stream.
    ///
    /// The header must contain every required schema column; cell-level
    /// problems never fail the load and instead produce missing values.
    pub fn from_reader(reader: impl io::Read) -> Result<Dataset, EngineError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let layout = ColumnLayout::resolve(&headers)?;

        let mut records = Vec::new();
        for (offset, row) in csv_reader.records().enumerate() {
            let row = row?;
            // Header occupies line 1; data rows start at line 2.
            records.push(layout.record_from_row(&row, offset + 2));
        }
        let dataset = Dataset::new(records);
        debug!(rows = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

/// Session-scoped dataset cache keyed by source path.
///
/// A session owns one cache; repeated loads of the same path return the
/// same immutable `Arc<Dataset>` without re-parsing. Independent sessions
/// may share a cache because datasets are read-only once loaded.
#[derive(Default)]
pub struct DatasetCache {
    inner: RwLock<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, serving repeat calls from the cached parse.
    ///
    /// A failed load caches nothing, so a corrected file is picked up on
    /// the next call.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>, EngineError> {
        let path = path.as_ref();
        if let Some(found) = self
            .inner
            .read()
            .expect("dataset cache poisoned")
            .get(path)
        {
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(Arc::clone(found));
        }

        let dataset = Arc::new(Dataset::load(path)?);
        self.inner
            .write()
            .expect("dataset cache poisoned")
            .insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset for `path`, if any. Returns whether an
    /// entry was removed.
    pub fn evict(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .write()
            .expect("dataset cache poisoned")
            .remove(path.as_ref())
            .is_some()
    }

    /// Remove every cached dataset.
    pub fn clear(&self) {
        self.inner.write().expect("dataset cache poisoned").clear();
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.inner.read().expect("dataset cache poisoned").len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
