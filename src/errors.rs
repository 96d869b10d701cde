use std::io;

use thiserror::Error;

/// Error type for dataset loading failures.
///
/// Only structural problems are errors: an unreadable source, a table the
/// CSV parser cannot make sense of, or a header without the required
/// columns. Per-cell coercion failures are not represented here; they
/// degrade to missing values during normalization.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("input table is missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("malformed tabular source: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
