#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Schema, diagnostic, and correlation constants.
pub mod constants;
/// Premium-vs-index Pearson correlation reporting.
pub mod correlation;
/// Single-row diagnostics and advisory rendering.
pub mod diagnostics;
/// Constraint configuration and filtered views.
pub mod filter;
/// CSV loading, cell normalization, and the session dataset cache.
pub mod loader;
/// Property records, index fields, and the immutable dataset handle.
pub mod record;
/// Shared type aliases.
pub mod types;

mod errors;

pub use correlation::{Correlation, CorrelationReport, correlate, paired_observations};
pub use diagnostics::{Diagnostics, annotate};
pub use errors::EngineError;
pub use filter::{FilterConstraints, FilteredView, NeighborhoodSelection, RangeFilter};
pub use loader::DatasetCache;
pub use record::{CellValue, Dataset, DatasetBounds, IndexField, PropertyRecord, ValueBounds};
pub use types::{AdvisoryText, ColumnName, NeighborhoodName};
