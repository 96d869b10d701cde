/// Column header name as it appears in the input table.
/// Examples: `Address`, `Price_index`, `Sq_ft`
pub type ColumnName = &'static str;
/// Neighborhood name as stored in the `Neighborhood` column.
/// Examples: `Mission`, `Noe Valley`, `Pacific Heights`
pub type NeighborhoodName = String;
/// Rendered advisory sentence text.
/// Example: `Be aware of and look up manually the following missing value(s): 'Sq_ft'.`
pub type AdvisoryText = String;
