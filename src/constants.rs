use crate::types::ColumnName;

/// Constants describing the fixed input schema.
pub mod schema {
    use super::ColumnName;

    /// Street address column.
    pub const COL_ADDRESS: ColumnName = "Address";
    /// Neighborhood name column.
    pub const COL_NEIGHBORHOOD: ColumnName = "Neighborhood";
    /// Listing price column (currency-formatted text on input).
    pub const COL_PRICE: ColumnName = "Price";
    /// Modeled annual insurance premium column (currency-formatted text on input).
    pub const COL_PREMIUM: ColumnName = "Premium";
    /// Construction year column.
    pub const COL_YEAR_BUILT: ColumnName = "Year_built";
    /// Square footage column.
    pub const COL_SQ_FT: ColumnName = "Sq_ft";
    /// Bedroom count column; optional and exempt from completeness checks.
    pub const COL_BEDS: ColumnName = "Beds";
    /// Price contribution index column.
    pub const COL_PRICE_INDEX: ColumnName = "Price_index";
    /// Square-footage contribution index column.
    pub const COL_SQ_FT_INDEX: ColumnName = "Sq_ft_index";
    /// Construction-age contribution index column.
    pub const COL_YEAR_BUILT_INDEX: ColumnName = "Year_built_index";
    /// Fire-frequency index column.
    pub const COL_FIRE_INDEX: ColumnName = "Fire_index";
    /// High-risk crime frequency index column.
    pub const COL_HIGH_RISK_INDEX: ColumnName = "High_risk_index";
    /// Medium-risk crime frequency index column.
    pub const COL_MEDIUM_RISK_INDEX: ColumnName = "Medium_risk_index";
    /// Low-risk crime frequency index column.
    pub const COL_LOW_RISK_INDEX: ColumnName = "Low_risk_index";

    /// Canonical column order used for completeness checks and reports.
    pub const ALL_COLUMNS: [ColumnName; 14] = [
        COL_ADDRESS,
        COL_NEIGHBORHOOD,
        COL_PRICE,
        COL_PREMIUM,
        COL_YEAR_BUILT,
        COL_SQ_FT,
        COL_BEDS,
        COL_PRICE_INDEX,
        COL_SQ_FT_INDEX,
        COL_YEAR_BUILT_INDEX,
        COL_FIRE_INDEX,
        COL_HIGH_RISK_INDEX,
        COL_MEDIUM_RISK_INDEX,
        COL_LOW_RISK_INDEX,
    ];

    /// Columns that must be present in the header for a load to succeed.
    /// `Beds` is the only optional column.
    pub const REQUIRED_COLUMNS: [ColumnName; 13] = [
        COL_ADDRESS,
        COL_NEIGHBORHOOD,
        COL_PRICE,
        COL_PREMIUM,
        COL_YEAR_BUILT,
        COL_SQ_FT,
        COL_PRICE_INDEX,
        COL_SQ_FT_INDEX,
        COL_YEAR_BUILT_INDEX,
        COL_FIRE_INDEX,
        COL_HIGH_RISK_INDEX,
        COL_MEDIUM_RISK_INDEX,
        COL_LOW_RISK_INDEX,
    ];

    /// Cell token normalized to a missing value in every column.
    pub const MISSING_TOKEN: &str = "None";
    /// Currency symbol stripped before numeric coercion of price/premium cells.
    pub const CURRENCY_SYMBOL: char = '$';
    /// Thousands separator stripped before numeric coercion of price/premium cells.
    pub const THOUSANDS_SEPARATOR: char = ',';
}

/// Constants used by single-row diagnostics.
pub mod diagnostics {
    use super::ColumnName;

    /// Standard-deviation-scaled value above which an index column is
    /// flagged as a high-impact premium factor. Design constant, not
    /// user-configurable.
    pub const HIGH_IMPACT_THRESHOLD: f64 = 1.0;
    /// Column excluded from missing-or-zero completeness checks.
    pub const COMPLETENESS_EXEMPT_COLUMN: ColumnName = super::schema::COL_BEDS;

    /// Crime categories counted by the high-risk index.
    pub const HIGH_RISK_EVENTS_NOTE: &str = "High risk events includes Homicide, \
        Robbery, Arson, Assault, Sex Offender, Weapons Offer, Kidnapping.";
    /// Crime categories counted by the medium-risk index.
    pub const MEDIUM_RISK_EVENTS_NOTE: &str = "Medium risk events includes Burglary, \
        Drug Offense, Drug Violation, Embezzlement, Forgery And Counterfeiting, Fraud, \
        Motor Vehicle Theft, Promotion, Stolen Property, Weapons Carriage Etc, Vandalism, \
        Traffic Violation Arrest, Larceny Theft.";
    /// Crime categories counted by the low-risk index.
    pub const LOW_RISK_EVENTS_NOTE: &str = "Low risk events includes Case Closure, \
        Courtesy Report, Disorderly Conduct, Fire Report, Liquor Laws, Lost Property, \
        Malicious Mischief, Miscellaneous Investment, Missing Person, Non-Critical, \
        Offenses Against The Family And Children, Other Miscellaneous, Recovered Vehicle, \
        Suicide, Suspicious Occ, Traffic Collision, Vehicle Impounded, Warrant.";
    /// Explanation of how the fire index was derived.
    pub const FIRE_INDEX_NOTE: &str = "The higher the Fire_index value, the higher the \
        frequency of occurrence in the past 1000 fire alarm records in the San Francisco area.";

    /// Static prose shown alongside single-property diagnostics, in display order.
    pub const RISK_CATEGORY_NOTES: [&str; 4] = [
        HIGH_RISK_EVENTS_NOTE,
        MEDIUM_RISK_EVENTS_NOTE,
        LOW_RISK_EVENTS_NOTE,
        FIRE_INDEX_NOTE,
    ];
}

/// Constants used by correlation reporting.
pub mod correlation {
    /// Minimum pairwise-complete observations for a defined coefficient.
    pub const MIN_VALID_PAIRS: usize = 2;
    /// Variance floor below which a column is treated as constant and the
    /// coefficient reported as undefined.
    pub const VARIANCE_FLOOR: f64 = 1e-10;
    /// Decimal places used when rounding coefficients for display.
    pub const DISPLAY_DECIMALS: i32 = 2;
}
