//! Application constants for the GeoNames processor
//!
//! Fixed column schemas for both source kinds, the administrative code
//! mapping, feature filtering rules and output column names.

// =============================================================================
// Source Schemas
// =============================================================================

/// How a source column is typed after loading.
///
/// Every column is read as text first; numeric columns are cast afterwards
/// and unparseable cells become null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

/// A positional column in a headerless source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn text(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        column_type: ColumnType::Text,
    }
}

const fn integer(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        column_type: ColumnType::Integer,
    }
}

const fn float(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        column_type: ColumnType::Float,
    }
}

/// GeoNames feature dump columns (allCountries.txt, US.txt, CA.txt ...)
///
/// `admin1_code` stays text so codes like "08" keep their leading zero.
pub const GEO_COLUMNS: &[ColumnSpec] = &[
    integer("geonameid"),
    text("name"),
    text("asciiname"),
    text("alternatenames"),
    float("latitude"),
    float("longitude"),
    text("feature_class"),
    text("feature_code"),
    text("country_code"),
    text("cc2"),
    text("admin1_code"),
    text("admin2_code"),
    text("admin3_code"),
    text("admin4_code"),
    integer("population"),
    integer("elevation"),
    integer("dem"),
    text("timezone"),
    text("modification_date"),
];

/// GeoNames postal code dump columns
///
/// `postal_code` stays text: "02134" and "K1A 0B1" must survive as written.
pub const POSTAL_COLUMNS: &[ColumnSpec] = &[
    text("country_code"),
    text("postal_code"),
    text("place_name"),
    text("admin_name1"),
    text("admin_code1"),
    text("admin_name2"),
    text("admin_code2"),
    text("admin_name3"),
    text("admin_code3"),
    float("latitude"),
    float("longitude"),
    integer("accuracy"),
];

/// Field separator used by both GeoNames dumps
pub const FIELD_SEPARATOR: u8 = b'\t';

// =============================================================================
// Feature Filtering
// =============================================================================

/// GeoNames feature class for cities, towns and villages
pub const POPULATED_PLACE_CLASS: &str = "P";

/// Populated-place feature codes that never take part in the join
pub mod excluded_feature_codes {
    /// Section of populated place
    pub const SECTION: &str = "PPLX";

    /// Abandoned populated place
    pub const ABANDONED: &str = "PPLQ";

    /// Destroyed populated place
    pub const DESTROYED: &str = "PPLW";

    pub const ALL: &[&str] = &[SECTION, ABANDONED, DESTROYED];
}

// =============================================================================
// Key Normalization
// =============================================================================

/// GeoNames numeric admin1 codes for Canada mapped to postal abbreviations.
///
/// "06" is unused by GeoNames. Codes absent from the table pass through.
pub const ADMIN_CODE_MAP: &[(&str, &str)] = &[
    ("01", "AB"),
    ("02", "BC"),
    ("03", "MB"),
    ("04", "NB"),
    ("05", "NL"),
    ("07", "NS"),
    ("08", "ON"),
    ("09", "PE"),
    ("10", "QC"),
    ("11", "SK"),
    ("12", "YT"),
    ("13", "NT"),
    ("14", "NU"),
];

/// Normalized name column added to both tables
pub const CLEANED_NAME: &str = "cleaned_name";

/// Normalized state/province column added to both tables
pub const CLEANED_STATE: &str = "cleaned_state";

// =============================================================================
// Output Schema
// =============================================================================

/// Output field names, in emission order
pub mod output_columns {
    pub const CITY_NAME: &str = "city_name";
    pub const ALT_NAME: &str = "alt_name";
    pub const CITY_LATITUDE: &str = "city_latitude";
    pub const CITY_LONGITUDE: &str = "city_longitude";
    pub const STATE_CODE: &str = "state_code";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";

    pub const ALL: &[&str] = &[
        CITY_NAME,
        ALT_NAME,
        CITY_LATITUDE,
        CITY_LONGITUDE,
        STATE_CODE,
        POSTAL_CODE,
        LATITUDE,
        LONGITUDE,
    ];
}

// =============================================================================
// Geohash Index
// =============================================================================

/// Default geohash prefix length for bucketing postal codes
pub const DEFAULT_GEOHASH_PRECISION: usize = 6;

/// Longest geohash the encoder supports
pub const MAX_GEOHASH_PRECISION: usize = 12;
