//! Join key normalization for both GeoNames sources
//!
//! Postal files use everyday names ("Saint John", "Mc Adoo",
//! "Springfield (Sangamon)") while feature files use romanized ASCII
//! names, and the two disagree on Canadian province codes. Each side gets
//! its own cleaning so that the `(cleaned_name, cleaned_state)` keys meet.
//! The rules converge most names but are not a bijection; leftover
//! mismatches surface as unmatched rows.

use crate::constants::{ADMIN_CODE_MAP, CLEANED_NAME, CLEANED_STATE};
use crate::error::Result;

use super::text_or_empty;
use polars::prelude::*;
use tracing::debug;

/// Leading "Mc" followed by one whitespace character
const MC_PREFIX: &str = r"^Mc\s";

/// Trailing parenthetical qualifier, with any whitespace before it
const PARENTHETICAL_SUFFIX: &str = r"\s*\(.*\)$";

/// Add `cleaned_name` / `cleaned_state` to a postal table
pub fn normalize_postal(postal: &DataFrame) -> Result<DataFrame> {
    debug!("Normalizing {} postal rows", postal.height());

    let normalized = postal
        .clone()
        .lazy()
        .with_columns([
            postal_name_expr(text_or_empty(postal, "place_name")).alias(CLEANED_NAME),
            postal_state_expr(text_or_empty(postal, "admin_code1")).alias(CLEANED_STATE),
        ])
        .collect()?;

    Ok(normalized)
}

/// Add `cleaned_name` / `cleaned_state` to a place table
pub fn normalize_places(places: &DataFrame) -> Result<DataFrame> {
    debug!("Normalizing {} place rows", places.height());

    let normalized = places
        .clone()
        .lazy()
        .with_columns([
            place_name_expr(text_or_empty(places, "asciiname")).alias(CLEANED_NAME),
            place_state_expr(text_or_empty(places, "admin1_code")).alias(CLEANED_STATE),
        ])
        .collect()?;

    Ok(normalized)
}

/// "Saint" -> "St.", "Mc " -> "Mc", lowercase, then drop a trailing "(...)".
///
/// The first two rewrites are case-sensitive and so must run before lowercasing.
pub fn postal_name_expr(place_name: Expr) -> Expr {
    place_name
        .str()
        .replace_all(lit("Saint"), lit("St."), true)
        .str()
        .replace(lit(MC_PREFIX), lit("Mc"), false)
        .str()
        .to_lowercase()
        .str()
        .replace(lit(PARENTHETICAL_SUFFIX), lit(""), false)
}

pub fn place_name_expr(asciiname: Expr) -> Expr {
    asciiname.str().to_lowercase()
}

pub fn postal_state_expr(admin_code1: Expr) -> Expr {
    admin_code1.str().to_uppercase()
}

/// Translate GeoNames numeric province codes, then uppercase.
///
/// The table is applied to every row regardless of country, so a US state
/// code that collides with a Canadian numeric code would be rewritten too.
pub fn place_state_expr(admin1_code: Expr) -> Expr {
    ADMIN_CODE_MAP
        .iter()
        .fold(admin1_code.clone(), |mapped, (geonames_code, province)| {
            when(admin1_code.clone().eq(lit(*geonames_code)))
                .then(lit(*province))
                .otherwise(mapped)
        })
        .str()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(df: &DataFrame, column: &str) -> Vec<String> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|value| value.expect("cleaned keys are never null").to_string())
            .collect()
    }

    fn clean_postal_names(names: &[&str]) -> Vec<String> {
        let postal = df!(
            "place_name" => names,
            "admin_code1" => vec!["XX"; names.len()],
        )
        .unwrap();
        cleaned(&normalize_postal(&postal).unwrap(), CLEANED_NAME)
    }

    fn clean_place_states(codes: &[&str]) -> Vec<String> {
        let places = df!(
            "asciiname" => vec!["x"; codes.len()],
            "admin1_code" => codes,
        )
        .unwrap();
        cleaned(&normalize_places(&places).unwrap(), CLEANED_STATE)
    }

    #[test]
    fn test_saint_becomes_st() {
        assert_eq!(clean_postal_names(&["Saint John"]), vec!["st. john"]);
        assert_eq!(
            clean_postal_names(&["Sault Saint Marie"]),
            vec!["sault st. marie"]
        );
    }

    #[test]
    fn test_saint_replacement_is_substring_based() {
        assert_eq!(
            clean_postal_names(&["Saint-Jean-sur-Richelieu"]),
            vec!["st.-jean-sur-richelieu"]
        );
        // lowercase "saint" is left alone because the rewrite runs first
        assert_eq!(clean_postal_names(&["saint paul"]), vec!["saint paul"]);
    }

    #[test]
    fn test_mc_prefix_is_collapsed() {
        assert_eq!(clean_postal_names(&["McAllen"]), vec!["mcallen"]);
        assert_eq!(clean_postal_names(&["Mc Allen"]), vec!["mcallen"]);
        // only a leading "Mc " is collapsed
        assert_eq!(clean_postal_names(&["Port Mc Neil"]), vec!["port mc neil"]);
    }

    #[test]
    fn test_trailing_parenthetical_is_stripped() {
        assert_eq!(
            clean_postal_names(&["Springfield (historic)"]),
            vec!["springfield"]
        );
        assert_eq!(
            clean_postal_names(&["Lachine (Montreal)"]),
            vec!["lachine"]
        );
        // not at the end of the string, so it stays
        assert_eq!(
            clean_postal_names(&["Fort (Old) Town"]),
            vec!["fort (old) town"]
        );
    }

    #[test]
    fn test_non_ascii_names_lowercase() {
        assert_eq!(clean_postal_names(&["Montréal"]), vec!["montréal"]);
        assert_eq!(clean_postal_names(&["ÉVAIN"]), vec!["évain"]);
    }

    #[test]
    fn test_postal_state_is_uppercased() {
        let postal = df!(
            "place_name" => ["Chicago", "Toronto"],
            "admin_code1" => ["il", "ON"],
        )
        .unwrap();

        let normalized = normalize_postal(&postal).unwrap();

        assert_eq!(cleaned(&normalized, CLEANED_STATE), vec!["IL", "ON"]);
    }

    #[test]
    fn test_place_name_only_lowercased() {
        let places = df!(
            "asciiname" => ["Saint John", "Springfield (historic)"],
            "admin1_code" => ["04", "IL"],
        )
        .unwrap();

        let normalized = normalize_places(&places).unwrap();

        assert_eq!(
            cleaned(&normalized, CLEANED_NAME),
            vec!["saint john", "springfield (historic)"]
        );
    }

    #[test]
    fn test_canadian_admin_codes_are_mapped() {
        assert_eq!(clean_place_states(&["08"]), vec!["ON"]);
        assert_eq!(
            clean_place_states(&["01", "02", "10", "14"]),
            vec!["AB", "BC", "QC", "NU"]
        );
    }

    #[test]
    fn test_unmapped_admin_codes_pass_through_uppercased() {
        assert_eq!(
            clean_place_states(&["17", "06", "ny", "TX"]),
            vec!["17", "06", "NY", "TX"]
        );
    }

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let postal = df!("place_name" => [Some("Chicago"), None]).unwrap();

        let normalized = normalize_postal(&postal).unwrap();

        assert_eq!(cleaned(&normalized, CLEANED_NAME), vec!["chicago", ""]);
        assert_eq!(cleaned(&normalized, CLEANED_STATE), vec!["", ""]);
    }

    #[test]
    fn test_source_columns_are_kept() {
        let places = df!(
            "asciiname" => ["Toronto"],
            "admin1_code" => ["08"],
        )
        .unwrap();

        let normalized = normalize_places(&places).unwrap();

        assert_eq!(normalized.width(), 4);
        let raw = normalized.column("admin1_code").unwrap().str().unwrap();
        assert_eq!(raw.get(0), Some("08"));
    }
}
