//! Populated-place filtering for GeoNames feature tables
//!
//! Only feature class `P` takes part in the join, and sections of places,
//! abandoned places and destroyed places are dropped even though they
//! carry class `P`.

use crate::constants::{POPULATED_PLACE_CLASS, excluded_feature_codes};
use crate::error::Result;
use crate::models::FilterStats;

use super::{has_column, text_column};
use polars::prelude::*;
use tracing::{debug, info};

/// Keep populated places, dropping excluded feature codes
///
/// # Returns
///
/// The filtered table and the kept/removed row counts
pub fn filter_populated_places(places: &DataFrame) -> Result<(DataFrame, FilterStats)> {
    let rows_in = places.height();

    // A table without the feature columns has no populated places
    let kept = if has_column(places, "feature_class") && has_column(places, "feature_code") {
        places
            .clone()
            .lazy()
            .filter(populated_place_predicate())
            .collect()?
    } else {
        debug!("Feature columns missing, no rows can qualify");
        places.clear()
    };

    let stats = FilterStats {
        rows_in,
        rows_kept: kept.height(),
    };

    info!(
        "Feature filtering complete: {} -> {} places ({} filtered out)",
        stats.rows_in,
        stats.rows_kept,
        stats.rows_removed()
    );
    debug!("Excluded feature codes: {:?}", excluded_feature_codes::ALL);

    Ok((kept, stats))
}

/// `feature_class == "P"` and `feature_code` not in the excluded set
fn populated_place_predicate() -> Expr {
    let feature_class = text_column("feature_class");
    let feature_code = text_column("feature_code");

    excluded_feature_codes::ALL.iter().fold(
        feature_class.eq(lit(POPULATED_PLACE_CLASS)),
        |predicate, code| predicate.and(feature_code.clone().neq(lit(*code))),
    )
}
