//! Full outer join of normalized postal and place tables
//!
//! Each side is first projected to the columns it contributes, under their
//! output names, so nothing collides in the join. Keys are not unique on
//! either side: a key shared by N postal rows and M place rows yields N×M
//! rows, and rows without a partner survive once with the other side null.

use crate::constants::{CLEANED_NAME, CLEANED_STATE, output_columns};
use crate::error::Result;
use crate::models::JoinStats;

use super::column_or_null;
use polars::prelude::*;
use tracing::{debug, info};

/// Marker columns recording which side a joined row came from
const POSTAL_SIDE: &str = "__postal_side";
const PLACE_SIDE: &str = "__place_side";

/// Join postal (left) and place (right) tables on `(cleaned_state, cleaned_name)`
///
/// # Returns
///
/// The table in output column order, plus matched/unmatched row counts.
/// Row order is whatever the join produces and is not stable.
pub fn reconcile(postal: &DataFrame, places: &DataFrame) -> Result<(DataFrame, JoinStats)> {
    debug!(
        "Joining {} postal rows with {} place rows",
        postal.height(),
        places.height()
    );

    let left = postal.clone().lazy().select([
        col(CLEANED_STATE),
        col(CLEANED_NAME),
        column_or_null(postal, "postal_code", DataType::String).alias(output_columns::POSTAL_CODE),
        column_or_null(postal, "latitude", DataType::Float64).alias(output_columns::LATITUDE),
        column_or_null(postal, "longitude", DataType::Float64).alias(output_columns::LONGITUDE),
        lit(true).alias(POSTAL_SIDE),
    ]);

    let right = places.clone().lazy().select([
        col(CLEANED_STATE),
        col(CLEANED_NAME),
        column_or_null(places, "alternatenames", DataType::String).alias(output_columns::ALT_NAME),
        column_or_null(places, "latitude", DataType::Float64).alias(output_columns::CITY_LATITUDE),
        column_or_null(places, "longitude", DataType::Float64)
            .alias(output_columns::CITY_LONGITUDE),
        lit(true).alias(PLACE_SIDE),
    ]);

    let keys = [col(CLEANED_STATE), col(CLEANED_NAME)];
    let joined = left
        .join(
            right,
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .collect()?;

    let stats = join_stats(&joined)?;
    info!(
        "Join complete: {} rows ({} matched, {} postal only, {} place only, {:.1}% matched)",
        stats.total_rows(),
        stats.matched_rows,
        stats.postal_only_rows,
        stats.place_only_rows,
        stats.match_rate()
    );

    let projected = joined
        .lazy()
        .select([
            col(CLEANED_NAME).alias(output_columns::CITY_NAME),
            col(output_columns::ALT_NAME),
            col(output_columns::CITY_LATITUDE),
            col(output_columns::CITY_LONGITUDE),
            col(CLEANED_STATE).alias(output_columns::STATE_CODE),
            col(output_columns::POSTAL_CODE),
            col(output_columns::LATITUDE),
            col(output_columns::LONGITUDE),
        ])
        .collect()?;

    Ok((projected, stats))
}

/// A side's marker is null exactly when that side had no partner for the row
fn join_stats(joined: &DataFrame) -> Result<JoinStats> {
    let postal_missing = joined.column(POSTAL_SIDE)?.null_count();
    let place_missing = joined.column(PLACE_SIDE)?.null_count();

    Ok(JoinStats {
        matched_rows: joined.height() - postal_missing - place_missing,
        postal_only_rows: place_missing,
        place_only_rows: postal_missing,
    })
}
