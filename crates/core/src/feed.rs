//! Synthetic schedule feed: a deterministic projection of the catalog
//! for one airline. Not used by the booking pipeline.

use chrono::{DateTime, Utc};

use skyfare_db::queries::{catalog, flights};
use skyfare_db::PgPool;
use skyfare_types::api::flights::ScheduleFeedResponse;
use skyfare_types::{validate_airline_code, AppError, Result};

pub async fn schedule_feed(
    pool: &PgPool,
    airline_code: &str,
    now: DateTime<Utc>,
) -> Result<ScheduleFeedResponse> {
    validate_airline_code(airline_code).map_err(AppError::InvalidArgument)?;

    catalog::find_airline(pool, airline_code)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Unknown airline {}", airline_code)))?;

    let upcoming = flights::schedule_for_airline(pool, airline_code, now)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(ScheduleFeedResponse {
        airline_code: airline_code.to_string(),
        flights: upcoming.into_iter().map(Into::into).collect(),
    })
}
