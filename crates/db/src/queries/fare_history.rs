use crate::models::FareHistorySample;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use skyfare_types::enums::CabinClass;

/// Append one sample. The table is append-only; nothing updates or
/// deletes rows.
pub async fn append(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_id: Uuid,
    tier: CabinClass,
    fare: Decimal,
    demand_index: f64,
    sampled_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO fare_history (flight_id, tier, fare, demand_index, sampled_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(flight_id)
    .bind(tier)
    .bind(fare)
    .bind(demand_index)
    .bind(sampled_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Time series for a flight, optionally narrowed to one tier
pub async fn list_for_flight(
    pool: &PgPool,
    flight_id: Uuid,
    tier: Option<CabinClass>,
) -> Result<Vec<FareHistorySample>> {
    let samples = match tier {
        Some(tier) => {
            sqlx::query_as::<_, FareHistorySample>(
                r#"
                SELECT * FROM fare_history
                WHERE flight_id = $1 AND tier = $2
                ORDER BY sampled_at ASC, id ASC
                "#,
            )
            .bind(flight_id)
            .bind(tier)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, FareHistorySample>(
                r#"
                SELECT * FROM fare_history
                WHERE flight_id = $1
                ORDER BY sampled_at ASC, id ASC
                "#,
            )
            .bind(flight_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(samples)
}
