use crate::models::Flight;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use skyfare_types::enums::FlightStatus;

/// Find flight by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Flight>> {
    let flight = sqlx::query_as::<_, Flight>("SELECT * FROM flights WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(flight)
}

/// Find flight by ID with FOR UPDATE lock. Serializes booking attempts
/// and demand updates on the same flight.
pub async fn find_by_id_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<Option<Flight>> {
    let flight = sqlx::query_as::<_, Flight>("SELECT * FROM flights WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(flight)
}

/// List flights matching a route, excluding cancelled ones.
///
/// With a date, matches the UTC calendar day of departure; without one,
/// only upcoming departures are returned.
pub async fn search_route(
    pool: &PgPool,
    origin: &str,
    destination: &str,
    date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<Vec<Flight>> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT * FROM flights WHERE status <> 'cancelled' AND origin_code = ",
    );
    query_builder.push_bind(origin);
    query_builder.push(" AND destination_code = ");
    query_builder.push_bind(destination);

    if let Some(date) = date {
        query_builder.push(" AND (departure_time AT TIME ZONE 'UTC')::date = ");
        query_builder.push_bind(date);
    } else {
        query_builder.push(" AND departure_time >= ");
        query_builder.push_bind(now);
    }

    query_builder.push(" ORDER BY departure_time ASC, id ASC");

    let flights = query_builder
        .build_query_as::<Flight>()
        .fetch_all(pool)
        .await?;

    Ok(flights)
}

/// Insert a flight row
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_number: &str,
    airline_code: &str,
    origin_code: &str,
    destination_code: &str,
    aircraft_id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    base_fare: serde_json::Value,
    demand_index: f64,
) -> Result<Flight> {
    let flight = sqlx::query_as::<_, Flight>(
        r#"
        INSERT INTO flights (
            flight_number, airline_code, origin_code, destination_code,
            aircraft_id, departure_time, arrival_time, base_fare, demand_index
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(flight_number)
    .bind(airline_code)
    .bind(origin_code)
    .bind(destination_code)
    .bind(aircraft_id)
    .bind(departure_time)
    .bind(arrival_time)
    .bind(base_fare)
    .bind(demand_index)
    .fetch_one(&mut **tx)
    .await?;

    Ok(flight)
}

/// Update operational status and delay fields (staff)
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: FlightStatus,
    delay_minutes: Option<i32>,
    delay_reason: Option<&str>,
) -> Result<Option<Flight>> {
    let flight = sqlx::query_as::<_, Flight>(
        r#"
        UPDATE flights
        SET status = $2,
            delay_minutes = $3,
            delay_reason = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(delay_minutes)
    .bind(delay_reason)
    .fetch_optional(pool)
    .await?;

    Ok(flight)
}

/// Assign a departure gate (airport authority)
pub async fn assign_gate(pool: &PgPool, id: Uuid, gate: &str) -> Result<Option<Flight>> {
    let flight = sqlx::query_as::<_, Flight>(
        r#"
        UPDATE flights
        SET gate = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(gate)
    .fetch_optional(pool)
    .await?;

    Ok(flight)
}

/// Persist a simulator-produced demand index. Touches nothing else on
/// the row.
pub async fn update_demand_index(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
    demand_index: f64,
) -> Result<()> {
    sqlx::query("UPDATE flights SET demand_index = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(demand_index)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Flights the demand simulator perturbs: not yet departed and still
/// operating.
pub async fn list_active(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Flight>> {
    let flights = sqlx::query_as::<_, Flight>(
        r#"
        SELECT * FROM flights
        WHERE departure_time > $1
          AND status NOT IN ('cancelled', 'departed', 'landed')
        ORDER BY departure_time ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(flights)
}

/// Upcoming schedule for one airline, deterministically ordered.
pub async fn schedule_for_airline(
    pool: &PgPool,
    airline_code: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Flight>> {
    let flights = sqlx::query_as::<_, Flight>(
        r#"
        SELECT * FROM flights
        WHERE airline_code = $1
          AND departure_time >= $2
        ORDER BY departure_time ASC, id ASC
        "#,
    )
    .bind(airline_code)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(flights)
}
