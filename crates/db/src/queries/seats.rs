use crate::models::{Seat, SeatClassCount};
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use skyfare_types::enums::{CabinClass, SeatPosition};

/// All seats of a flight, in seat-number order
pub async fn list_for_flight(pool: &PgPool, flight_id: Uuid) -> Result<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(
        "SELECT * FROM seats WHERE flight_id = $1 ORDER BY seat_number ASC",
    )
    .bind(flight_id)
    .fetch_all(pool)
    .await?;

    Ok(seats)
}

/// Available/total seat counts per cabin class
pub async fn count_by_class(pool: &PgPool, flight_id: Uuid) -> Result<Vec<SeatClassCount>> {
    let counts = sqlx::query_as::<_, SeatClassCount>(
        r#"
        SELECT cabin_class,
               COUNT(*) FILTER (WHERE status = 'available') AS available,
               COUNT(*) AS total
        FROM seats
        WHERE flight_id = $1
        GROUP BY cabin_class
        "#,
    )
    .bind(flight_id)
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Seat counts inside a booking transaction, after the flight lock is
/// taken
pub async fn count_by_class_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_id: Uuid,
) -> Result<Vec<SeatClassCount>> {
    let counts = sqlx::query_as::<_, SeatClassCount>(
        r#"
        SELECT cabin_class,
               COUNT(*) FILTER (WHERE status = 'available') AS available,
               COUNT(*) AS total
        FROM seats
        WHERE flight_id = $1
        GROUP BY cabin_class
        "#,
    )
    .bind(flight_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(counts)
}

/// Lock specific seats. Rows come back in ascending seat_number, the
/// fixed lock order for a flight's seats.
pub async fn find_by_ids_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_id: Uuid,
    seat_ids: &[Uuid],
) -> Result<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(
        r#"
        SELECT * FROM seats
        WHERE flight_id = $1 AND id = ANY($2)
        ORDER BY seat_number ASC
        FOR UPDATE
        "#,
    )
    .bind(flight_id)
    .bind(seat_ids)
    .fetch_all(&mut **tx)
    .await?;

    Ok(seats)
}

/// Lock the next available seats of a tier, in seat-number order.
/// Seats in `excluded` (already locked for the same booking) are
/// skipped.
pub async fn find_available_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_id: Uuid,
    cabin_class: CabinClass,
    excluded: &[Uuid],
    limit: i64,
) -> Result<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(
        r#"
        SELECT * FROM seats
        WHERE flight_id = $1 AND cabin_class = $2 AND status = 'available'
          AND id <> ALL($3)
        ORDER BY seat_number ASC
        LIMIT $4
        FOR UPDATE
        "#,
    )
    .bind(flight_id)
    .bind(cabin_class)
    .bind(excluded)
    .bind(limit)
    .fetch_all(&mut **tx)
    .await?;

    Ok(seats)
}

/// Move locked seats to Held under the new booking
pub async fn hold(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    seat_ids: &[Uuid],
    booking_id: Uuid,
) -> Result<()> {
    sqlx::query("UPDATE seats SET status = 'held', booking_id = $2 WHERE id = ANY($1)")
        .bind(seat_ids)
        .bind(booking_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Flip a booking's held seats to Sold at confirmation
pub async fn mark_sold(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: Uuid,
) -> Result<u64> {
    let result =
        sqlx::query("UPDATE seats SET status = 'sold' WHERE booking_id = $1 AND status = 'held'")
            .bind(booking_id)
            .execute(&mut **tx)
            .await?;

    Ok(result.rows_affected())
}

/// Return a booking's seats to the Available pool
pub async fn release_for_booking(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE seats SET status = 'available', booking_id = NULL WHERE booking_id = $1",
    )
    .bind(booking_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Bulk-insert the generated seat map of a new flight
pub async fn insert_map(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    flight_id: Uuid,
    seats: &[(String, CabinClass, SeatPosition, Decimal)],
) -> Result<()> {
    for (seat_number, cabin_class, position, surcharge) in seats {
        sqlx::query(
            r#"
            INSERT INTO seats (flight_id, seat_number, cabin_class, position, surcharge)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(flight_id)
        .bind(seat_number)
        .bind(cabin_class)
        .bind(position)
        .bind(surcharge)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
