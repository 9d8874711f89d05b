use crate::models::{Ticket, TicketDetail};
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert one tentative ticket. Ticket numbers are assigned only at
/// confirmation.
pub async fn insert(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: Uuid,
    seat_id: Uuid,
    passenger_name: &str,
    passenger_age: i32,
    passenger_gender: Option<&str>,
) -> Result<Ticket> {
    let ticket = sqlx::query_as::<_, Ticket>(
        r#"
        INSERT INTO tickets (booking_id, seat_id, passenger_name, passenger_age, passenger_gender)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(booking_id)
    .bind(seat_id)
    .bind(passenger_name)
    .bind(passenger_age)
    .bind(passenger_gender)
    .fetch_one(&mut **tx)
    .await?;

    Ok(ticket)
}

/// Tickets of a booking joined with their seats, in seat-number order
pub async fn list_for_booking(pool: &PgPool, booking_id: Uuid) -> Result<Vec<TicketDetail>> {
    let tickets = sqlx::query_as::<_, TicketDetail>(
        r#"
        SELECT
            t.id, t.booking_id, t.seat_id,
            t.passenger_name, t.passenger_age, t.passenger_gender, t.ticket_number,
            s.seat_number, s.cabin_class, s.position
        FROM tickets t
        JOIN seats s ON s.id = t.seat_id
        WHERE t.booking_id = $1
        ORDER BY s.seat_number ASC
        "#,
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await?;

    Ok(tickets)
}

/// Same join inside a transaction (confirmation path)
pub async fn list_for_booking_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: Uuid,
) -> Result<Vec<TicketDetail>> {
    let tickets = sqlx::query_as::<_, TicketDetail>(
        r#"
        SELECT
            t.id, t.booking_id, t.seat_id,
            t.passenger_name, t.passenger_age, t.passenger_gender, t.ticket_number,
            s.seat_number, s.cabin_class, s.position
        FROM tickets t
        JOIN seats s ON s.id = t.seat_id
        WHERE t.booking_id = $1
        ORDER BY s.seat_number ASC
        "#,
    )
    .bind(booking_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(tickets)
}

/// Drop the tentative tickets of a booking that never confirmed
pub async fn delete_for_booking(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tickets WHERE booking_id = $1")
        .bind(booking_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

/// Stamp a ticket with its number
pub async fn set_number(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ticket_id: Uuid,
    ticket_number: &str,
) -> Result<()> {
    sqlx::query("UPDATE tickets SET ticket_number = $2 WHERE id = $1")
        .bind(ticket_id)
        .bind(ticket_number)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
