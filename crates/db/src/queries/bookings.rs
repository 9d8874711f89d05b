use crate::models::Booking;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use skyfare_types::enums::{BookingStatus, CabinClass, PaymentMethod};

/// Insert a booking in Held state
pub async fn insert_hold(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_reference: &str,
    user_id: Uuid,
    flight_id: Uuid,
    tier: CabinClass,
    total_fare: Decimal,
    hold_expires_at: DateTime<Utc>,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (
            booking_reference, user_id, flight_id, tier, status, total_fare, hold_expires_at
        )
        VALUES ($1, $2, $3, $4, 'held', $5, $6)
        RETURNING *
        "#,
    )
    .bind(booking_reference)
    .bind(user_id)
    .bind(flight_id)
    .bind(tier)
    .bind(total_fare)
    .bind(hold_expires_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

/// Find booking by its opaque reference
pub async fn find_by_reference(pool: &PgPool, reference: &str) -> Result<Option<Booking>> {
    let booking =
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_reference = $1")
            .bind(reference)
            .fetch_optional(pool)
            .await?;

    Ok(booking)
}

/// Find booking by reference with FOR UPDATE lock (payment, cancel)
pub async fn find_by_reference_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    reference: &str,
) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE booking_reference = $1 FOR UPDATE",
    )
    .bind(reference)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(booking)
}

/// Find booking by PNR. Expired bookings fall out of the PNR namespace.
pub async fn find_by_pnr(pool: &PgPool, pnr: &str) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE pnr = $1 AND status <> 'expired'",
    )
    .bind(pnr)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Lock booking row by ID
pub async fn find_by_id_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(booking)
}

/// List a user's bookings, newest first, with total count
pub async fn list_for_user_paginated(
    pool: &PgPool,
    user_id: Uuid,
    page: i32,
    page_size: i32,
) -> Result<(Vec<Booking>, i64)> {
    let offset = (page - 1) as i64 * page_size as i64;

    let bookings = sqlx::query_as::<_, Booking>(
        r#"
        SELECT * FROM bookings
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(page_size as i64)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok((bookings, total.0))
}

/// Bookings the reaper should expire (for background job)
pub async fn list_expirable(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(
        r#"
        SELECT * FROM bookings
        WHERE status IN ('held', 'pending_payment')
          AND hold_expires_at <= $1
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Record a failed payment attempt; the hold stays alive until expiry
pub async fn mark_pending_payment(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET status = 'pending_payment',
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

/// Confirm a booking: payment recorded, PNR assigned
pub async fn confirm(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
    paid_amount: Decimal,
    method: PaymentMethod,
    transaction_id: &str,
    pnr: &str,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET status = 'confirmed',
            paid_amount = $2,
            payment_method = $3,
            transaction_id = $4,
            pnr = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(paid_amount)
    .bind(method)
    .bind(transaction_id)
    .bind(pnr)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

/// Move a booking to a terminal state (Cancelled or Expired)
pub async fn close(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
    status: BookingStatus,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET status = $2,
            cancelled_at = CASE WHEN $2 = 'cancelled'::booking_status THEN NOW() ELSE cancelled_at END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

/// Whether a PNR is already taken among not-Expired bookings
pub async fn pnr_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    pnr: &str,
) -> Result<bool> {
    let exists: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM bookings WHERE pnr = $1 AND status <> 'expired')",
    )
    .bind(pnr)
    .fetch_one(&mut **tx)
    .await?;

    Ok(exists.0)
}
