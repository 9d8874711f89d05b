use chrono::{DateTime, Utc};
use uuid::Uuid;

use skyfare_db::queries::{bookings, seats, tickets};
use skyfare_db::PgPool;
use skyfare_types::enums::BookingStatus;
use skyfare_types::{AppError, Result};

/// Expire stale holds and reclaim their seats. One transaction per
/// booking; a failure on one is logged and the sweep continues.
pub async fn expire_stale_holds(pool: &PgPool, now: DateTime<Utc>) -> anyhow::Result<u32> {
    let stale = bookings::list_expirable(pool, now).await?;

    if stale.is_empty() {
        return Ok(0);
    }

    tracing::info!("Found {} expired holds to release", stale.len());

    let mut expired = 0;
    for booking in stale {
        match expire_one(pool, booking.id, now).await {
            Ok(true) => {
                expired += 1;
                tracing::info!(
                    booking_reference = %booking.booking_reference,
                    flight_id = %booking.flight_id,
                    "Hold expired, seats released"
                );
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(
                    booking_reference = %booking.booking_reference,
                    "Failed to expire hold: {}",
                    e
                );
            }
        }
    }

    Ok(expired)
}

/// Expire a single booking if it is still expirable under the lock.
/// Returns false when payment won the race.
async fn expire_one(pool: &PgPool, booking_id: Uuid, now: DateTime<Utc>) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let booking = bookings::find_by_id_for_update(&mut tx, booking_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if !booking.status.is_expirable() || now < booking.hold_expires_at {
        return Ok(false);
    }

    seats::release_for_booking(&mut tx, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tickets::delete_for_booking(&mut tx, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    bookings::close(&mut tx, booking.id, BookingStatus::Expired)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tx.commit().await?;
    Ok(true)
}
