use uuid::Uuid;

use skyfare_db::models::{Booking, User};
use skyfare_db::queries::{bookings, seats, tickets};
use skyfare_db::PgPool;
use skyfare_types::enums::BookingStatus;
use skyfare_types::{AppError, Result};

use crate::retry::{retry, RetryPolicy};

/// Cancel a booking and release its seats.
///
/// Held and PendingPayment cancellations mirror the expiry flow. A
/// Confirmed cancellation returns the seats but keeps `paid_amount` on
/// the row for the downstream refund. Cancelling an already closed
/// booking is a no-op that returns the existing state.
pub async fn cancel_booking(pool: &PgPool, booking_id: Uuid, actor: &User) -> Result<Booking> {
    let policy = RetryPolicy::default();
    retry(&policy, || cancel_tx(pool, booking_id, actor)).await
}

async fn cancel_tx(pool: &PgPool, booking_id: Uuid, actor: &User) -> Result<Booking> {
    let mut tx = pool.begin().await?;

    let booking = bookings::find_by_id_for_update(&mut tx, booking_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != actor.id && !actor.role.is_staff() {
        return Err(AppError::Forbidden);
    }

    if !booking.status.can_transition_to(BookingStatus::Cancelled) {
        // Already closed; report the state as it stands.
        return Ok(booking);
    }

    let released = seats::release_for_booking(&mut tx, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Tentative tickets of an unpaid hold vanish with it; confirmed
    // bookings keep theirs for the cancellation receipt.
    if booking.status != BookingStatus::Confirmed {
        tickets::delete_for_booking(&mut tx, booking.id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    let cancelled = bookings::close(&mut tx, booking.id, BookingStatus::Cancelled)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tx.commit().await?;

    tracing::info!(
        booking_reference = %cancelled.booking_reference,
        previous_status = ?booking.status,
        seats_released = released,
        "Booking cancelled"
    );

    Ok(cancelled)
}
