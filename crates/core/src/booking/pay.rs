use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use skyfare_db::models::Booking;
use skyfare_db::queries::{bookings, payments, seats, tickets};
use skyfare_db::PgPool;
use skyfare_types::enums::{PaymentMethod, PaymentStatus};
use skyfare_types::{AppError, Result};

use crate::pnr;
use crate::retry::{retry, RetryPolicy};

/// Outcome of one charge attempt at the payment adapter.
#[derive(Debug, Clone)]
pub struct ChargeOutcome {
    pub approved: bool,
    pub transaction_id: String,
}

/// Seam to the payment collaborator. The production implementation is a
/// simulated gateway; tests substitute their own.
pub trait PaymentAdapter {
    fn charge(
        &self,
        booking_reference: &str,
        amount: Decimal,
        method: PaymentMethod,
    ) -> impl std::future::Future<Output = anyhow::Result<ChargeOutcome>> + Send;
}

/// Undershoot tolerated on the paid amount, one minor unit.
const AMOUNT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Take payment for a held booking and confirm it.
///
/// On gateway refusal the booking moves to PendingPayment and stays
/// retryable until the hold expires. On success seats flip to Sold, the
/// PNR is issued and tickets get their numbers, all in one transaction.
pub async fn pay_booking<P: PaymentAdapter>(
    pool: &PgPool,
    gateway: &P,
    booking_reference: &str,
    amount: Decimal,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<Booking> {
    let policy = RetryPolicy::default();
    retry(&policy, || {
        pay_tx(pool, gateway, booking_reference, amount, method, now)
    })
    .await
}

async fn pay_tx<P: PaymentAdapter>(
    pool: &PgPool,
    gateway: &P,
    booking_reference: &str,
    amount: Decimal,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<Booking> {
    let mut tx = pool.begin().await?;

    let booking = bookings::find_by_reference_for_update(&mut tx, booking_reference)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if !booking.status.is_payable() {
        return Err(AppError::InvalidState(format!(
            "Booking is {:?}, payment is not accepted",
            booking.status
        )));
    }
    if now >= booking.hold_expires_at {
        return Err(AppError::HoldExpired);
    }
    if booking.total_fare - amount > AMOUNT_EPSILON {
        return Err(AppError::AmountMismatch {
            expected: booking.total_fare,
            actual: amount,
        });
    }

    let outcome = gateway
        .charge(booking_reference, amount, method)
        .await
        .map_err(|e| AppError::Internal(format!("Payment adapter error: {}", e)))?;

    if !outcome.approved {
        payments::insert(
            &mut tx,
            booking_reference,
            amount,
            method,
            PaymentStatus::Failed,
            Some(&outcome.transaction_id),
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

        bookings::mark_pending_payment(&mut tx, booking.id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tx.commit().await?;

        tracing::warn!(
            booking_reference,
            transaction_id = %outcome.transaction_id,
            "Payment declined, booking stays retryable until hold expiry"
        );
        return Err(AppError::PaymentFailed(
            "Payment was declined, retry before the hold expires".to_string(),
        ));
    }

    payments::insert(
        &mut tx,
        booking_reference,
        amount,
        method,
        PaymentStatus::Success,
        Some(&outcome.transaction_id),
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let sold = seats::mark_sold(&mut tx, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if sold == 0 {
        return Err(AppError::Internal(
            "Booking holds no seats to confirm".to_string(),
        ));
    }

    let pnr = pnr::issue(&mut tx).await?;

    let held_tickets = tickets::list_for_booking_tx(&mut tx, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    for (index, ticket) in held_tickets.iter().enumerate() {
        let number = format!("{}-{:02}", pnr, index + 1);
        tickets::set_number(&mut tx, ticket.id, &number)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    let booking = bookings::confirm(
        &mut tx,
        booking.id,
        amount,
        method,
        &outcome.transaction_id,
        &pnr,
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tx.commit().await?;

    tracing::info!(
        booking_reference,
        pnr = %pnr,
        transaction_id = %outcome.transaction_id,
        seats = sold,
        "Booking confirmed"
    );

    Ok(booking)
}
