//! Receipt assembly. The core builds a structured record; rendering to
//! bytes belongs to the external renderer.

use chrono::{DateTime, Utc};

use skyfare_db::queries::{bookings, flights, payments, tickets};
use skyfare_db::PgPool;
use skyfare_types::api::receipts::{
    ReceiptDocument, ReceiptFlight, ReceiptKind, ReceiptPassenger,
};
use skyfare_types::enums::BookingStatus;
use skyfare_types::{AppError, Result};

/// Build the receipt record for a confirmed (or cancelled-after-payment)
/// booking, addressed by PNR.
pub async fn build_receipt(pool: &PgPool, pnr: &str, now: DateTime<Utc>) -> Result<ReceiptDocument> {
    let booking = bookings::find_by_pnr(pool, pnr)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("No booking for PNR {}", pnr)))?;

    let kind = match booking.status {
        BookingStatus::Confirmed => ReceiptKind::Purchase,
        BookingStatus::Cancelled => ReceiptKind::Cancellation,
        other => {
            return Err(AppError::InvalidState(format!(
                "No receipt for a booking in state {:?}",
                other
            )))
        }
    };

    let flight = flights::find_by_id(pool, booking.flight_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let booking_tickets = tickets::list_for_booking(pool, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let paid_at = payments::latest_success(pool, &booking.booking_reference)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map(|p| p.created_at);

    let passengers = booking_tickets
        .into_iter()
        .map(|t| ReceiptPassenger {
            name: t.passenger_name,
            seat_number: t.seat_number,
            cabin_class: t.cabin_class,
            ticket_number: t.ticket_number,
        })
        .collect();

    Ok(ReceiptDocument {
        kind,
        pnr: pnr.to_string(),
        booking_reference: booking.booking_reference,
        flight: ReceiptFlight {
            flight_number: flight.flight_number,
            airline_code: flight.airline_code,
            origin_code: flight.origin_code,
            destination_code: flight.destination_code,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            gate: flight.gate,
        },
        passengers,
        total_fare: booking.total_fare,
        paid_amount: booking.paid_amount,
        payment_method: booking.payment_method,
        transaction_id: booking.transaction_id,
        paid_at,
        issued_at: now,
    })
}
