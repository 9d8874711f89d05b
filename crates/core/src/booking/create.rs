use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use skyfare_db::models::{Booking, Seat};
use skyfare_db::queries::{bookings, flights, seats, tickets, users};
use skyfare_db::PgPool;
use skyfare_types::api::bookings::{CreateBookingRequest, PassengerSpec};
use skyfare_types::enums::SeatStatus;
use skyfare_types::{AppError, Result};

use super::utils::{generate_booking_reference, within_drift_tolerance, MAX_PASSENGERS_PER_BOOKING};
use crate::config::CoreConfig;
use crate::pricing::{self, FareSnapshot};
use crate::retry::{retry, RetryPolicy};

/// Create a hold: lock the flight, lock and assign seats, freeze the
/// fare, insert the booking and its tentative tickets.
///
/// The flight row lock serializes booking attempts per flight; seat
/// rows are then locked in ascending seat-number order. Serialization
/// aborts are retried with backoff before surfacing.
pub async fn create_hold(
    pool: &PgPool,
    config: &CoreConfig,
    request: &CreateBookingRequest,
    now: DateTime<Utc>,
) -> Result<Booking> {
    if request.passengers.is_empty() {
        return Err(AppError::InvalidArgument(
            "At least one passenger is required".to_string(),
        ));
    }
    if request.passengers.len() > MAX_PASSENGERS_PER_BOOKING {
        return Err(AppError::InvalidArgument(format!(
            "Passenger count exceeds limit of {}",
            MAX_PASSENGERS_PER_BOOKING
        )));
    }

    let requested_seats = requested_seat_ids(&request.passengers)?;

    let user = users::find_by_id(pool, request.user_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let policy = RetryPolicy::default();
    retry(&policy, || {
        create_hold_tx(pool, config, request, &requested_seats, user.id, now)
    })
    .await
}

/// Requested seat ids, rejecting duplicates.
fn requested_seat_ids(passengers: &[PassengerSpec]) -> Result<Vec<Uuid>> {
    let ids: Vec<Uuid> = passengers.iter().filter_map(|p| p.seat_id).collect();

    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    if deduped.len() != ids.len() {
        return Err(AppError::InvalidArgument(
            "The same seat was requested for two passengers".to_string(),
        ));
    }

    Ok(ids)
}

async fn create_hold_tx(
    pool: &PgPool,
    config: &CoreConfig,
    request: &CreateBookingRequest,
    requested_seats: &[Uuid],
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Booking> {
    let mut tx = pool.begin().await?;

    // Flight lock first; this is the serialization point for all
    // bookings on the flight.
    let flight = flights::find_by_id_for_update(&mut tx, request.flight_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    if !flight.status.is_bookable() {
        return Err(AppError::FlightNotBookable(format!(
            "Flight {} is not accepting bookings",
            flight.flight_number
        )));
    }
    if now >= flight.departure_time {
        return Err(AppError::FlightNotBookable(format!(
            "Flight {} has already departed",
            flight.flight_number
        )));
    }

    // Explicitly requested seats, then fill from the tier's pool.
    let mut locked = if requested_seats.is_empty() {
        Vec::new()
    } else {
        seats::find_by_ids_for_update(&mut tx, flight.id, requested_seats)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    };

    if locked.len() != requested_seats.len() {
        return Err(AppError::SeatUnavailable(
            "A requested seat does not exist on this flight".to_string(),
        ));
    }
    for seat in &locked {
        if seat.status != SeatStatus::Available {
            return Err(AppError::SeatUnavailable(format!(
                "Seat {} is no longer available",
                seat.seat_number
            )));
        }
        if seat.cabin_class != request.tier {
            return Err(AppError::InvalidArgument(format!(
                "Seat {} is not in the requested tier",
                seat.seat_number
            )));
        }
    }

    let missing = request.passengers.len() - locked.len();
    if missing > 0 {
        let fill = seats::find_available_for_update(
            &mut tx,
            flight.id,
            request.tier,
            requested_seats,
            missing as i64,
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

        if fill.len() < missing {
            return Err(AppError::SeatUnavailable(format!(
                "Only {} {} seat(s) left on flight {}",
                locked.len() + fill.len(),
                request.tier.as_str(),
                flight.flight_number
            )));
        }
        locked.extend(fill);
    }

    // Price under the lock, against committed demand and availability.
    let counts = seats::count_by_class_tx(&mut tx, flight.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let snapshot = FareSnapshot::from_flight(&flight, &counts, request.tier, now)?;
    let unit_fare = pricing::quote(&snapshot)?;

    if !within_drift_tolerance(request.quoted_unit_fare, unit_fare, config.price_drift_tolerance) {
        return Err(AppError::PriceChanged {
            quoted: request.quoted_unit_fare,
            current: unit_fare,
        });
    }

    let surcharges: Decimal = locked.iter().map(|s| s.surcharge).sum();
    let total_fare = unit_fare * Decimal::from(request.passengers.len() as u32) + surcharges;

    let booking = bookings::insert_hold(
        &mut tx,
        &generate_booking_reference(),
        user_id,
        flight.id,
        request.tier,
        total_fare,
        now + config.hold_ttl(),
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let seat_ids: Vec<Uuid> = locked.iter().map(|s| s.id).collect();
    seats::hold(&mut tx, &seat_ids, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for (passenger, seat) in pair_passengers(&request.passengers, &locked) {
        tickets::insert(
            &mut tx,
            booking.id,
            seat.id,
            &passenger.name,
            passenger.age,
            passenger.gender.as_deref(),
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    tx.commit().await?;

    tracing::info!(
        booking_reference = %booking.booking_reference,
        flight_number = %flight.flight_number,
        passengers = request.passengers.len(),
        %total_fare,
        "Hold created"
    );

    Ok(booking)
}

/// Pair each passenger with their requested seat, or the next unclaimed
/// one from the locked set.
fn pair_passengers<'a>(
    passengers: &'a [PassengerSpec],
    locked: &'a [Seat],
) -> Vec<(&'a PassengerSpec, &'a Seat)> {
    let by_id: HashMap<Uuid, &Seat> = locked.iter().map(|s| (s.id, s)).collect();
    let requested: Vec<Uuid> = passengers.iter().filter_map(|p| p.seat_id).collect();
    let mut unclaimed = locked.iter().filter(|s| !requested.contains(&s.id));

    passengers
        .iter()
        .filter_map(|p| {
            let seat = match p.seat_id {
                Some(id) => by_id.get(&id).copied(),
                None => unclaimed.next(),
            };
            seat.map(|s| (p, s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfare_types::enums::{CabinClass, SeatPosition};

    fn seat(id: u128, number: &str) -> Seat {
        Seat {
            id: Uuid::from_u128(id),
            flight_id: Uuid::from_u128(1000),
            seat_number: number.to_string(),
            cabin_class: CabinClass::Economy,
            position: SeatPosition::Window,
            surcharge: Decimal::ZERO,
            status: SeatStatus::Available,
            booking_id: None,
        }
    }

    fn passenger(name: &str, seat_id: Option<Uuid>) -> PassengerSpec {
        PassengerSpec {
            name: name.to_string(),
            age: 30,
            gender: None,
            seat_id,
        }
    }

    #[test]
    fn test_pairing_honors_requested_seats() {
        let seats = vec![seat(1, "1A"), seat(2, "1B"), seat(3, "1C")];
        let passengers = vec![
            passenger("Asha", Some(Uuid::from_u128(2))),
            passenger("Ravi", None),
            passenger("Mira", None),
        ];

        let pairs = pair_passengers(&passengers, &seats);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1.seat_number, "1B");
        assert_eq!(pairs[1].1.seat_number, "1A");
        assert_eq!(pairs[2].1.seat_number, "1C");
    }

    #[test]
    fn test_duplicate_seat_request_rejected() {
        let id = Some(Uuid::from_u128(5));
        let passengers = vec![passenger("A", id), passenger("B", id)];
        assert!(requested_seat_ids(&passengers).is_err());
    }

    #[test]
    fn test_distinct_seat_requests_accepted() {
        let passengers = vec![
            passenger("A", Some(Uuid::from_u128(5))),
            passenger("B", Some(Uuid::from_u128(6))),
            passenger("C", None),
        ];
        let ids = requested_seat_ids(&passengers).unwrap();
        assert_eq!(ids.len(), 2);
    }
}
