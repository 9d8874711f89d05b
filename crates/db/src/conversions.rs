//! Conversion implementations from DB models to API response types.

use crate::models::{Booking, FareHistorySample, Flight, Payment, TicketDetail};
use skyfare_types::api::{
    bookings::{BookingResponse, PnrStatusResponse, TicketView},
    flights::{FareHistoryPoint, ScheduleEntry},
    payments::PaymentRecord,
};

impl From<TicketDetail> for TicketView {
    fn from(t: TicketDetail) -> Self {
        Self {
            ticket_number: t.ticket_number,
            passenger_name: t.passenger_name,
            passenger_age: t.passenger_age,
            passenger_gender: t.passenger_gender,
            seat_number: t.seat_number,
            cabin_class: t.cabin_class,
            position: t.position,
        }
    }
}

impl Booking {
    pub fn into_response(self, tickets: Vec<TicketDetail>) -> BookingResponse {
        BookingResponse {
            id: self.id,
            booking_reference: self.booking_reference,
            pnr: self.pnr,
            user_id: self.user_id,
            flight_id: self.flight_id,
            tier: self.tier,
            status: self.status,
            total_fare: self.total_fare,
            paid_amount: self.paid_amount,
            payment_method: self.payment_method,
            transaction_id: self.transaction_id,
            hold_expires_at: self.hold_expires_at,
            created_at: self.created_at,
            cancelled_at: self.cancelled_at,
            tickets: tickets.into_iter().map(Into::into).collect(),
        }
    }

    /// Redacted public view keyed by PNR.
    pub fn into_pnr_status(self, flight: &Flight) -> Option<PnrStatusResponse> {
        Some(PnrStatusResponse {
            pnr: self.pnr?,
            status: self.status,
            flight_number: flight.flight_number.clone(),
            origin_code: flight.origin_code.clone(),
            destination_code: flight.destination_code.clone(),
            departure_time: flight.departure_time,
            flight_status: flight.status,
            gate: flight.gate.clone(),
        })
    }
}

impl From<Flight> for ScheduleEntry {
    fn from(f: Flight) -> Self {
        Self {
            flight_number: f.flight_number,
            origin_code: f.origin_code,
            destination_code: f.destination_code,
            departure_time: f.departure_time,
            arrival_time: f.arrival_time,
            status: f.status,
            gate: f.gate,
        }
    }
}

impl From<Payment> for PaymentRecord {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            booking_reference: p.booking_reference,
            amount: p.amount,
            method: p.method,
            status: p.status,
            transaction_id: p.transaction_id,
            created_at: p.created_at,
        }
    }
}

impl From<FareHistorySample> for FareHistoryPoint {
    fn from(s: FareHistorySample) -> Self {
        Self {
            tier: s.tier,
            fare: s.fare,
            demand_index: s.demand_index,
            sampled_at: s.sampled_at,
        }
    }
}
