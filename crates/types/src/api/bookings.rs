use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::PageInfo;
use crate::enums::{BookingStatus, CabinClass, FlightStatus, PaymentMethod, SeatPosition};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PassengerSpec {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0, max = 120))]
    pub age: i32,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    /// Requested seat. Omitted means the next available seat of the
    /// booked tier, in seat-number order.
    pub seat_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub flight_id: Uuid,
    pub tier: CabinClass,
    #[validate(length(min = 1, max = 9))]
    pub passengers: Vec<PassengerSpec>,
    /// Unit fare the client saw when it searched. Always checked against
    /// the freshly computed fare under the flight lock; a stale quote is
    /// rejected and the client must re-quote.
    pub quoted_unit_fare: Decimal,
}

/// Ticket view embedded in booking responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketView {
    pub ticket_number: Option<String>,
    pub passenger_name: String,
    pub passenger_age: i32,
    pub passenger_gender: Option<String>,
    pub seat_number: String,
    pub cabin_class: CabinClass,
    pub position: SeatPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_reference: String,
    /// Assigned at confirmation; absent while the booking is held.
    pub pnr: Option<String>,
    pub user_id: Uuid,
    pub flight_id: Uuid,
    pub tier: CabinClass,
    pub status: BookingStatus,
    pub total_fare: Decimal,
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub hold_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub tickets: Vec<TicketView>,
}

/// Paginated response for a user's bookings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBookingsResponse {
    pub data: Vec<BookingResponse>,
    pub page_info: PageInfo,
}

/// Public PNR status view. Deliberately redacted: no traveller identity,
/// no payment details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PnrStatusResponse {
    pub pnr: String,
    pub status: BookingStatus,
    pub flight_number: String,
    pub origin_code: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub flight_status: FlightStatus,
    pub gate: Option<String>,
}
