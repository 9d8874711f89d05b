use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use skyfare_types::enums::{CabinClass, SeatPosition};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub seat_id: Uuid,
    pub passenger_name: String,
    pub passenger_age: i32,
    pub passenger_gender: Option<String>,
    pub ticket_number: Option<String>,
}

/// Ticket joined with its seat, for booking detail views and receipts.
#[derive(Debug, Clone, FromRow)]
pub struct TicketDetail {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub seat_id: Uuid,
    pub passenger_name: String,
    pub passenger_age: i32,
    pub passenger_gender: Option<String>,
    pub ticket_number: Option<String>,
    pub seat_number: String,
    pub cabin_class: CabinClass,
    pub position: SeatPosition,
}
