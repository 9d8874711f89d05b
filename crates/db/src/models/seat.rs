use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use skyfare_types::enums::{CabinClass, SeatPosition, SeatStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub cabin_class: CabinClass,
    pub position: SeatPosition,
    pub surcharge: Decimal,
    pub status: SeatStatus,
    pub booking_id: Option<Uuid>,
}

/// Per-class availability for one flight, as produced by the grouped
/// seat count query.
#[derive(Debug, Clone, FromRow)]
pub struct SeatClassCount {
    pub cabin_class: CabinClass,
    pub available: i64,
    pub total: i64,
}
