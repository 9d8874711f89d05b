use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use skyfare_types::enums::{BookingStatus, CabinClass, PaymentMethod};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub booking_reference: String,
    pub pnr: Option<String>,
    pub user_id: Uuid,
    pub flight_id: Uuid,
    pub tier: CabinClass,
    pub status: BookingStatus,
    /// Quoted at hold time and immutable afterwards.
    pub total_fare: Decimal,
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub hold_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}
