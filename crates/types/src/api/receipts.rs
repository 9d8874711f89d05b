use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enums::{CabinClass, PaymentMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    Purchase,
    Cancellation,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceiptFlight {
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub gate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceiptPassenger {
    pub name: String,
    pub seat_number: String,
    pub cabin_class: CabinClass,
    pub ticket_number: Option<String>,
}

/// The structured record handed to the external renderer. The core never
/// concerns itself with the rendered bytes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceiptDocument {
    pub kind: ReceiptKind,
    pub pnr: String,
    pub booking_reference: String,
    pub flight: ReceiptFlight,
    pub passengers: Vec<ReceiptPassenger>,
    pub total_fare: Decimal,
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub issued_at: DateTime<Utc>,
}
