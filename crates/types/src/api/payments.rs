use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PayBookingRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

/// One recorded gateway attempt, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub booking_reference: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
