use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use skyfare_types::enums::CabinClass;

/// Append-only fare sample recorded by the demand simulator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FareHistorySample {
    pub id: i64,
    pub flight_id: Uuid,
    pub tier: CabinClass,
    pub fare: Decimal,
    pub demand_index: f64,
    pub sampled_at: DateTime<Utc>,
}
