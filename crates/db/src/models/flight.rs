use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

use skyfare_types::enums::{CabinClass, FlightStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub aircraft_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_fare: sqlx::types::Json<BTreeMap<CabinClass, Decimal>>,
    pub demand_index: f64,
    pub status: FlightStatus,
    pub delay_minutes: Option<i32>,
    pub delay_reason: Option<String>,
    pub gate: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    pub fn duration_minutes(&self) -> i64 {
        (self.arrival_time - self.departure_time).num_minutes()
    }
}
