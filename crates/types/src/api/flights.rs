use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::{CabinClass, FlightStatus};

/// Flight as returned by search and flight lookup: static catalog fields
/// plus fares and availability computed at request time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FlightSummary {
    pub id: Uuid,
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: FlightStatus,
    pub gate: Option<String>,
    pub delay_minutes: Option<i32>,
    pub delay_reason: Option<String>,
    /// Live fare per cabin class, computed from the latest committed
    /// demand index and seat counts. Never cached.
    pub price_map: BTreeMap<CabinClass, Decimal>,
    /// Remaining Available seats per cabin class.
    pub seats_by_class: BTreeMap<CabinClass, i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFlightStatusRequest {
    pub status: FlightStatus,
    #[validate(range(min = 0, max = 2880))]
    pub delay_minutes: Option<i32>,
    #[validate(length(max = 200))]
    pub delay_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignGateRequest {
    #[validate(length(min = 1, max = 8))]
    pub gate: String,
}

/// One fare-history sample as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FareHistoryPoint {
    pub tier: CabinClass,
    pub fare: Decimal,
    pub demand_index: f64,
    pub sampled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FareHistoryResponse {
    pub flight_id: Uuid,
    pub samples: Vec<FareHistoryPoint>,
}

/// Entry in the synthetic schedule feed for one airline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntry {
    pub flight_number: String,
    pub origin_code: String,
    pub destination_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: FlightStatus,
    pub gate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleFeedResponse {
    pub airline_code: String,
    pub flights: Vec<ScheduleEntry>,
}
