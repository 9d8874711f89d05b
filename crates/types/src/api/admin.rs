use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::{CabinClass, UserRole};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAirportRequest {
    #[validate(length(min = 3, max = 3))]
    pub code: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 80))]
    pub city: String,
    #[validate(length(min = 1, max = 80))]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAirlineRequest {
    #[validate(length(min = 2, max = 2))]
    pub code: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAircraftRequest {
    #[validate(length(min = 1, max = 16))]
    pub registration: String,
    #[validate(length(min = 1, max = 80))]
    pub model: String,
    /// Seats per cabin class. The flight seat map is generated from this.
    pub class_distribution: BTreeMap<CabinClass, i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    /// Opaque credential hash; authentication itself lives with the
    /// external identity collaborator.
    #[validate(length(min = 1, max = 200))]
    pub credentials: String,
    #[validate(length(max = 120))]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFlightRequest {
    #[validate(length(min = 3, max = 8))]
    pub flight_number: String,
    pub airline_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub aircraft_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Base fare per cabin class; every class present on the aircraft
    /// must be priced.
    pub base_fare: BTreeMap<CabinClass, Decimal>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub demand_index: f64,
}
