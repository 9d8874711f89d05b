//! Catalog administration: airports, airlines, aircraft, flights.
//! Creating a flight materialises its seat map so seats exist before
//! the first search.

use rust_decimal::Decimal;
use uuid::Uuid;

use skyfare_db::models::{Aircraft, Airline, Airport, Flight, User};
use skyfare_db::queries::{catalog, flights, seats, users};
use skyfare_db::PgPool;
use skyfare_types::api::admin::{
    CreateAircraftRequest, CreateAirlineRequest, CreateAirportRequest, CreateFlightRequest,
    CreateUserRequest,
};
use skyfare_types::enums::FlightStatus;
use skyfare_types::{validate_airline_code, validate_airport_code, AppError, Result};

use crate::seatmap::generate_seat_map;

pub async fn create_airport(pool: &PgPool, request: &CreateAirportRequest) -> Result<Airport> {
    validate_airport_code(&request.code).map_err(AppError::InvalidArgument)?;

    catalog::insert_airport(pool, &request.code, &request.name, &request.city, &request.country)
        .await
        .map_err(conflict_on_duplicate("Airport"))
}

pub async fn create_airline(pool: &PgPool, request: &CreateAirlineRequest) -> Result<Airline> {
    validate_airline_code(&request.code).map_err(AppError::InvalidArgument)?;

    catalog::insert_airline(pool, &request.code, &request.name)
        .await
        .map_err(conflict_on_duplicate("Airline"))
}

pub async fn create_aircraft(pool: &PgPool, request: &CreateAircraftRequest) -> Result<Aircraft> {
    let total_seats: i32 = request.class_distribution.values().sum();
    if total_seats <= 0 || request.class_distribution.values().any(|&c| c < 0) {
        return Err(AppError::InvalidArgument(
            "Class distribution must be non-negative and sum to at least one seat".to_string(),
        ));
    }

    let distribution = serde_json::to_value(&request.class_distribution)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    catalog::insert_aircraft(pool, &request.registration, &request.model, total_seats, distribution)
        .await
        .map_err(conflict_on_duplicate("Aircraft"))
}

pub async fn create_user(pool: &PgPool, request: &CreateUserRequest) -> Result<User> {
    users::insert(
        pool,
        &request.email,
        &request.credentials,
        request.full_name.as_deref(),
        request.role,
    )
    .await
    .map_err(conflict_on_duplicate("User"))
}

/// Create a flight and its seat map in one transaction.
pub async fn create_flight(pool: &PgPool, request: &CreateFlightRequest) -> Result<Flight> {
    if request.arrival_time <= request.departure_time {
        return Err(AppError::InvalidArgument(
            "Arrival must be after departure".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&request.demand_index) {
        return Err(AppError::InvalidArgument(
            "Demand index must be within [0, 100]".to_string(),
        ));
    }
    if request.base_fare.values().any(|&f| f <= Decimal::ZERO) {
        return Err(AppError::InvalidArgument(
            "Base fares must be positive".to_string(),
        ));
    }

    for code in [&request.origin_code, &request.destination_code] {
        catalog::find_airport(pool, code)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Unknown airport code {}", code)))?;
    }
    catalog::find_airline(pool, &request.airline_code)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| {
            AppError::NotFound(format!("Unknown airline {}", request.airline_code))
        })?;
    let aircraft = catalog::find_aircraft(pool, request.aircraft_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Aircraft not found".to_string()))?;

    // Every cabin on the aircraft must be priced.
    for cabin in aircraft.class_distribution.keys() {
        if !request.base_fare.contains_key(cabin) {
            return Err(AppError::InvalidArgument(format!(
                "No base fare for cabin {}",
                cabin.as_str()
            )));
        }
    }

    let base_fare = serde_json::to_value(&request.base_fare)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut tx = pool.begin().await?;

    let flight = flights::insert(
        &mut tx,
        &request.flight_number,
        &request.airline_code,
        &request.origin_code,
        &request.destination_code,
        request.aircraft_id,
        request.departure_time,
        request.arrival_time,
        base_fare,
        request.demand_index,
    )
    .await
    .map_err(conflict_on_duplicate("Flight"))?;

    let seat_map = generate_seat_map(&aircraft.class_distribution.0);
    seats::insert_map(&mut tx, flight.id, &seat_map)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tx.commit().await?;

    tracing::info!(
        flight_number = %flight.flight_number,
        seats = seat_map.len(),
        "Flight created with generated seat map"
    );

    Ok(flight)
}

/// Staff update of operational status and delay fields.
pub async fn update_flight_status(
    pool: &PgPool,
    id: Uuid,
    status: FlightStatus,
    delay_minutes: Option<i32>,
    delay_reason: Option<&str>,
) -> Result<Flight> {
    flights::update_status(pool, id, status, delay_minutes, delay_reason)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))
}

/// Airport-authority gate assignment.
pub async fn assign_gate(pool: &PgPool, id: Uuid, gate: &str) -> Result<Flight> {
    flights::assign_gate(pool, id, gate)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))
}

/// Map unique-violation database errors to Conflict, everything else to
/// Internal.
fn conflict_on_duplicate(entity: &'static str) -> impl Fn(anyhow::Error) -> AppError {
    move |e| match e.downcast::<sqlx::Error>() {
        Ok(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            AppError::Conflict(format!("{} already exists", entity))
        }
        Ok(other) => AppError::Database(other),
        Err(other) => AppError::Internal(other.to_string()),
    }
}
