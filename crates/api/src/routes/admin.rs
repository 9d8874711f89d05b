use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use skyfare_core::catalog;
use skyfare_db::models::{Aircraft, Airline, Airport, Flight, User};
use skyfare_types::api::admin::{
    CreateAircraftRequest, CreateAirlineRequest, CreateAirportRequest, CreateFlightRequest,
    CreateUserRequest,
};
use skyfare_types::api::flights::{AssignGateRequest, UpdateFlightStatusRequest};
use skyfare_types::AppError;

use crate::middleware::{ActorUser, AppState};
use crate::response::{bad_request, ApiError};

fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload
        .validate()
        .map_err(|e| bad_request(format!("Validation error: {}", e)))?;
    Ok(payload)
}

/// Create airport (admin)
pub async fn create_airport(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateAirportRequest>,
) -> Result<Json<Airport>, ApiError> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;
    Ok(Json(catalog::create_airport(&state.db, &payload).await?))
}

/// Create airline (admin)
pub async fn create_airline(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateAirlineRequest>,
) -> Result<Json<Airline>, ApiError> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;
    Ok(Json(catalog::create_airline(&state.db, &payload).await?))
}

/// Create aircraft (admin)
pub async fn create_aircraft(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateAircraftRequest>,
) -> Result<Json<Aircraft>, ApiError> {
    if !user.role.can_manage_catalog() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;
    Ok(Json(catalog::create_aircraft(&state.db, &payload).await?))
}

/// Create user (admin)
pub async fn create_user(
    ActorUser(actor): ActorUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if !actor.role.can_manage_catalog() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;
    Ok(Json(catalog::create_user(&state.db, &payload).await?))
}

/// Create flight with generated seat map (admin or airline staff)
pub async fn create_flight(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateFlightRequest>,
) -> Result<Json<Flight>, ApiError> {
    if !user.role.can_update_flight_status() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;
    Ok(Json(catalog::create_flight(&state.db, &payload).await?))
}

/// Update flight status and delay fields (admin or airline staff)
pub async fn update_flight_status(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFlightStatusRequest>,
) -> Result<Json<Flight>, ApiError> {
    if !user.role.can_update_flight_status() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;

    let flight = catalog::update_flight_status(
        &state.db,
        id,
        payload.status,
        payload.delay_minutes,
        payload.delay_reason.as_deref(),
    )
    .await?;

    Ok(Json(flight))
}

/// Assign gate (admin or airport authority)
pub async fn assign_gate(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignGateRequest>,
) -> Result<Json<Flight>, ApiError> {
    if !user.role.can_assign_gate() {
        return Err(AppError::Forbidden.into());
    }
    let payload = validated(payload)?;

    let flight = catalog::assign_gate(&state.db, id, &payload.gate).await?;
    Ok(Json(flight))
}
