use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use skyfare_core::{feed, search};
use skyfare_db::queries::{fare_history, flights};
use skyfare_types::api::flights::{
    FareHistoryResponse, FlightSummary, ScheduleFeedResponse,
};
use skyfare_types::api::search::{SearchQuery, SearchResponse};
use skyfare_types::enums::CabinClass;
use skyfare_types::AppError;

use crate::middleware::AppState;
use crate::response::{bad_request, ApiError};

/// Search flights by route
pub async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    query
        .validate()
        .map_err(|e| bad_request(format!("Validation error: {}", e)))?;

    let response = search::search_flights(&state.db, &query, Utc::now()).await?;
    Ok(Json(response))
}

/// Get one flight with live fares
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlightSummary>, ApiError> {
    let summary = search::get_flight(&state.db, id, Utc::now()).await?;
    Ok(Json(summary))
}

#[derive(Deserialize)]
pub struct FareHistoryQuery {
    pub tier: Option<CabinClass>,
}

/// Fare history time series for a flight
pub async fn get_fare_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FareHistoryQuery>,
) -> Result<Json<FareHistoryResponse>, ApiError> {
    flights::find_by_id(&state.db, id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let samples = fare_history::list_for_flight(&state.db, id, query.tier)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(FareHistoryResponse {
        flight_id: id,
        samples: samples.into_iter().map(Into::into).collect(),
    }))
}

/// Synthetic schedule feed for one airline
pub async fn airline_schedule(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ScheduleFeedResponse>, ApiError> {
    let response = feed::schedule_feed(&state.db, &code, Utc::now()).await?;
    Ok(Json(response))
}
