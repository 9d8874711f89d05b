use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use skyfare_core::booking::cancel_booking;
use skyfare_core::receipt::build_receipt;
use skyfare_db::queries::{bookings, flights, tickets};
use skyfare_integrations::ReceiptRenderer;
use skyfare_types::api::bookings::{BookingResponse, PnrStatusResponse};
use skyfare_types::enums::BookingStatus;
use skyfare_types::{validate_pnr_format, AppError};

use crate::middleware::{ActorUser, AppState};
use crate::response::{bad_request, ApiError};
use crate::routes::bookings::enqueue_receipt_email;

async fn booking_by_pnr(
    state: &AppState,
    pnr: &str,
) -> Result<skyfare_db::models::Booking, ApiError> {
    validate_pnr_format(pnr).map_err(|e| bad_request(e))?;

    let booking = bookings::find_by_pnr(&state.db, pnr)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("No booking for PNR {}", pnr)))?;

    Ok(booking)
}

/// Get the full booking record by PNR (owner or staff)
pub async fn get_by_pnr(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = booking_by_pnr(&state, &pnr).await?;

    if booking.user_id != user.id && !user.role.is_staff() {
        return Err(AppError::Forbidden.into());
    }

    let details = tickets::list_for_booking(&state.db, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(booking.into_response(details)))
}

/// Public redacted PNR status
pub async fn pnr_status(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<PnrStatusResponse>, ApiError> {
    let booking = booking_by_pnr(&state, &pnr).await?;

    let flight = flights::find_by_id(&state.db, booking.flight_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let status = booking
        .into_pnr_status(&flight)
        .ok_or_else(|| AppError::Internal("Booking has no PNR".to_string()))?;

    Ok(Json(status))
}

/// Cancel booking by PNR
pub async fn cancel_by_pnr(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = booking_by_pnr(&state, &pnr).await?;

    let was_confirmed = booking.status == BookingStatus::Confirmed;
    let cancelled = cancel_booking(&state.db, booking.id, &user).await?;

    if was_confirmed && cancelled.status == BookingStatus::Cancelled {
        if let Some(pnr) = cancelled.pnr.clone() {
            enqueue_receipt_email(state.clone(), cancelled.user_id, pnr);
        }
    }

    let details = tickets::list_for_booking(&state.db, cancelled.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(cancelled.into_response(details)))
}

/// Rendered receipt for a confirmed booking (owner or staff)
pub async fn receipt(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = booking_by_pnr(&state, &pnr).await?;

    if booking.user_id != user.id && !user.role.is_staff() {
        return Err(AppError::Forbidden.into());
    }

    let document = build_receipt(&state.db, &pnr, Utc::now()).await?;
    let bytes = state
        .renderer
        .render(&document)
        .map_err(|e| AppError::Internal(format!("Receipt rendering failed: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, state.renderer.content_type())],
        bytes,
    ))
}
