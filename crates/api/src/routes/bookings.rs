use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use skyfare_core::booking::{cancel_booking, create_hold, pay_booking};
use skyfare_core::receipt::build_receipt;
use skyfare_db::models::Booking;
use skyfare_db::queries::{bookings, tickets, users};
use skyfare_types::api::bookings::{
    BookingResponse, CreateBookingRequest, UserBookingsResponse,
};
use skyfare_types::api::payments::PayBookingRequest;
use skyfare_types::api::PageInfo;
use skyfare_types::enums::BookingStatus;
use skyfare_types::AppError;

use crate::middleware::{ActorUser, AppState};
use crate::response::{bad_request, ApiError};

/// Query parameters for the bookings list endpoint
#[derive(Deserialize)]
pub struct BookingsQuery {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

async fn to_response(state: &AppState, booking: Booking) -> Result<BookingResponse, ApiError> {
    let details = tickets::list_for_booking(&state.db, booking.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(booking.into_response(details))
}

/// Create a hold
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| bad_request(format!("Validation error: {}", e)))?;
    for passenger in &payload.passengers {
        passenger
            .validate()
            .map_err(|e| bad_request(format!("Validation error: {}", e)))?;
    }

    let booking = create_hold(&state.db, &state.config, &payload, Utc::now()).await?;
    Ok(Json(to_response(&state, booking).await?))
}

/// List my bookings with pagination
pub async fn list_my_bookings(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<UserBookingsResponse>, ApiError> {
    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, 50);

    let (rows, total) = bookings::list_for_user_paginated(&state.db, user.id, page, page_size)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut data = Vec::with_capacity(rows.len());
    for booking in rows {
        data.push(to_response(&state, booking).await?);
    }

    Ok(Json(UserBookingsResponse {
        data,
        page_info: PageInfo::new(page, page_size, total),
    }))
}

/// Get booking by reference
pub async fn get_booking(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = bookings::find_by_reference(&state.db, &reference)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != user.id && !user.role.is_staff() {
        return Err(AppError::Forbidden.into());
    }

    Ok(Json(to_response(&state, booking).await?))
}

/// Pay a held booking
pub async fn pay(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(payload): Json<PayBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = pay_booking(
        &state.db,
        &state.payments,
        &reference,
        payload.amount,
        payload.method,
        Utc::now(),
    )
    .await?;

    // Receipt email is post-commit and fire-and-forget; a delivery
    // failure never unwinds the confirmation.
    if let Some(pnr) = booking.pnr.clone() {
        enqueue_receipt_email(state.clone(), booking.user_id, pnr);
    }

    Ok(Json(to_response(&state, booking).await?))
}

/// Cancel booking by reference
pub async fn cancel(
    ActorUser(user): ActorUser,
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = bookings::find_by_reference(&state.db, &reference)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let was_confirmed = booking.status == BookingStatus::Confirmed;
    let cancelled = cancel_booking(&state.db, booking.id, &user).await?;

    // Paid cancellations get a cancellation receipt.
    if was_confirmed && cancelled.status == BookingStatus::Cancelled {
        if let Some(pnr) = cancelled.pnr.clone() {
            enqueue_receipt_email(state.clone(), cancelled.user_id, pnr);
        }
    }

    Ok(Json(to_response(&state, cancelled).await?))
}

/// Build the receipt off the request path and hand it to the mailer.
pub(crate) fn enqueue_receipt_email(state: AppState, user_id: uuid::Uuid, pnr: String) {
    tokio::spawn(async move {
        let recipient = match users::find_by_id(&state.db, user_id).await {
            Ok(Some(user)) => user.email,
            _ => {
                tracing::warn!(%user_id, "Receipt email skipped: user lookup failed");
                return;
            }
        };

        match build_receipt(&state.db, &pnr, Utc::now()).await {
            Ok(document) => {
                if let Err(e) = state.mailer.send(&recipient, &document).await {
                    tracing::error!(%pnr, "Receipt email failed: {}", e);
                }
            }
            Err(e) => tracing::error!(%pnr, "Receipt build failed: {}", e),
        }
    });
}
