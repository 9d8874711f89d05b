use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use skyfare_core::CoreConfig;
use skyfare_db::{models::User, queries::users, PgPool};
use skyfare_integrations::{HtmlReceiptRenderer, PaymentGateway, ReceiptMailer};
use skyfare_types::AppError;

use crate::response::ApiError;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: CoreConfig,
    pub payments: PaymentGateway,
    pub mailer: ReceiptMailer,
    pub renderer: HtmlReceiptRenderer,
}

/// Extractor for the acting user, resolved from the `X-User-Id` header.
/// Session management is an external collaborator; by the time requests
/// reach this service the header carries a verified identity.
///
/// Usage: `async fn handler(ActorUser(user): ActorUser)`
pub struct ActorUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for ActorUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::InvalidArgument(
                    "Missing X-User-Id header".to_string(),
                ))
            })?;

        let user_id: Uuid = header.parse().map_err(|_| {
            ApiError(AppError::InvalidArgument(
                "X-User-Id is not a valid id".to_string(),
            ))
        })?;

        let app_state = AppState::from_ref(state);

        let user = users::find_by_id(&app_state.db, user_id)
            .await
            .map_err(|e| ApiError(AppError::Internal(e.to_string())))?
            .ok_or_else(|| ApiError(AppError::Forbidden))?;

        Ok(ActorUser(user))
    }
}
