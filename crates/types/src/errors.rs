use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Seat unavailable: {0}")]
    SeatUnavailable(String),

    #[error("Flight not bookable: {0}")]
    FlightNotBookable(String),

    #[error("Fare changed: quoted {quoted}, current {current}")]
    PriceChanged { quoted: Decimal, current: Decimal },

    #[error("Hold expired")]
    HoldExpired,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Amount mismatch: expected {expected}, got {actual}")]
    AmountMismatch { expected: Decimal, actual: Decimal },

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable kind. Clients match on this, never on the
    /// message text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Database(_) => "internal",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::SeatUnavailable(_) => "seat_unavailable",
            Self::FlightNotBookable(_) => "flight_not_bookable",
            Self::PriceChanged { .. } => "price_changed",
            Self::HoldExpired => "hold_expired",
            Self::InvalidState(_) => "invalid_state",
            Self::AmountMismatch { .. } => "amount_mismatch",
            Self::PaymentFailed(_) => "payment_failed",
            Self::Forbidden => "forbidden",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) | Self::Internal(_) => 500,
            Self::InvalidArgument(_) | Self::AmountMismatch { .. } => 400,
            Self::NotFound(_) => 404,
            Self::Forbidden => 403,
            Self::Conflict(_)
            | Self::SeatUnavailable(_)
            | Self::FlightNotBookable(_)
            | Self::PriceChanged { .. }
            | Self::InvalidState(_) => 409,
            Self::HoldExpired => 410,
            Self::PaymentFailed(_) => 402,
        }
    }
}
