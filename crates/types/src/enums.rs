use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema, Default,
)]
#[sqlx(type_name = "cabin_class", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    EconomyFlex,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        Self::Economy,
        Self::EconomyFlex,
        Self::Business,
        Self::First,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::EconomyFlex => "economy_flex",
            Self::Business => "business",
            Self::First => "first",
        }
    }
}

impl FromStr for CabinClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(Self::Economy),
            "economy_flex" => Ok(Self::EconomyFlex),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(()),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "flight_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    #[default]
    Scheduled,
    Boarding,
    Delayed,
    Departed,
    Landed,
    Cancelled,
}

impl FlightStatus {
    /// A flight accepts new holds only before it leaves the ground.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Boarding | Self::Delayed)
    }

    /// Flights the demand simulator still perturbs.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Departed | Self::Landed)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "seat_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    #[default]
    Available,
    Held,
    Sold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "seat_position", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SeatPosition {
    Window,
    Aisle,
    Middle,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Held,
    PendingPayment,
    Confirmed,
    Cancelled,
    Expired,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired)
    }

    /// States from which a payment attempt is accepted.
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Held | Self::PendingPayment)
    }

    /// States the hold reaper may expire.
    pub fn is_expirable(&self) -> bool {
        matches!(self, Self::Held | Self::PendingPayment)
    }

    /// Legal transitions of the booking state machine. All moves are
    /// one-way; Cancelled is reachable from every non-terminal state.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Held, PendingPayment)
                | (Held, Confirmed)
                | (Held, Cancelled)
                | (Held, Expired)
                | (PendingPayment, Confirmed)
                | (PendingPayment, Cancelled)
                | (PendingPayment, Expired)
                | (Confirmed, Cancelled)
        )
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::NetBanking => "net_banking",
            Self::Wallet => "wallet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Success,
    Failed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
    AirlineStaff,
    AirportAuthority,
}

impl UserRole {
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Customer)
    }

    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_update_flight_status(&self) -> bool {
        matches!(self, Self::Admin | Self::AirlineStaff)
    }

    pub fn can_assign_gate(&self) -> bool {
        matches!(self, Self::Admin | Self::AirportAuthority)
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "airline_staff" => Ok(Self::AirlineStaff),
            "airport_authority" => Ok(Self::AirportAuthority),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabin_class_round_trip() {
        for class in CabinClass::ALL {
            assert_eq!(class.as_str().parse::<CabinClass>(), Ok(class));
        }
        assert!("premium".parse::<CabinClass>().is_err());
    }

    #[test]
    fn test_flight_status_bookable() {
        assert!(FlightStatus::Scheduled.is_bookable());
        assert!(FlightStatus::Delayed.is_bookable());
        assert!(!FlightStatus::Departed.is_bookable());
        assert!(!FlightStatus::Cancelled.is_bookable());
    }

    #[test]
    fn test_booking_transitions() {
        use BookingStatus::*;
        assert!(Held.can_transition_to(PendingPayment));
        assert!(Held.can_transition_to(Expired));
        assert!(PendingPayment.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Expired));
        assert!(!Cancelled.can_transition_to(Held));
        assert!(!Expired.can_transition_to(Confirmed));
    }

    #[test]
    fn test_role_capabilities() {
        assert!(UserRole::Admin.can_update_flight_status());
        assert!(UserRole::AirlineStaff.can_update_flight_status());
        assert!(!UserRole::AirportAuthority.can_update_flight_status());
        assert!(UserRole::AirportAuthority.can_assign_gate());
        assert!(!UserRole::Customer.is_staff());
    }
}
