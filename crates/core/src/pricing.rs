//! Dynamic pricing engine.
//!
//! A pure function over a value-type snapshot of one flight and tier.
//! No I/O, no suspension; deterministic for fixed inputs. Callers load
//! the snapshot, the engine only computes.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use skyfare_db::models::{Flight, SeatClassCount};
use skyfare_types::enums::CabinClass;
use skyfare_types::{AppError, Result};

/// Fares never exceed this multiple of the base fare.
pub const FARE_CAP_MULTIPLIER: u32 = 10;

/// Everything the engine needs to price one (flight, tier) pair.
#[derive(Debug, Clone)]
pub struct FareSnapshot {
    pub tier: CabinClass,
    pub base_fare: Decimal,
    pub seats_available: i64,
    pub seats_total: i64,
    pub hours_to_departure: f64,
    pub demand_index: f64,
}

impl FareSnapshot {
    /// Thin loader from a flight row plus its grouped seat counts.
    /// Fails when the tier is not priced or not present on the aircraft.
    pub fn from_flight(
        flight: &Flight,
        counts: &[SeatClassCount],
        tier: CabinClass,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let base_fare = *flight.base_fare.get(&tier).ok_or_else(|| {
            AppError::InvalidArgument(format!("Tier {} is not priced on this flight", tier.as_str()))
        })?;

        let count = counts
            .iter()
            .find(|c| c.cabin_class == tier)
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "Tier {} has no seats on this flight",
                    tier.as_str()
                ))
            })?;

        let hours_to_departure =
            (flight.departure_time - now).num_seconds() as f64 / 3600.0;

        Ok(Self {
            tier,
            base_fare,
            seats_available: count.available,
            seats_total: count.total,
            hours_to_departure,
            demand_index: flight.demand_index,
        })
    }
}

/// Compute the current fare for a snapshot.
///
/// `base_fare * f_inv * f_time * f_demand * f_class`, floored at the
/// base fare and capped at [`FARE_CAP_MULTIPLIER`] times it. Past
/// departure the cap is returned directly.
pub fn quote(snapshot: &FareSnapshot) -> Result<Decimal> {
    if snapshot.base_fare <= Decimal::ZERO {
        return Err(AppError::InvalidArgument(format!(
            "Base fare must be positive, got {}",
            snapshot.base_fare
        )));
    }
    if snapshot.seats_total <= 0 {
        return Err(AppError::InvalidArgument(
            "Seat total must be positive".to_string(),
        ));
    }
    if snapshot.seats_available < 0 || snapshot.seats_available > snapshot.seats_total {
        return Err(AppError::InvalidArgument(format!(
            "Seat availability {}/{} out of range",
            snapshot.seats_available, snapshot.seats_total
        )));
    }
    if !(0.0..=100.0).contains(&snapshot.demand_index) {
        return Err(AppError::InvalidArgument(format!(
            "Demand index {} out of range",
            snapshot.demand_index
        )));
    }

    let cap = snapshot.base_fare * Decimal::from(FARE_CAP_MULTIPLIER);

    if snapshot.hours_to_departure < 0.0 {
        return Ok(cap);
    }

    let fill_ratio = 1.0 - snapshot.seats_available as f64 / snapshot.seats_total as f64;

    let base = snapshot
        .base_fare
        .to_f64()
        .ok_or_else(|| AppError::InvalidArgument("Base fare not representable".to_string()))?;

    let fare = base
        * inventory_factor(fill_ratio)
        * time_factor(snapshot.hours_to_departure)
        * demand_factor(snapshot.demand_index)
        * class_factor(snapshot.tier);

    let fare = Decimal::from_f64(fare)
        .ok_or_else(|| AppError::Internal("Fare computation overflowed".to_string()))?
        .round_dp(2);

    Ok(fare.clamp(snapshot.base_fare, cap))
}

/// Non-decreasing in fill ratio, 1.0 on an empty cabin.
fn inventory_factor(fill_ratio: f64) -> f64 {
    1.0 + 1.6 * fill_ratio.clamp(0.0, 1.0).powf(1.5)
}

/// Non-decreasing as departure approaches; 1.0 with three or more days
/// of runway.
fn time_factor(hours_to_departure: f64) -> f64 {
    match hours_to_departure {
        h if h >= 72.0 => 1.0,
        h if h >= 48.0 => 1.1,
        h if h >= 24.0 => 1.25,
        h if h >= 12.0 => 1.4,
        h if h >= 6.0 => 1.55,
        h if h >= 2.0 => 1.7,
        _ => 1.85,
    }
}

/// Demand bands: Low, Medium, High, Extreme.
fn demand_factor(demand_index: f64) -> f64 {
    match demand_index {
        d if d < 25.0 => 1.0,
        d if d < 50.0 => 1.15,
        d if d < 75.0 => 1.35,
        _ => 1.6,
    }
}

fn class_factor(tier: CabinClass) -> f64 {
    match tier {
        CabinClass::Economy => 1.0,
        CabinClass::EconomyFlex => 1.2,
        CabinClass::Business => 1.8,
        CabinClass::First => 2.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FareSnapshot {
        FareSnapshot {
            tier: CabinClass::Economy,
            base_fare: Decimal::from(5000),
            seats_available: 3,
            seats_total: 3,
            hours_to_departure: 72.0,
            demand_index: 10.0,
        }
    }

    #[test]
    fn test_quiet_flight_prices_at_base() {
        // Empty cabin, low demand, three days out: every factor is 1.0.
        let fare = quote(&snapshot()).unwrap();
        assert_eq!(fare, Decimal::from(5000));
    }

    #[test]
    fn test_fare_bounded_by_floor_and_cap() {
        let mut s = snapshot();
        s.seats_available = 0;
        s.seats_total = 100;
        s.hours_to_departure = 0.5;
        s.demand_index = 99.0;
        s.tier = CabinClass::First;

        let fare = quote(&s).unwrap();
        assert!(fare >= s.base_fare);
        assert!(fare <= s.base_fare * Decimal::from(10));
    }

    #[test]
    fn test_past_departure_returns_cap() {
        let mut s = snapshot();
        s.hours_to_departure = -1.0;
        assert_eq!(quote(&s).unwrap(), Decimal::from(50000));
    }

    #[test]
    fn test_monotone_in_fill_ratio() {
        let mut previous = Decimal::ZERO;
        for available in (0..=10).rev() {
            let mut s = snapshot();
            s.seats_available = available;
            s.seats_total = 10;
            let fare = quote(&s).unwrap();
            assert!(
                fare >= previous,
                "fare dropped from {} to {} at {} seats left",
                previous,
                fare,
                available
            );
            previous = fare;
        }
    }

    #[test]
    fn test_monotone_in_time_to_departure() {
        let mut previous = Decimal::ZERO;
        for hours in [300.0, 72.0, 48.0, 24.0, 12.0, 6.0, 2.0, 0.5] {
            let mut s = snapshot();
            s.hours_to_departure = hours;
            let fare = quote(&s).unwrap();
            assert!(fare >= previous);
            previous = fare;
        }
    }

    #[test]
    fn test_monotone_in_demand() {
        let mut previous = Decimal::ZERO;
        for demand in [10.0, 40.0, 70.0, 95.0] {
            let mut s = snapshot();
            s.demand_index = demand;
            let fare = quote(&s).unwrap();
            assert!(fare >= previous);
            previous = fare;
        }
    }

    #[test]
    fn test_extreme_demand_multiplier() {
        let mut s = snapshot();
        s.demand_index = 95.0;
        assert_eq!(quote(&s).unwrap(), Decimal::from(8000));
    }

    #[test]
    fn test_class_factors_ordered() {
        let economy = quote(&snapshot()).unwrap();
        let mut s = snapshot();
        s.tier = CabinClass::Business;
        let business = quote(&s).unwrap();
        s.tier = CabinClass::First;
        let first = quote(&s).unwrap();
        assert!(economy < business && business < first);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut s = snapshot();
        s.base_fare = Decimal::ZERO;
        assert!(quote(&s).is_err());

        let mut s = snapshot();
        s.demand_index = 101.0;
        assert!(quote(&s).is_err());

        let mut s = snapshot();
        s.seats_available = 5;
        s.seats_total = 3;
        assert!(quote(&s).is_err());
    }
}
