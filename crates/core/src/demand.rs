//! Demand simulator.
//!
//! One tick perturbs the demand index of every upcoming flight with a
//! bounded random walk and appends a fare-history sample per priced
//! tier. Each flight is updated in its own short transaction; a failure
//! on one flight is logged and the tick moves on.

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::PgPool;

use skyfare_db::models::Flight;
use skyfare_db::queries::{fare_history, flights, seats};
use skyfare_types::{AppError, Result};

use crate::pricing::{self, FareSnapshot};

/// Maximum symmetric step of the random walk per tick.
const WALK_STEP: f64 = 6.0;

/// Strongest upward pull, reached as departure closes in.
const MAX_PULL: f64 = 3.0;

/// Hours of runway beyond which the pull vanishes.
const PULL_HORIZON_HOURS: f64 = 336.0;

/// One random-walk step. Drift is pulled toward higher values as the
/// departure window shrinks, simulating booking pressure; the result is
/// clamped to [0, 100].
pub fn next_demand_index<R: Rng>(rng: &mut R, current: f64, hours_to_departure: f64) -> f64 {
    let step = rng.gen_range(-WALK_STEP..=WALK_STEP);
    let urgency = 1.0 - (hours_to_departure / PULL_HORIZON_HOURS).clamp(0.0, 1.0);
    let pull = urgency * MAX_PULL;

    (current + step + pull).clamp(0.0, 100.0)
}

/// Run one simulator tick over all active flights. Returns how many
/// flights were updated.
pub async fn simulator_tick(pool: &PgPool, now: DateTime<Utc>) -> anyhow::Result<u32> {
    let flights = flights::list_active(pool, now).await?;

    if flights.is_empty() {
        return Ok(0);
    }

    let mut updated = 0;
    for flight in flights {
        match update_flight(pool, &flight, now).await {
            Ok(()) => updated += 1,
            Err(e) => {
                tracing::error!(
                    flight_id = %flight.id,
                    flight_number = %flight.flight_number,
                    "Demand update failed: {}",
                    e
                );
            }
        }
    }

    tracing::debug!(updated, "Demand simulator tick complete");
    Ok(updated)
}

/// Perturb one flight and record its fares, in one short transaction.
async fn update_flight(pool: &PgPool, flight: &Flight, now: DateTime<Utc>) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Re-read under the row lock; a booking may have committed since the
    // listing.
    let flight = flights::find_by_id_for_update(&mut tx, flight.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight".to_string()))?;

    let hours_to_departure = (flight.departure_time - now).num_seconds() as f64 / 3600.0;
    let demand_index =
        next_demand_index(&mut rand::thread_rng(), flight.demand_index, hours_to_departure);

    flights::update_demand_index(&mut tx, flight.id, demand_index)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let counts = seats::count_by_class_tx(&mut tx, flight.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Sample every tier that is both priced and present on the aircraft.
    for tier in flight.base_fare.keys().copied() {
        if !counts.iter().any(|c| c.cabin_class == tier) {
            continue;
        }

        let mut snapshot = FareSnapshot::from_flight(&flight, &counts, tier, now)?;
        snapshot.demand_index = demand_index;
        let fare = pricing::quote(&snapshot)?;

        fare_history::append(&mut tx, flight.id, tier, fare, demand_index, now)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_walk_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for start in [0.0, 50.0, 100.0] {
            let mut current = start;
            for _ in 0..500 {
                current = next_demand_index(&mut rng, current, 48.0);
                assert!((0.0..=100.0).contains(&current));
            }
        }
    }

    #[test]
    fn test_walk_clamps_at_edges() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            assert!(next_demand_index(&mut rng, 0.0, 500.0) >= 0.0);
            assert!(next_demand_index(&mut rng, 100.0, 0.5) <= 100.0);
        }
    }

    #[test]
    fn test_pull_grows_near_departure() {
        // Averaged over many samples the imminent-departure walk should
        // sit measurably above the far-out walk.
        let mut rng = StdRng::seed_from_u64(3);
        let samples = 2000;

        let far: f64 = (0..samples)
            .map(|_| next_demand_index(&mut rng, 50.0, PULL_HORIZON_HOURS))
            .sum::<f64>()
            / samples as f64;
        let near: f64 = (0..samples)
            .map(|_| next_demand_index(&mut rng, 50.0, 1.0))
            .sum::<f64>()
            / samples as f64;

        assert!(near > far + 1.0, "near {} far {}", near, far);
    }

    #[test]
    fn test_seeded_walk_is_deterministic() {
        let a = next_demand_index(&mut StdRng::seed_from_u64(9), 40.0, 24.0);
        let b = next_demand_index(&mut StdRng::seed_from_u64(9), 40.0, 24.0);
        assert_eq!(a, b);
    }
}
