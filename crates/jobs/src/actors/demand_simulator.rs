use std::time::Duration;

use chrono::Utc;
use skyfare_db::PgPool;
use tokio_util::sync::CancellationToken;

/// Demand simulator actor: one tick per period. Cancellation is
/// honored between ticks; an in-flight tick finishes its current
/// flight before the actor exits.
pub async fn run(pool: PgPool, period_seconds: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(period_seconds));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(period_seconds, "Demand simulator started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tracing::debug!("Running demand simulator tick");
                match skyfare_core::demand::simulator_tick(&pool, Utc::now()).await {
                    Ok(updated) => {
                        if updated > 0 {
                            tracing::info!(updated, "Demand simulator tick updated flights");
                        }
                    }
                    Err(e) => tracing::error!("Demand simulator tick failed: {}", e),
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Demand simulator shutting down");
                break;
            }
        }
    }
}
