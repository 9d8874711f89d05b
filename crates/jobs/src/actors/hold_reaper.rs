use std::time::Duration;

use chrono::Utc;
use skyfare_db::PgPool;
use tokio_util::sync::CancellationToken;

/// Hold reaper actor: expires stale holds and returns their seats.
/// Each booking is handled in its own transaction, so cancellation
/// between bookings never leaves half-released state.
pub async fn run(pool: PgPool, period_seconds: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(period_seconds));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(period_seconds, "Hold reaper started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tracing::debug!("Running hold reaper sweep");
                match skyfare_core::booking::expire_stale_holds(&pool, Utc::now()).await {
                    Ok(expired) => {
                        if expired > 0 {
                            tracing::info!(expired, "Hold reaper released expired holds");
                        }
                    }
                    Err(e) => tracing::error!("Hold reaper sweep failed: {}", e),
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Hold reaper shutting down");
                break;
            }
        }
    }
}
