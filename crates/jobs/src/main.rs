mod actors;

use skyfare_core::CoreConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skyfare background actors...");

    let config = CoreConfig::from_env();

    // Initialize database pool
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = skyfare_db::create_pool(&database_url).await?;
    skyfare_db::run_migrations(&pool).await?;

    tracing::info!("✓ Database connection established");

    // Two explicit periodic actors, each with its own child token.
    let root = CancellationToken::new();

    let simulator = tokio::spawn(actors::demand_simulator::run(
        pool.clone(),
        config.simulator_period_seconds,
        root.child_token(),
    ));
    tracing::info!(
        "✓ Registered actor: demand_simulator (every {}s)",
        config.simulator_period_seconds
    );

    let reaper = tokio::spawn(actors::hold_reaper::run(
        pool.clone(),
        config.reaper_period_seconds,
        root.child_token(),
    ));
    tracing::info!(
        "✓ Registered actor: hold_reaper (every {}s)",
        config.reaper_period_seconds
    );

    tracing::info!("📡 Background actors running");

    // Cancel both actors on ctrl-c and wait for them to finish their
    // in-flight work.
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    root.cancel();

    let _ = simulator.await;
    let _ = reaper.await;

    tracing::info!("✓ Background actors stopped");
    Ok(())
}
