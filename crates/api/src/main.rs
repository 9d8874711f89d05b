mod middleware;
mod response;
mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use middleware::AppState;
use skyfare_core::CoreConfig;
use skyfare_integrations::{HtmlReceiptRenderer, PaymentGateway, ReceiptMailer};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skyfare API server...");

    // Get configuration from environment
    let port = std::env::var("API_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()?;

    let config = CoreConfig::from_env();

    // Initialize database pool
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = skyfare_db::create_pool(&database_url).await?;
    skyfare_db::run_migrations(&pool).await?;

    tracing::info!("✓ Database connection established");

    // Create app state
    let state = AppState {
        db: pool,
        payments: PaymentGateway::new(config.payment_success_probability),
        mailer: ReceiptMailer::new(),
        renderer: HtmlReceiptRenderer,
        config,
    };

    // Build application router
    let app = Router::new()
        .route("/health", get(health_check))
        // Flight routes
        .route("/api/flights/search", get(routes::flights::search_flights))
        .route("/api/flights/:id", get(routes::flights::get_flight))
        .route(
            "/api/flights/:id/fares/history",
            get(routes::flights::get_fare_history),
        )
        .route(
            "/api/airlines/:code/schedule",
            get(routes::flights::airline_schedule),
        )
        // Booking routes
        .route("/api/bookings", post(routes::bookings::create_booking))
        .route("/api/bookings", get(routes::bookings::list_my_bookings))
        .route("/api/bookings/:reference", get(routes::bookings::get_booking))
        .route(
            "/api/bookings/:reference/payment",
            post(routes::bookings::pay),
        )
        .route("/api/bookings/:reference", delete(routes::bookings::cancel))
        // PNR routes
        .route("/api/pnr/:pnr", get(routes::pnr::get_by_pnr))
        .route("/api/pnr/:pnr/status", get(routes::pnr::pnr_status))
        .route("/api/pnr/:pnr", delete(routes::pnr::cancel_by_pnr))
        .route("/api/pnr/:pnr/receipt", get(routes::pnr::receipt))
        // Admin routes
        .route("/api/admin/users", post(routes::admin::create_user))
        .route("/api/admin/airports", post(routes::admin::create_airport))
        .route("/api/admin/airlines", post(routes::admin::create_airline))
        .route("/api/admin/aircraft", post(routes::admin::create_aircraft))
        .route("/api/admin/flights", post(routes::admin::create_flight))
        .route(
            "/api/admin/flights/:id/status",
            put(routes::admin::update_flight_status),
        )
        .route(
            "/api/admin/flights/:id/gate",
            put(routes::admin::assign_gate),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("✓ Server listening on {}", addr);
    tracing::info!("📡 API ready at http://{}:{}/api", addr.ip(), port);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
