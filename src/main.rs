use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use natbolt::config::AppConfig;
use natbolt::handlers;
use natbolt::models::Catalog;
use natbolt::services::store::supabase::SupabaseStore;
use natbolt::services::store::BookingStore;
use natbolt::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Arc<dyn BookingStore> = Arc::new(SupabaseStore::new(
        config.supabase_url.clone(),
        config.supabase_key.clone(),
        config.bookings_table.clone(),
    ));
    if store.is_configured() {
        tracing::info!(table = %config.bookings_table, "booking store configured");
    } else {
        tracing::warn!("booking store not configured; bookings will not be persisted");
    }

    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        catalog: Catalog::standard(),
        config: config.clone(),
        store,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/estimate", post(handlers::catalog::estimate))
        .route("/api/sessions", post(handlers::session::create_session))
        .route("/api/sessions/:id", get(handlers::session::get_session))
        .route(
            "/api/sessions/:id/draft",
            post(handlers::session::update_draft),
        )
        .route(
            "/api/sessions/:id/services/toggle",
            post(handlers::session::toggle_service),
        )
        .route("/api/sessions/:id/submit", post(handlers::session::submit))
        .route("/api/sessions/:id/reset", post(handlers::session::reset))
        .route("/api/sessions/:id/bill", get(handlers::bill::get_bill))
        .route(
            "/api/sessions/:id/bill/text",
            get(handlers::bill::print_bill),
        )
        .route(
            "/api/sessions/:id/bill/share",
            get(handlers::bill::share_bill),
        )
        .route(
            "/api/sessions/:id/bill/view",
            post(handlers::bill::view_bill),
        )
        .route(
            "/api/sessions/:id/bill/close",
            post(handlers::bill::close_bill),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
