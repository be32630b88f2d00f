use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::{BookingDraft, ServiceDefinition};
use crate::services::pricing::{self, SelectedService};
use crate::state::AppState;

// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<ServiceDefinition>> {
    Json(state.catalog.services().to_vec())
}

#[derive(Serialize)]
pub struct EstimateResponse {
    pub total_price: i64,
    pub services: Vec<SelectedService>,
}

// POST /api/estimate
//
// Pure pricing preview for an arbitrary draft payload; nothing is stored.
// This backs the live total shown while the form is being filled.
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<BookingDraft>,
) -> Json<EstimateResponse> {
    let total_price = pricing::compute_total(&draft, &state.catalog);
    let services = pricing::resolve_selected(&draft, &state.catalog);
    Json(EstimateResponse {
        total_price,
        services,
    })
}
