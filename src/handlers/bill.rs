use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::bill::{self, Bill};
use crate::services::pricing;
use crate::state::AppState;

fn build_bill_for(state: &AppState, id: Uuid) -> Result<Bill, AppError> {
    let sessions = state.sessions.lock().unwrap();
    let session = sessions.get(&id).ok_or(AppError::SessionNotFound(id))?;
    let booking = session.confirmed_booking()?;
    let services = pricing::resolve_selected(&booking.draft, &state.catalog);
    Ok(bill::build_bill(booking, &services))
}

// GET /api/sessions/:id/bill
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bill>, AppError> {
    Ok(Json(build_bill_for(&state, id)?))
}

// GET /api/sessions/:id/bill/text
//
// The printable rendering, served as plain text. Same structure as the
// JSON bill; there is no second layout.
pub async fn print_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let text = bill::render_text(&build_bill_for(&state, id)?);
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub message: String,
    pub url: String,
}

// GET /api/sessions/:id/bill/share
//
// The WhatsApp deep link plus its decoded message. Whether the client can
// actually open the link is not our concern.
pub async fn share_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShareResponse>, AppError> {
    let message = {
        let sessions = state.sessions.lock().unwrap();
        let session = sessions.get(&id).ok_or(AppError::SessionNotFound(id))?;
        let booking = session.confirmed_booking()?;
        let services = pricing::resolve_selected(&booking.draft, &state.catalog);
        bill::whatsapp_message(booking, &services)
    };
    let url = bill::whatsapp_share_url(&message);
    Ok(Json(ShareResponse { message, url }))
}

// POST /api/sessions/:id/bill/view
pub async fn view_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
    session.show_bill()?;
    Ok(Json(serde_json::json!({ "viewing_bill": true })))
}

// POST /api/sessions/:id/bill/close
pub async fn close_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
    session.hide_bill()?;
    Ok(Json(serde_json::json!({ "viewing_bill": false })))
}
