use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PersistPolicy;
use crate::errors::AppError;
use crate::models::{BookingDraft, DraftUpdate};
use crate::services::pricing::{self, SelectedService};
use crate::services::session::BookingSession;
use crate::services::store;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: &'static str,
    pub viewing_bill: bool,
    pub draft: BookingDraft,
    pub services: Vec<SelectedService>,
    pub total_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

fn session_view(state: &AppState, id: Uuid, session: &BookingSession) -> SessionView {
    SessionView {
        session_id: id,
        phase: session.phase().as_str(),
        viewing_bill: session.viewing_bill(),
        draft: session.draft().clone(),
        services: pricing::resolve_selected(session.draft(), &state.catalog),
        total_price: pricing::compute_total(session.draft(), &state.catalog),
        booking_id: session.booking().map(|b| b.booking_id.clone()),
    }
}

/// Runs `f` against the session, then returns the fresh view of it. The
/// sessions lock is scoped to this call and never held across an await.
fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingSession) -> Result<T, AppError>,
) -> Result<(T, SessionView), AppError> {
    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
    let out = f(session)?;
    let view = session_view(state, id, session);
    Ok((out, view))
}

// POST /api/sessions
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionCreated> {
    let id = Uuid::new_v4();
    state
        .sessions
        .lock()
        .unwrap()
        .insert(id, BookingSession::new());

    tracing::info!(session_id = %id, "session created");
    Json(SessionCreated { session_id: id })
}

// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = with_session(&state, id, |_| Ok(()))?;
    Ok(Json(view))
}

// POST /api/sessions/:id/draft
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = with_session(&state, id, |session| {
        session.update_draft(update).map_err(AppError::from)
    })?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub service_id: String,
}

// POST /api/sessions/:id/services/toggle
pub async fn toggle_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = with_session(&state, id, |session| {
        session
            .toggle_service(&req.service_id)
            .map_err(AppError::from)
    })?;
    Ok(Json(view))
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub booking_id: String,
    pub total_price: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

// POST /api/sessions/:id/submit
//
// Confirmation never depends on the store: under the default detached
// policy the write is spawned and forgotten, under `report` it is awaited
// only to fill in `persisted`.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let (booking, _) = with_session(&state, id, |session| {
        session.submit(&state.catalog).map_err(AppError::from)
    })?;

    tracing::info!(
        booking_id = %booking.booking_id,
        total_price = booking.total_price,
        "booking confirmed"
    );

    let record = booking.to_record();
    let persisted = match state.config.persist_policy {
        PersistPolicy::Detached => {
            store::persist_detached(Arc::clone(&state.store), record);
            None
        }
        PersistPolicy::Report => store::persist_awaited(state.store.as_ref(), &record).await,
    };

    Ok(Json(SubmitResponse {
        booking_id: booking.booking_id,
        total_price: booking.total_price,
        status: booking.status.as_str().to_string(),
        persisted,
    }))
}

// POST /api/sessions/:id/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = with_session(&state, id, |session| {
        session.book_another();
        Ok(())
    })?;
    Ok(Json(view))
}
