pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::BookingRecord;

/// Insert-only datastore for confirmed bookings. Nothing in this service
/// ever reads a booking back.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Whether the collaborator is reachable in principle. When false the
    /// write step is skipped entirely.
    fn is_configured(&self) -> bool;

    async fn insert_booking(&self, record: &BookingRecord) -> anyhow::Result<()>;
}

/// The detached persistence write: spawns the single insert attempt and
/// returns immediately. The outcome is observed only by the tracing sink,
/// so booking confirmation can never be blocked or failed by the store.
pub fn persist_detached(store: Arc<dyn BookingStore>, record: BookingRecord) {
    if !store.is_configured() {
        tracing::info!(booking_id = %record.booking_id, "booking store not configured, skipping persist");
        return;
    }

    tokio::spawn(async move {
        match store.insert_booking(&record).await {
            Ok(()) => {
                tracing::info!(booking_id = %record.booking_id, "booking persisted");
            }
            Err(e) => {
                tracing::error!(error = %e, booking_id = %record.booking_id, "failed to persist booking");
            }
        }
    });
}

/// Awaited variant used under the `report` persistence policy: same single
/// attempt, same logging, but the caller learns whether the write landed.
/// Returns `None` when the store is not configured.
pub async fn persist_awaited(store: &dyn BookingStore, record: &BookingRecord) -> Option<bool> {
    if !store.is_configured() {
        tracing::info!(booking_id = %record.booking_id, "booking store not configured, skipping persist");
        return None;
    }

    match store.insert_booking(record).await {
        Ok(()) => {
            tracing::info!(booking_id = %record.booking_id, "booking persisted");
            Some(true)
        }
        Err(e) => {
            tracing::error!(error = %e, booking_id = %record.booking_id, "failed to persist booking");
            Some(false)
        }
    }
}
