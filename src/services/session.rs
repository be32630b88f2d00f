use chrono::Utc;

use crate::models::{next_booking_id, Booking, BookingDraft, BookingStatus, Catalog, DraftUpdate};
use crate::services::pricing;

/// Where a session is in its lifecycle. `Submitting` only exists inside
/// [`BookingSession::submit`]; callers observe `Editing` or `Confirmed`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Editing,
    Submitting,
    Confirmed { viewing_bill: bool },
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Editing => "editing",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Confirmed { .. } => "confirmed",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("booking already confirmed")]
    AlreadyConfirmed,

    #[error("no confirmed booking yet")]
    NotConfirmed,
}

/// One customer's draft/booking pair and the state machine over it:
/// Editing -> Submitting -> Confirmed, then back to a fresh Editing via
/// "book another". The draft becomes read-only once confirmed.
#[derive(Debug)]
pub struct BookingSession {
    draft: BookingDraft,
    booking: Option<Booking>,
    phase: SessionPhase,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            draft: BookingDraft::default(),
            booking: None,
            phase: SessionPhase::Editing,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn viewing_bill(&self) -> bool {
        matches!(self.phase, SessionPhase::Confirmed { viewing_bill: true })
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Editing => Ok(()),
            _ => Err(SessionError::AlreadyConfirmed),
        }
    }

    pub fn update_draft(&mut self, update: DraftUpdate) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.draft = std::mem::take(&mut self.draft).with(update);
        Ok(())
    }

    pub fn toggle_service(&mut self, id: &str) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.draft = std::mem::take(&mut self.draft).toggle_service(id);
        Ok(())
    }

    /// Runs the submission transition. On validation failure the session
    /// stays in Editing and no booking id is generated. On success the
    /// draft is snapshotted into an immutable pending booking and the
    /// session lands in Confirmed; the returned booking is what the caller
    /// hands to the persistence collaborator.
    pub fn submit(&mut self, catalog: &Catalog) -> Result<Booking, SessionError> {
        self.ensure_editing()?;

        let missing = self.draft.missing_required();
        if !missing.is_empty() {
            return Err(SessionError::Validation { missing });
        }

        self.phase = SessionPhase::Submitting;

        let booking = Booking {
            booking_id: next_booking_id(),
            draft: self.draft.clone(),
            total_price: pricing::compute_total(&self.draft, catalog),
            status: BookingStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };

        self.booking = Some(booking.clone());
        self.phase = SessionPhase::Confirmed {
            viewing_bill: false,
        };

        Ok(booking)
    }

    /// "Book another": discard the draft and booking wholesale and start
    /// over with an empty editing session.
    pub fn book_another(&mut self) {
        *self = Self::new();
    }

    pub fn show_bill(&mut self) -> Result<(), SessionError> {
        self.set_bill_view(true)
    }

    pub fn hide_bill(&mut self) -> Result<(), SessionError> {
        self.set_bill_view(false)
    }

    fn set_bill_view(&mut self, viewing: bool) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Confirmed { .. } => {
                self.phase = SessionPhase::Confirmed {
                    viewing_bill: viewing,
                };
                Ok(())
            }
            _ => Err(SessionError::NotConfirmed),
        }
    }

    /// The booking, or `NotConfirmed` while still editing. Bill endpoints
    /// go through this.
    pub fn confirmed_booking(&self) -> Result<&Booking, SessionError> {
        self.booking.as_ref().ok_or(SessionError::NotConfirmed)
    }
}
