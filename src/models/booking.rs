use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::BookingDraft;

/// Immutable snapshot produced at the moment a draft is submitted. Never
/// mutated afterwards; a new booking requires a fresh draft.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub booking_id: String,
    pub draft: BookingDraft,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

/// The insert-only record sent to the remote bookings table. Field names
/// are the table's column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: String,
    pub name: String,
    pub phone: String,
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub reg_number: String,
    pub services: Vec<String>,
    pub total_price: i64,
    pub address: String,
    pub service_date: String,
    pub pickup_time: String,
    pub notes: String,
    pub status: String,
}

impl Booking {
    pub fn to_record(&self) -> BookingRecord {
        BookingRecord {
            booking_id: self.booking_id.clone(),
            name: self.draft.name.clone(),
            phone: self.draft.phone.clone(),
            vehicle_type: self
                .draft
                .vehicle_type
                .map(|v| v.as_str().to_string())
                .unwrap_or_default(),
            brand: self.draft.brand.clone(),
            model: self.draft.model.clone(),
            reg_number: self.draft.reg_number.clone(),
            services: self.draft.selected_services.clone(),
            total_price: self.total_price,
            address: self.draft.address.clone(),
            service_date: self
                .draft
                .service_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            pickup_time: self
                .draft
                .pickup_time
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            notes: self.draft.notes.clone(),
            status: self.status.as_str().to_string(),
        }
    }
}

// Last millisecond value handed out by next_booking_id. Kept strictly
// increasing so two submissions in the same millisecond still differ.
static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generates a booking id: "BK" plus the current Unix milliseconds in
/// uppercase base-36.
pub fn next_booking_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_ID_MILLIS.load(Ordering::Relaxed);
    let millis = loop {
        let candidate = now.max(prev + 1);
        match LAST_ID_MILLIS.compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => break candidate,
            Err(actual) => prev = actual,
        }
    };
    format!("BK{}", to_base36_upper(millis))
}

fn to_base36_upper(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
