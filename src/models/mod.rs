pub mod booking;
pub mod catalog;
pub mod draft;

pub use booking::{next_booking_id, Booking, BookingRecord, BookingStatus};
pub use catalog::{Catalog, ServiceDefinition, OTHERS_ID};
pub use draft::{BookingDraft, DraftUpdate, PickupSlot, VehicleType};
