use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::OTHERS_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Scooter,
    Electric,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Scooter => "scooter",
            VehicleType::Electric => "electric",
        }
    }
}

/// Pickup time slots offered by the booking form. Wire values match what
/// the form has always sent, labels are the human-readable option text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupSlot {
    #[serde(rename = "9-11 AM")]
    Morning,
    #[serde(rename = "11-1 PM")]
    Midday,
    #[serde(rename = "2-4 PM")]
    Afternoon,
    #[serde(rename = "4-6 PM")]
    Evening,
}

impl PickupSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupSlot::Morning => "9-11 AM",
            PickupSlot::Midday => "11-1 PM",
            PickupSlot::Afternoon => "2-4 PM",
            PickupSlot::Evening => "4-6 PM",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PickupSlot::Morning => "9:00 AM - 11:00 AM",
            PickupSlot::Midday => "11:00 AM - 1:00 PM",
            PickupSlot::Afternoon => "2:00 PM - 4:00 PM",
            PickupSlot::Evening => "4:00 PM - 6:00 PM",
        }
    }
}

/// The in-progress booking record. Treated as a value: every edit produces
/// a new draft via [`BookingDraft::with`] or [`BookingDraft::toggle_service`]
/// rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    pub name: String,
    pub phone: String,
    pub vehicle_type: Option<VehicleType>,
    pub brand: String,
    pub model: String,
    pub reg_number: String,
    pub service_date: Option<NaiveDate>,
    pub selected_services: Vec<String>,
    pub custom_problem: String,
    pub address: String,
    pub pickup_time: Option<PickupSlot>,
    pub notes: String,
}

/// Field-level patch applied by a single form-edit event. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub reg_number: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub custom_problem: Option<String>,
    pub address: Option<String>,
    pub pickup_time: Option<PickupSlot>,
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn with(mut self, update: DraftUpdate) -> Self {
        if let Some(v) = update.name {
            self.name = v;
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.vehicle_type {
            self.vehicle_type = Some(v);
        }
        if let Some(v) = update.brand {
            self.brand = v;
        }
        if let Some(v) = update.model {
            self.model = v;
        }
        if let Some(v) = update.reg_number {
            self.reg_number = v;
        }
        if let Some(v) = update.service_date {
            self.service_date = Some(v);
        }
        if let Some(v) = update.custom_problem {
            self.custom_problem = v;
        }
        if let Some(v) = update.address {
            self.address = v;
        }
        if let Some(v) = update.pickup_time {
            self.pickup_time = Some(v);
        }
        if let Some(v) = update.notes {
            self.notes = v;
        }
        self
    }

    /// Checkbox semantics: add the id if absent, remove it if present.
    /// The selection never holds duplicates.
    pub fn toggle_service(mut self, id: &str) -> Self {
        if let Some(pos) = self.selected_services.iter().position(|s| s == id) {
            self.selected_services.remove(pos);
        } else {
            self.selected_services.push(id.to_string());
        }
        self
    }

    pub fn has_service(&self, id: &str) -> bool {
        self.selected_services.iter().any(|s| s == id)
    }

    /// Names of the fields that block submission. Everything except notes
    /// is required; the problem description only when "others" is ticked.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.vehicle_type.is_none() {
            missing.push("vehicle_type");
        }
        if self.brand.trim().is_empty() {
            missing.push("brand");
        }
        if self.model.trim().is_empty() {
            missing.push("model");
        }
        if self.reg_number.trim().is_empty() {
            missing.push("reg_number");
        }
        if self.service_date.is_none() {
            missing.push("service_date");
        }
        if self.pickup_time.is_none() {
            missing.push("pickup_time");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.has_service(OTHERS_ID) && self.custom_problem.trim().is_empty() {
            missing.push("custom_problem");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> BookingDraft {
        BookingDraft {
            name: "Ravi Kumar".to_string(),
            phone: "+91 9876543210".to_string(),
            vehicle_type: Some(VehicleType::Scooter),
            brand: "Honda".to_string(),
            model: "Activa".to_string(),
            reg_number: "TS 01 AB 1234".to_string(),
            service_date: NaiveDate::from_ymd_opt(2025, 7, 10),
            selected_services: vec!["tyre".to_string()],
            custom_problem: String::new(),
            address: "12-3-45, Begumpet, Hyderabad".to_string(),
            pickup_time: Some(PickupSlot::Morning),
            notes: String::new(),
        }
    }

    #[test]
    fn test_with_merges_only_present_fields() {
        let draft = filled_draft().with(DraftUpdate {
            phone: Some("+91 9000000000".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.phone, "+91 9000000000");
        assert_eq!(draft.name, "Ravi Kumar");
        assert_eq!(draft.vehicle_type, Some(VehicleType::Scooter));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let draft = filled_draft().toggle_service("battery");
        assert!(draft.has_service("battery"));
        let draft = draft.toggle_service("battery");
        assert!(!draft.has_service("battery"));
        assert!(draft.has_service("tyre"));
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let draft = filled_draft()
            .toggle_service("wash")
            .toggle_service("wash")
            .toggle_service("wash");
        assert_eq!(
            draft
                .selected_services
                .iter()
                .filter(|s| *s == "wash")
                .count(),
            1
        );
    }

    #[test]
    fn test_complete_draft_has_no_missing_fields() {
        assert!(filled_draft().missing_required().is_empty());
    }

    #[test]
    fn test_blank_and_whitespace_fields_are_missing() {
        let mut draft = filled_draft();
        draft.phone = "   ".to_string();
        draft.address = String::new();
        let missing = draft.missing_required();
        assert!(missing.contains(&"phone"));
        assert!(missing.contains(&"address"));
        assert!(!missing.contains(&"name"));
    }

    #[test]
    fn test_others_requires_problem_description() {
        let draft = filled_draft().toggle_service(OTHERS_ID);
        assert!(draft.missing_required().contains(&"custom_problem"));

        let draft = draft.with(DraftUpdate {
            custom_problem: Some("loose chain".to_string()),
            ..Default::default()
        });
        assert!(draft.missing_required().is_empty());
    }

    #[test]
    fn test_notes_never_required() {
        let draft = filled_draft();
        assert!(draft.notes.is_empty());
        assert!(!draft.missing_required().contains(&"notes"));
    }

    #[test]
    fn test_pickup_slot_wire_values() {
        let slot: PickupSlot = serde_json::from_str("\"2-4 PM\"").unwrap();
        assert_eq!(slot, PickupSlot::Afternoon);
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"2-4 PM\"");
        assert_eq!(slot.label(), "2:00 PM - 4:00 PM");
    }
}
