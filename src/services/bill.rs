use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::models::Booking;
use crate::services::pricing::SelectedService;

pub const BUSINESS_NAME: &str = "NatBolt";
pub const CONTACT_PHONE: &str = "+91 9738007523";

#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub booking_id: String,
    pub issued_on: NaiveDate,
    pub customer: CustomerBlock,
    pub vehicle: VehicleBlock,
    pub lines: Vec<BillLine>,
    pub total: i64,
    pub service_date: String,
    pub pickup_time: String,
    pub notes: Option<String>,
    pub business: &'static str,
    pub contact: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerBlock {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleBlock {
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    pub reg_number: String,
}

/// One row of the services table. `amount` is None for custom work, which
/// renders as "Quote on request"; `detail` carries the problem description.
#[derive(Debug, Clone, Serialize)]
pub struct BillLine {
    pub name: String,
    pub amount: Option<i64>,
    pub detail: Option<String>,
}

pub fn build_bill(booking: &Booking, services: &[SelectedService]) -> Bill {
    let draft = &booking.draft;

    let lines = services
        .iter()
        .map(|svc| match svc {
            SelectedService::Listed { name, price, .. } => BillLine {
                name: name.to_string(),
                amount: Some(*price),
                detail: None,
            },
            SelectedService::Custom { description } => BillLine {
                name: "Others".to_string(),
                amount: None,
                detail: if description.trim().is_empty() {
                    None
                } else {
                    Some(description.clone())
                },
            },
        })
        .collect();

    Bill {
        booking_id: booking.booking_id.clone(),
        issued_on: Utc::now().date_naive(),
        customer: CustomerBlock {
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
        },
        vehicle: VehicleBlock {
            vehicle_type: draft
                .vehicle_type
                .map(|v| v.as_str().to_string())
                .unwrap_or_default(),
            brand: draft.brand.clone(),
            model: draft.model.clone(),
            reg_number: draft.reg_number.clone(),
        },
        lines,
        total: booking.total_price,
        service_date: draft
            .service_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        pickup_time: draft
            .pickup_time
            .map(|p| p.label().to_string())
            .unwrap_or_default(),
        notes: if draft.notes.trim().is_empty() {
            None
        } else {
            Some(draft.notes.clone())
        },
        business: BUSINESS_NAME,
        contact: CONTACT_PHONE,
    }
}

/// Plain-text rendering of the bill, served for printing.
pub fn render_text(bill: &Bill) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\nService Estimate\n\n", bill.business));
    out.push_str(&format!("Booking ID: {}\n", bill.booking_id));
    out.push_str(&format!("Date: {}\n\n", bill.issued_on.format("%Y-%m-%d")));

    out.push_str("Customer Details\n");
    out.push_str(&format!("  {}\n", bill.customer.name));
    out.push_str(&format!("  {}\n", bill.customer.phone));
    out.push_str(&format!("  {}\n\n", bill.customer.address));

    out.push_str("Vehicle\n");
    out.push_str(&format!(
        "  {} {} ({})\n",
        bill.vehicle.brand, bill.vehicle.model, bill.vehicle.vehicle_type
    ));
    out.push_str(&format!("  Reg: {}\n\n", bill.vehicle.reg_number));

    out.push_str("Services\n");
    for line in &bill.lines {
        match line.amount {
            Some(amount) => out.push_str(&format!("  {}: ₹{}\n", line.name, amount)),
            None => out.push_str(&format!("  {}: Quote on request\n", line.name)),
        }
        if let Some(detail) = &line.detail {
            out.push_str(&format!("    {detail}\n"));
        }
    }
    out.push_str(&format!("  Total: ₹{}\n\n", bill.total));

    out.push_str("Pickup Schedule\n");
    out.push_str(&format!("  {} | {}\n", bill.service_date, bill.pickup_time));

    if let Some(notes) = &bill.notes {
        out.push_str(&format!("\nNotes\n  {notes}\n"));
    }

    out.push_str(&format!(
        "\nThank you for choosing {}!\nFor queries: {}\n",
        bill.business, bill.contact
    ));

    out
}

/// The shareable WhatsApp message. Fixed template; custom work is listed
/// by its problem description instead of a price.
pub fn whatsapp_message(booking: &Booking, services: &[SelectedService]) -> String {
    let draft = &booking.draft;

    let services_list = services
        .iter()
        .map(|svc| match svc {
            SelectedService::Listed { name, price, .. } => format!("- {name}: ₹{price}"),
            SelectedService::Custom { description } => format!("- Others: {description}"),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let service_date = draft
        .service_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let pickup_time = draft
        .pickup_time
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    format!(
        "*{business} Service Booking*\n\n\
         Booking ID: {id}\n\n\
         *Customer:* {name}\n\
         *Phone:* {phone}\n\n\
         *Vehicle:* {brand} {model}\n\
         *Reg No:* {reg}\n\n\
         *Services:*\n{services_list}\n\n\
         *Total:* ₹{total}\n\n\
         *Pickup:* {service_date} ({pickup_time})\n\
         *Address:* {address}\n\n\
         Thank you for choosing {business}!",
        business = BUSINESS_NAME,
        id = booking.booking_id,
        name = draft.name,
        phone = draft.phone,
        brand = draft.brand,
        model = draft.model,
        reg = draft.reg_number,
        total = booking.total_price,
        address = draft.address,
    )
}

/// WhatsApp deep link carrying the share message. Opening it is the
/// caller's (i.e. the client's) problem.
pub fn whatsapp_share_url(message: &str) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::draft::{PickupSlot, VehicleType};
    use crate::models::{BookingDraft, BookingStatus, Catalog};
    use crate::services::pricing;
    use chrono::NaiveDate;

    fn confirmed_booking() -> Booking {
        let draft = BookingDraft {
            name: "Ravi Kumar".to_string(),
            phone: "+91 9876543210".to_string(),
            vehicle_type: Some(VehicleType::Scooter),
            brand: "Honda".to_string(),
            model: "Activa".to_string(),
            reg_number: "TS 01 AB 1234".to_string(),
            service_date: NaiveDate::from_ymd_opt(2025, 7, 10),
            selected_services: vec!["wash".to_string(), "others".to_string()],
            custom_problem: "loose chain".to_string(),
            address: "Begumpet, Hyderabad".to_string(),
            pickup_time: Some(PickupSlot::Afternoon),
            notes: "call before pickup".to_string(),
        };
        Booking {
            booking_id: "BKTEST42".to_string(),
            total_price: 149,
            status: BookingStatus::Pending,
            created_at: Utc::now().naive_utc(),
            draft,
        }
    }

    #[test]
    fn test_build_bill_lines_and_total() {
        let booking = confirmed_booking();
        let services = pricing::resolve_selected(&booking.draft, &Catalog::standard());
        let bill = build_bill(&booking, &services);

        assert_eq!(bill.booking_id, "BKTEST42");
        assert_eq!(bill.total, 149);
        assert_eq!(bill.lines.len(), 2);
        assert_eq!(bill.lines[0].name, "Wash & Clean");
        assert_eq!(bill.lines[0].amount, Some(149));
        assert_eq!(bill.lines[1].name, "Others");
        assert_eq!(bill.lines[1].amount, None);
        assert_eq!(bill.lines[1].detail.as_deref(), Some("loose chain"));
        assert_eq!(bill.pickup_time, "2:00 PM - 4:00 PM");
        assert_eq!(bill.notes.as_deref(), Some("call before pickup"));
        assert_eq!(bill.contact, CONTACT_PHONE);
    }

    #[test]
    fn test_render_text_contains_all_sections() {
        let booking = confirmed_booking();
        let services = pricing::resolve_selected(&booking.draft, &Catalog::standard());
        let text = render_text(&build_bill(&booking, &services));

        assert!(text.contains("NatBolt"));
        assert!(text.contains("Booking ID: BKTEST42"));
        assert!(text.contains("Honda Activa (scooter)"));
        assert!(text.contains("Reg: TS 01 AB 1234"));
        assert!(text.contains("Wash & Clean: ₹149"));
        assert!(text.contains("Others: Quote on request"));
        assert!(text.contains("loose chain"));
        assert!(text.contains("Total: ₹149"));
        assert!(text.contains("2025-07-10 | 2:00 PM - 4:00 PM"));
        assert!(text.contains("call before pickup"));
        assert!(text.contains("For queries: +91 9738007523"));
    }

    #[test]
    fn test_whatsapp_message_template() {
        let booking = confirmed_booking();
        let services = pricing::resolve_selected(&booking.draft, &Catalog::standard());
        let message = whatsapp_message(&booking, &services);

        assert!(message.starts_with("*NatBolt Service Booking*"));
        assert!(message.contains("Booking ID: BKTEST42"));
        assert!(message.contains("*Customer:* Ravi Kumar"));
        assert!(message.contains("*Phone:* +91 9876543210"));
        assert!(message.contains("*Vehicle:* Honda Activa"));
        assert!(message.contains("*Reg No:* TS 01 AB 1234"));
        assert!(message.contains("- Wash & Clean: ₹149"));
        assert!(message.contains("- Others: loose chain"));
        assert!(message.contains("*Total:* ₹149"));
        assert!(message.contains("*Pickup:* 2025-07-10 (2-4 PM)"));
        assert!(message.contains("*Address:* Begumpet, Hyderabad"));
        assert!(message.ends_with("Thank you for choosing NatBolt!"));
    }

    #[test]
    fn test_share_url_is_encoded() {
        let url = whatsapp_share_url("*NatBolt* ₹149\nline two");
        assert!(url.starts_with("https://wa.me/?text="));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("%0A"));
    }
}
