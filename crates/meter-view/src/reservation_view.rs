//! Reservation listings and the single-reservation card.

use meter_core::formatting::{format_currency, format_date, format_time};
use meter_core::locale::Locale;
use meter_core::models::Reservation;
use meter_data::reservations::{self, ReservationSummary};

/// Render the five-section reservation report.
pub fn render_reservation_report(list: &[Reservation], locale: Locale) -> Vec<String> {
    let mut lines = vec!["1) Confirmed Reservations".to_string()];
    for r in reservations::confirmed(list) {
        lines.push(format!(
            "- {}, {}, {} at {}",
            r.name,
            r.resource,
            format_date(r.date),
            format_time(r.start_time)
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "2) Long Reservations (≥ {} h)",
        Reservation::LONG_HOURS
    ));
    for r in reservations::long(list) {
        lines.push(format!(
            "- {}, {} at {}, duration {} h, {}",
            r.name,
            format_date(r.date),
            format_time(r.start_time),
            r.duration_hours,
            r.resource
        ));
    }
    lines.push(String::new());

    lines.push("3) Reservation Confirmation Status".to_string());
    for r in list {
        let status = if r.is_confirmed() {
            "Confirmed"
        } else {
            "NOT Confirmed"
        };
        lines.push(format!("{} → {}", r.name, status));
    }
    lines.push(String::new());

    let summary = ReservationSummary::from_reservations(list);
    lines.push("4) Confirmation Summary".to_string());
    lines.push(format!(
        "- Confirmed reservations: {} pcs",
        summary.confirmed
    ));
    lines.push(format!(
        "- Not confirmed reservations: {} pcs",
        summary.not_confirmed
    ));
    lines.push(String::new());

    lines.push("5) Total Revenue from Confirmed Reservations".to_string());
    lines.push(format!(
        "Total revenue from confirmed reservations: {}",
        format_currency(summary.confirmed_revenue, locale)
    ));
    lines.push(String::new());

    lines
}

/// Render one reservation field by field.
pub fn render_reservation_card(r: &Reservation, locale: Locale) -> Vec<String> {
    vec![
        format!("Reservation number: {}", r.id),
        format!("Booker: {}", r.name),
        format!("Date: {}", format_date(r.date)),
        format!("Start time: {}", format_time(r.start_time)),
        format!("Number of hours: {}", r.duration_hours),
        format!("Hourly price: {}", format_currency(r.hourly_price, locale)),
        format!("Total price: {}", format_currency(r.total_price(), locale)),
        format!("Paid: {}", if r.is_confirmed() { "Yes" } else { "No" }),
        format!("Venue: {}", r.resource),
        format!("Phone: {}", r.phone),
        format!("Email: {}", r.email),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn reservation(id: u32, name: &str, hours: u32, price: f64, confirmed: bool) -> Reservation {
        Reservation {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "0401234567".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            duration_hours: hours,
            hourly_price: price,
            confirmed,
            resource: "Hall B".to_string(),
            created_at: NaiveDateTime::parse_from_str("2025-10-01 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    fn sample() -> Vec<Reservation> {
        vec![
            reservation(1, "Anna", 2, 20.0, true),
            reservation(2, "Ben", 4, 15.0, false),
        ]
    }

    // ── render_reservation_report ────────────────────────────────────────────

    #[test]
    fn test_report_sections_present() {
        let lines = render_reservation_report(&sample(), Locale::Fi);
        for heading in [
            "1) Confirmed Reservations",
            "2) Long Reservations (≥ 3 h)",
            "3) Reservation Confirmation Status",
            "4) Confirmation Summary",
            "5) Total Revenue from Confirmed Reservations",
        ] {
            assert!(lines.iter().any(|l| l == heading), "missing {heading}");
        }
    }

    #[test]
    fn test_report_confirmed_and_long_rows() {
        let lines = render_reservation_report(&sample(), Locale::Fi);
        assert!(lines.contains(&"- Anna, Hall B, 20.10.2025 at 09.30".to_string()));
        assert!(lines.contains(&"- Ben, 20.10.2025 at 09.30, duration 4 h, Hall B".to_string()));
        assert!(lines.contains(&"Ben → NOT Confirmed".to_string()));
        assert!(lines.contains(&"Anna → Confirmed".to_string()));
    }

    #[test]
    fn test_report_summary_and_revenue() {
        let lines = render_reservation_report(&sample(), Locale::Fi);
        assert!(lines.contains(&"- Confirmed reservations: 1 pcs".to_string()));
        assert!(lines.contains(&"- Not confirmed reservations: 1 pcs".to_string()));
        assert!(lines
            .contains(&"Total revenue from confirmed reservations: 40,00 €".to_string()));
    }

    // ── render_reservation_card ──────────────────────────────────────────────

    #[test]
    fn test_card_fields() {
        let card = render_reservation_card(&reservation(123, "Anna", 3, 12.5, true), Locale::Fi);
        assert_eq!(card.len(), 11);
        assert_eq!(card[0], "Reservation number: 123");
        assert_eq!(card[2], "Date: 20.10.2025");
        assert_eq!(card[3], "Start time: 09.30");
        assert_eq!(card[5], "Hourly price: 12,50 €");
        assert_eq!(card[6], "Total price: 37,50 €");
        assert_eq!(card[7], "Paid: Yes");
        assert_eq!(card[8], "Venue: Hall B");
    }

    #[test]
    fn test_card_unpaid() {
        let card = render_reservation_card(&reservation(5, "Ben", 1, 10.0, false), Locale::En);
        assert_eq!(card[7], "Paid: No");
        assert_eq!(card[6], "Total price: 10.00 €");
    }
}
