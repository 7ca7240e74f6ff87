//! Filters and counts over reservation lists.

use meter_core::models::Reservation;

/// Confirmation counts and revenue of a reservation list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationSummary {
    pub confirmed: usize,
    pub not_confirmed: usize,
    /// Sum of `total_price` over confirmed reservations.
    pub confirmed_revenue: f64,
}

impl ReservationSummary {
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        let mut summary = Self::default();
        for r in reservations {
            if r.is_confirmed() {
                summary.confirmed += 1;
                summary.confirmed_revenue += r.total_price();
            } else {
                summary.not_confirmed += 1;
            }
        }
        summary
    }
}

pub fn confirmed(reservations: &[Reservation]) -> impl Iterator<Item = &Reservation> {
    reservations.iter().filter(|r| r.is_confirmed())
}

/// Reservations lasting [`Reservation::LONG_HOURS`] or more.
pub fn long(reservations: &[Reservation]) -> impl Iterator<Item = &Reservation> {
    reservations.iter().filter(|r| r.is_long())
}

pub fn find_by_id(reservations: &[Reservation], id: u32) -> Option<&Reservation> {
    reservations.iter().find(|r| r.id == id)
}
