use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};

/// Administrator dashboard totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceStats {
    pub total_users: usize,
    pub total_establishments: usize,
    pub pending_establishments: usize,
    pub total_bookings: usize,
    pub bookings_by_status: StatusCounts,
    /// Sum of `totalPrice` over confirmed and completed bookings.
    pub revenue: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "PENDING")]
    pub pending: usize,
    #[serde(rename = "CONFIRMED")]
    pub confirmed: usize,
    #[serde(rename = "CANCELLED")]
    pub cancelled: usize,
    #[serde(rename = "COMPLETED")]
    pub completed: usize,
}

impl MarketplaceStats {
    pub fn compute(
        total_users: usize,
        total_establishments: usize,
        pending_establishments: usize,
        bookings: &[Booking],
    ) -> Self {
        let mut stats = Self {
            total_users,
            total_establishments,
            pending_establishments,
            total_bookings: bookings.len(),
            ..Self::default()
        };
        for booking in bookings {
            match booking.status {
                BookingStatus::Pending => stats.bookings_by_status.pending += 1,
                BookingStatus::Confirmed => stats.bookings_by_status.confirmed += 1,
                BookingStatus::Cancelled => stats.bookings_by_status.cancelled += 1,
                BookingStatus::Completed => stats.bookings_by_status.completed += 1,
            }
            if matches!(
                booking.status,
                BookingStatus::Confirmed | BookingStatus::Completed
            ) {
                stats.revenue = stats.revenue.saturating_add(booking.total_price);
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::StayRange;
    use chrono::{NaiveDate, Utc};

    fn booking(status: BookingStatus, total_price: u64) -> Booking {
        let now = Utc::now();
        Booking {
            id: format!("{status}-{total_price}"),
            user_id: "u".into(),
            establishment_id: "e".into(),
            stay: StayRange::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            )
            .unwrap(),
            guests: 1,
            total_price,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn revenue_counts_confirmed_and_completed_only() {
        let bookings = vec![
            booking(BookingStatus::Pending, 100),
            booking(BookingStatus::Confirmed, 200),
            booking(BookingStatus::Cancelled, 400),
            booking(BookingStatus::Completed, 800),
        ];
        let stats = MarketplaceStats::compute(3, 2, 1, &bookings);
        assert_eq!(stats.revenue, 1000);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.bookings_by_status.cancelled, 1);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.pending_establishments, 1);
    }

    #[test]
    fn empty_marketplace() {
        let stats = MarketplaceStats::compute(0, 0, 0, &[]);
        assert_eq!(stats, MarketplaceStats::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(MarketplaceStats::compute(1, 1, 0, &[])).unwrap();
        assert_eq!(json["totalUsers"], 1);
        assert_eq!(json["bookingsByStatus"]["PENDING"], 0);
    }
}
