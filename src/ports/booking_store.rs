use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::booking::{Booking, BookingFilter, BookingStatus};
use crate::error::Result;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Booking>>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>>;

    /// Compare-and-set on the status: writes `next` only while the booking is
    /// still in `expected`, otherwise fails with `InvalidTransition` from the
    /// status actually stored.
    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<Booking>;
}
