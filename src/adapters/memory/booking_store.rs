use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingFilter, BookingStatus};
use crate::error::{BookingError, Result};
use crate::ports::booking_store::BookingStore;

#[derive(Default)]
pub struct MemoryBookingStore {
    inner: RwLock<HashMap<String, Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBookingStore").finish()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.inner.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(BookingError::invalid_request(format!(
                "booking {} already exists",
                booking.id
            )));
        }
        bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Booking>> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .inner
            .read()
            .await
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<Booking> {
        let mut bookings = self.inner.write().await;
        let booking = bookings
            .get_mut(id)
            .ok_or_else(|| BookingError::not_found("Booking", id))?;
        if booking.status != expected {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }
        booking.status = next;
        booking.updated_at = at;
        Ok(booking.clone())
    }
}
