use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::availability::{AvailabilityCalendar, CommittedStay};
use crate::domain::booking::StayRange;
use crate::error::Result;

/// Calendars of every establishment, each behind its own lock.
///
/// Holding the guard returned by [`AvailabilityIndex::lock`] is the
/// establishment's critical section: the overlap check and the insert that
/// follows it cannot interleave with another writer on the same venue,
/// while other venues proceed in parallel.
#[derive(Default)]
pub struct AvailabilityIndex {
    calendars: DashMap<String, Arc<Mutex<AvailabilityCalendar>>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, establishment_id: &str) -> Arc<Mutex<AvailabilityCalendar>> {
        if let Some(cell) = self.calendars.get(establishment_id) {
            return Arc::clone(cell.value());
        }
        // The map shard guard is released at the end of this statement, before any await.
        Arc::clone(
            self.calendars
                .entry(establishment_id.to_string())
                .or_default()
                .value(),
        )
    }

    pub async fn lock(&self, establishment_id: &str) -> OwnedMutexGuard<AvailabilityCalendar> {
        self.cell(establishment_id).lock_owned().await
    }

    pub async fn is_available(
        &self,
        establishment_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool> {
        let stay = StayRange::new(check_in, check_out)?;
        let available = self.lock(establishment_id).await.is_available(&stay);
        debug!(establishment_id, %stay, available, "Availability probe");
        Ok(available)
    }

    pub async fn reserve(
        &self,
        establishment_id: &str,
        stay: StayRange,
        booking_id: &str,
    ) -> Result<()> {
        self.lock(establishment_id).await.reserve(stay, booking_id)
    }

    pub async fn release(&self, establishment_id: &str, booking_id: &str) -> bool {
        self.lock(establishment_id).await.release(booking_id)
    }

    /// Drops the calendar of a removed establishment.
    pub fn forget(&self, establishment_id: &str) {
        self.calendars.remove(establishment_id);
    }

    /// Committed stays of an establishment in check-in order.
    pub async fn committed(&self, establishment_id: &str) -> Vec<CommittedStay> {
        self.lock(establishment_id).await.stays().cloned().collect()
    }
}

impl std::fmt::Debug for AvailabilityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityIndex")
            .field("establishments", &self.calendars.len())
            .finish()
    }
}
