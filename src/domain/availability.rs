use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::booking::StayRange;
use crate::error::{BookingError, Result};

/// A stay held on the calendar by a live booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedStay {
    pub booking_id: String,
    #[serde(flatten)]
    pub stay: StayRange,
}

/// Committed stays of one establishment, keyed by check-in.
///
/// Stays never overlap, so ordering by check-in also orders them by
/// check-out and an overlap probe only has to look at the last stay that
/// starts before the requested check-out.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalendar {
    by_check_in: BTreeMap<NaiveDate, CommittedStay>,
    check_in_by_booking: HashMap<String, NaiveDate>,
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conflicting(&self, stay: &StayRange) -> Option<&CommittedStay> {
        self.by_check_in
            .range(..stay.check_out())
            .next_back()
            .map(|(_, committed)| committed)
            .filter(|committed| committed.stay.overlaps(stay))
    }

    pub fn is_available(&self, stay: &StayRange) -> bool {
        self.conflicting(stay).is_none()
    }

    pub fn reserve(&mut self, stay: StayRange, booking_id: impl Into<String>) -> Result<()> {
        let booking_id = booking_id.into();
        if self.check_in_by_booking.contains_key(&booking_id) {
            return Err(BookingError::invalid_request(format!(
                "booking {booking_id} already holds dates on this calendar"
            )));
        }
        if self.conflicting(&stay).is_some() {
            return Err(BookingError::Conflict {
                check_in: stay.check_in(),
                check_out: stay.check_out(),
                duplicate_of: None,
            });
        }
        self.check_in_by_booking
            .insert(booking_id.clone(), stay.check_in());
        self.by_check_in
            .insert(stay.check_in(), CommittedStay { booking_id, stay });
        Ok(())
    }

    /// Frees the stay held by `booking_id`. Returns false when nothing was held.
    pub fn release(&mut self, booking_id: &str) -> bool {
        let Some(check_in) = self.check_in_by_booking.remove(booking_id) else {
            return false;
        };
        self.by_check_in.remove(&check_in);
        true
    }

    pub fn stays(&self) -> impl Iterator<Item = &CommittedStay> {
        self.by_check_in.values()
    }

    pub fn len(&self) -> usize {
        self.by_check_in.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_check_in.is_empty()
    }
}
