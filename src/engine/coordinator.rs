use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::booking::{
    Booking, BookingFilter, BookingStatus, BookingView, CreateBookingRequest, StayRange,
    UserSummary,
};
use crate::domain::establishment::Establishment;
use crate::domain::lifecycle;
use crate::domain::pricing::PricingPolicy;
use crate::engine::availability_index::AvailabilityIndex;
use crate::error::{BookingError, Result};
use crate::ports::booking_store::BookingStore;
use crate::ports::clock::Clock;
use crate::ports::establishment_store::EstablishmentStore;
use crate::ports::user_directory::UserDirectory;

/// Booking rules that the product leaves to configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingPolicy {
    /// Earliest bookable check-in, in days from today.
    #[serde(default)]
    pub min_lead_days: u32,
    #[serde(default = "default_max_nights")]
    pub max_nights: u32,
    /// How long before check-in a guest may still cancel a confirmed stay.
    #[serde(default = "default_cancellation_cutoff_hours")]
    pub user_cancellation_cutoff_hours: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_lead_days: 0,
            max_nights: default_max_nights(),
            user_cancellation_cutoff_hours: default_cancellation_cutoff_hours(),
        }
    }
}

fn default_max_nights() -> u32 {
    365
}

fn default_cancellation_cutoff_hours() -> u32 {
    24
}

/// The storage seams shared by the engine components.
#[derive(Clone)]
pub struct Stores {
    pub establishments: Arc<dyn EstablishmentStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserDirectory>,
}

/// Price preview for a stay, computed without reserving anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub establishment_id: String,
    #[serde(flatten)]
    pub stay: StayRange,
    pub nights: i64,
    pub guests: u32,
    pub nightly_price: u64,
    pub total_price: u64,
    pub available: bool,
}

/// Sole write path for bookings: creation under the establishment's lock,
/// lifecycle transitions, and the completion sweep.
pub struct ReservationCoordinator {
    stores: Stores,
    availability: Arc<AvailabilityIndex>,
    pricing: PricingPolicy,
    policy: BookingPolicy,
    clock: Arc<dyn Clock>,
}

impl ReservationCoordinator {
    pub fn new(
        stores: Stores,
        availability: Arc<AvailabilityIndex>,
        pricing: PricingPolicy,
        policy: BookingPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            stores,
            availability,
            pricing,
            policy,
            clock,
        }
    }

    pub fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }

    fn validate_stay(&self, check_in: NaiveDate, check_out: NaiveDate) -> Result<StayRange> {
        let stay = StayRange::new(check_in, check_out)?;
        let earliest = self
            .clock
            .today()
            .checked_add_days(Days::new(u64::from(self.policy.min_lead_days)))
            .ok_or_else(|| BookingError::invalid_range("lead time out of range"))?;
        if stay.check_in() < earliest {
            return Err(BookingError::invalid_range(format!(
                "check-in {} is before the earliest bookable date {earliest}",
                stay.check_in()
            )));
        }
        if stay.nights() > i64::from(self.policy.max_nights) {
            return Err(BookingError::invalid_range(format!(
                "stays are limited to {} nights",
                self.policy.max_nights
            )));
        }
        Ok(stay)
    }

    async fn bookable(&self, establishment_id: &str) -> Result<(Establishment, u64)> {
        let establishment = self
            .stores
            .establishments
            .get(establishment_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Establishment", establishment_id))?;
        if !establishment.is_verified {
            return Err(BookingError::NotVerified {
                id: establishment.id,
            });
        }
        let nightly = establishment.price.ok_or_else(|| {
            BookingError::invalid_request(format!(
                "establishment {establishment_id} has no nightly price"
            ))
        })?;
        Ok((establishment, nightly))
    }

    pub async fn create_booking(
        &self,
        actor: &Actor,
        request: CreateBookingRequest,
    ) -> Result<Booking> {
        if actor.role == Role::System {
            return Err(BookingError::unauthorized(
                "bookings must be made on behalf of an account",
            ));
        }
        let stay = self.validate_stay(request.check_in, request.check_out)?;
        if request.guests == 0 {
            return Err(BookingError::invalid_request("at least one guest is required"));
        }
        self.bookable(&request.establishment_id).await?;

        let mut calendar = self.availability.lock(&request.establishment_id).await;
        // Read again under the lock; a removal or rejection may have landed meanwhile.
        let (establishment, nightly) = self.bookable(&request.establishment_id).await?;
        if let Some(existing) = calendar.conflicting(&stay) {
            let duplicate_of = match self.stores.bookings.get(&existing.booking_id).await? {
                Some(b) if b.user_id == actor.id && b.stay == stay => Some(b.id),
                _ => None,
            };
            warn!(
                establishment_id = %establishment.id,
                user_id = %actor.id,
                %stay,
                duplicate = duplicate_of.is_some(),
                "Booking rejected, dates already taken"
            );
            return Err(BookingError::Conflict {
                check_in: stay.check_in(),
                check_out: stay.check_out(),
                duplicate_of,
            });
        }

        let total_price = self.pricing.compute_total(
            nightly,
            stay.check_in(),
            stay.check_out(),
            request.guests,
        )?;
        let now = self.clock.now();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: actor.id.clone(),
            establishment_id: establishment.id.clone(),
            stay,
            guests: request.guests,
            total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.stores.bookings.insert(booking.clone()).await?;
        calendar.reserve(stay, booking.id.as_str())?;
        drop(calendar);

        info!(
            booking_id = %booking.id,
            establishment_id = %booking.establishment_id,
            user_id = %booking.user_id,
            %stay,
            total_price,
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn quote(
        &self,
        establishment_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<Quote> {
        let stay = StayRange::new(check_in, check_out)?;
        let (establishment, nightly) = self.bookable(establishment_id).await?;
        let total_price = self
            .pricing
            .compute_total(nightly, check_in, check_out, guests)?;
        let available = self.availability.lock(&establishment.id).await.is_available(&stay);
        Ok(Quote {
            establishment_id: establishment.id,
            stay,
            nights: stay.nights(),
            guests,
            nightly_price: nightly,
            total_price,
            available,
        })
    }

    async fn load(&self, booking_id: &str) -> Result<(Booking, Establishment)> {
        let booking = self
            .stores
            .bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Booking", booking_id))?;
        let establishment = self
            .stores
            .establishments
            .get(&booking.establishment_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Establishment", &booking.establishment_id))?;
        Ok((booking, establishment))
    }

    /// Applies a lifecycle transition on behalf of `actor`.
    pub async fn update_status(
        &self,
        actor: &Actor,
        booking_id: &str,
        target: BookingStatus,
    ) -> Result<Booking> {
        let (booking, establishment) = self.load(booking_id).await?;
        let now = self.clock.now();
        let cutoff = Duration::hours(i64::from(self.policy.user_cancellation_cutoff_hours));
        if let Err(e) = lifecycle::authorize(
            &booking,
            &establishment.operator_id,
            actor,
            target,
            now,
            cutoff,
        ) {
            warn!(
                booking_id,
                actor_id = %actor.id,
                role = %actor.role,
                from = %booking.status,
                to = %target,
                error = %e,
                "Status change refused"
            );
            return Err(e);
        }

        let updated = if target.holds_dates() {
            self.stores
                .bookings
                .update_status(booking_id, booking.status, target, now)
                .await?
        } else {
            // Status write and release happen under the venue lock so the
            // calendar never disagrees with the store for a new request.
            let mut calendar = self.availability.lock(&booking.establishment_id).await;
            let updated = self
                .stores
                .bookings
                .update_status(booking_id, booking.status, target, now)
                .await?;
            calendar.release(&updated.id);
            updated
        };

        info!(
            booking_id,
            actor_id = %actor.id,
            from = %booking.status,
            to = %updated.status,
            "Booking status changed"
        );
        Ok(updated)
    }

    /// Shorthand for the cancellation transition.
    pub async fn cancel(&self, actor: &Actor, booking_id: &str) -> Result<Booking> {
        self.update_status(actor, booking_id, BookingStatus::Cancelled)
            .await
    }

    /// Moves every confirmed stay whose check-out has passed to COMPLETED.
    /// Safe to run repeatedly; returns the ids completed by this run.
    pub async fn complete_due(&self, actor: &Actor) -> Result<Vec<String>> {
        if actor.role != Role::System && !actor.is_admin() {
            return Err(BookingError::unauthorized(
                "the completion sweep runs as the system or an administrator",
            ));
        }
        let today = self.clock.today();
        let due = self
            .stores
            .bookings
            .list(&BookingFilter {
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            })
            .await?;
        let system = Actor::system();
        let mut completed = Vec::new();
        for booking in due.into_iter().filter(|b| b.stay.check_out() <= today) {
            match self
                .update_status(&system, &booking.id, BookingStatus::Completed)
                .await
            {
                Ok(done) => completed.push(done.id),
                Err(e) => warn!(booking_id = %booking.id, error = %e, "Completion skipped"),
            }
        }
        if !completed.is_empty() {
            info!(count = completed.len(), "Completed past stays");
        }
        Ok(completed)
    }

    pub async fn get_booking(&self, actor: &Actor, booking_id: &str) -> Result<BookingView> {
        let (booking, establishment) = self.load(booking_id).await?;
        let allowed = actor.id == booking.user_id
            || actor.operates(&establishment.operator_id)
            || actor.is_admin();
        if !allowed {
            return Err(BookingError::unauthorized(
                "bookings are visible to their guest, the establishment's operator and administrators",
            ));
        }
        let user = self.user_summary(&booking.user_id).await?;
        Ok(BookingView {
            booking,
            establishment: Some(establishment.summary()),
            user,
        })
    }

    pub async fn my_bookings(&self, actor: &Actor) -> Result<Vec<BookingView>> {
        let bookings = self
            .stores
            .bookings
            .list(&BookingFilter {
                user_id: Some(actor.id.clone()),
                ..Default::default()
            })
            .await?;
        self.enrich(bookings).await
    }

    /// Bookings on the caller's establishments; administrators see all.
    pub async fn operator_bookings(
        &self,
        actor: &Actor,
        establishment_id: Option<&str>,
    ) -> Result<Vec<BookingView>> {
        let establishment_ids = if actor.is_admin() {
            establishment_id.map(|id| vec![id.to_string()])
        } else if actor.role == Role::Operator {
            let owned: Vec<String> = self
                .stores
                .establishments
                .list_by_operator(&actor.id)
                .await?
                .into_iter()
                .map(|e| e.id)
                .collect();
            match establishment_id {
                None => Some(owned),
                Some(id) if owned.iter().any(|o| o == id) => Some(vec![id.to_string()]),
                Some(id) => {
                    if self.stores.establishments.get(id).await?.is_none() {
                        return Err(BookingError::not_found("Establishment", id));
                    }
                    return Err(BookingError::unauthorized(format!(
                        "establishment {id} belongs to another operator"
                    )));
                }
            }
        } else {
            return Err(BookingError::unauthorized(
                "operator bookings are reserved to operators and administrators",
            ));
        };
        let bookings = self
            .stores
            .bookings
            .list(&BookingFilter {
                establishment_ids,
                ..Default::default()
            })
            .await?;
        self.enrich(bookings).await
    }

    async fn user_summary(&self, user_id: &str) -> Result<Option<UserSummary>> {
        Ok(self.stores.users.get(user_id).await?.map(|u| UserSummary {
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
        }))
    }

    async fn enrich(&self, bookings: Vec<Booking>) -> Result<Vec<BookingView>> {
        let establishments: HashMap<String, Establishment> = self
            .stores
            .establishments
            .list()
            .await?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        let mut users: HashMap<String, Option<UserSummary>> = HashMap::new();
        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let user = match users.get(&booking.user_id) {
                Some(cached) => cached.clone(),
                None => {
                    let summary = self.user_summary(&booking.user_id).await?;
                    users.insert(booking.user_id.clone(), summary.clone());
                    summary
                }
            };
            views.push(BookingView {
                establishment: establishments
                    .get(&booking.establishment_id)
                    .map(Establishment::summary),
                user,
                booking,
            });
        }
        Ok(views)
    }
}

impl std::fmt::Debug for ReservationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationCoordinator")
            .field("pricing", &self.pricing)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
