use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::actor::{Actor, Role, UserProfile};
use crate::domain::booking::{BookingFilter, StayRange};
use crate::domain::establishment::{
    Establishment, EstablishmentPatch, NewEstablishment, SearchFilters,
};
use crate::domain::stats::MarketplaceStats;
use crate::engine::availability_index::AvailabilityIndex;
use crate::engine::coordinator::Stores;
use crate::error::{BookingError, Result};

/// Public listing, operator venue management and the administrator
/// moderation gate.
pub struct Catalog {
    stores: Stores,
    availability: Arc<AvailabilityIndex>,
}

fn require_admin(actor: &Actor) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(BookingError::unauthorized("administrators only"))
    }
}

impl Catalog {
    pub fn new(stores: Stores, availability: Arc<AvailabilityIndex>) -> Self {
        Self {
            stores,
            availability,
        }
    }

    /// Verified establishments matching `filters`, optionally restricted to
    /// those free for `stay`.
    pub async fn search(
        &self,
        filters: &SearchFilters,
        stay: Option<StayRange>,
    ) -> Result<Vec<Establishment>> {
        let mut found = Vec::new();
        for establishment in self.stores.establishments.list().await? {
            if !establishment.is_verified || !filters.matches(&establishment) {
                continue;
            }
            if let Some(ref stay) = stay
                && !self
                    .availability
                    .lock(&establishment.id)
                    .await
                    .is_available(stay)
            {
                continue;
            }
            found.push(establishment);
        }
        Ok(found)
    }

    pub async fn get_public(&self, id: &str) -> Result<Establishment> {
        match self.stores.establishments.get(id).await? {
            Some(e) if e.is_verified => Ok(e),
            _ => Err(BookingError::not_found("Establishment", id)),
        }
    }

    /// Like [`Catalog::get_public`], but owners and administrators also see
    /// venues still awaiting moderation.
    pub async fn get_for(&self, actor: &Actor, id: &str) -> Result<Establishment> {
        let establishment = self
            .stores
            .establishments
            .get(id)
            .await?
            .ok_or_else(|| BookingError::not_found("Establishment", id))?;
        if establishment.is_verified
            || actor.is_admin()
            || actor.operates(&establishment.operator_id)
        {
            Ok(establishment)
        } else {
            Err(BookingError::not_found("Establishment", id))
        }
    }

    /// Lists a new venue. Operators list for themselves; administrators must
    /// name the owning operator. New venues start unverified.
    pub async fn register(
        &self,
        actor: &Actor,
        new: NewEstablishment,
        operator_id: Option<String>,
    ) -> Result<Establishment> {
        let operator_id = match actor.role {
            Role::Operator => actor.id.clone(),
            Role::Admin | Role::SuperAdmin => operator_id.ok_or_else(|| {
                BookingError::invalid_request(
                    "operator_id is required when an administrator lists a venue",
                )
            })?,
            _ => {
                return Err(BookingError::unauthorized(
                    "only operators can list establishments",
                ));
            }
        };
        if new.name.trim().is_empty() {
            return Err(BookingError::invalid_request("name is required"));
        }
        let establishment = Establishment {
            id: Uuid::new_v4().to_string(),
            operator_id,
            name: new.name,
            description: new.description,
            category: new.category,
            location: new.location,
            address: new.address,
            city: new.city,
            images: new.images,
            price: new.price,
            rating: None,
            latitude: new.latitude,
            longitude: new.longitude,
            is_verified: false,
        };
        self.stores
            .establishments
            .upsert(establishment.clone())
            .await?;
        info!(
            establishment_id = %establishment.id,
            operator_id = %establishment.operator_id,
            "Establishment listed, awaiting moderation"
        );
        Ok(establishment)
    }

    /// Edits a venue in place. Operators may only touch their own venues;
    /// the moderation flag is never written here.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        patch: EstablishmentPatch,
    ) -> Result<Establishment> {
        let owner = match actor.role {
            Role::Operator => Some(actor.id.as_str()),
            Role::Admin | Role::SuperAdmin => None,
            _ => {
                return Err(BookingError::unauthorized(
                    "only the owning operator or an administrator can edit an establishment",
                ));
            }
        };
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(BookingError::invalid_request("name cannot be empty"));
        }
        let establishment = self.stores.establishments.update(id, patch, owner).await?;
        info!(establishment_id = id, editor_id = %actor.id, "Establishment updated");
        Ok(establishment)
    }

    /// Removes a venue that has never been booked. Bookings are kept forever,
    /// so a venue with any booking on record is refused; `reject` takes it
    /// off the market instead.
    pub async fn delete(&self, actor: &Actor, id: &str) -> Result<Establishment> {
        let establishment = self
            .stores
            .establishments
            .get(id)
            .await?
            .ok_or_else(|| BookingError::not_found("Establishment", id))?;
        if !actor.operates(&establishment.operator_id) && !actor.is_admin() {
            return Err(BookingError::unauthorized(
                "only the owning operator or an administrator can delete an establishment",
            ));
        }

        // New bookings are inserted under this lock, so none can slip in
        // between the count and the removal.
        let calendar = self.availability.lock(id).await;
        let bookings = self
            .stores
            .bookings
            .list(&BookingFilter {
                establishment_ids: Some(vec![id.to_string()]),
                ..Default::default()
            })
            .await?
            .len();
        if bookings > 0 {
            return Err(BookingError::HasBookings {
                id: id.to_string(),
                bookings,
            });
        }
        let removed = self
            .stores
            .establishments
            .remove(id)
            .await?
            .ok_or_else(|| BookingError::not_found("Establishment", id))?;
        drop(calendar);
        self.availability.forget(id);

        info!(establishment_id = id, actor_id = %actor.id, "Establishment deleted");
        Ok(removed)
    }

    pub async fn my_establishments(&self, actor: &Actor) -> Result<Vec<Establishment>> {
        if actor.role != Role::Operator {
            return Err(BookingError::unauthorized("operators only"));
        }
        self.stores.establishments.list_by_operator(&actor.id).await
    }

    pub async fn pending(&self, actor: &Actor) -> Result<Vec<Establishment>> {
        require_admin(actor)?;
        Ok(self
            .stores
            .establishments
            .list()
            .await?
            .into_iter()
            .filter(|e| !e.is_verified)
            .collect())
    }

    pub async fn validate(&self, actor: &Actor, id: &str) -> Result<Establishment> {
        self.moderate(actor, id, true).await
    }

    /// Withdraws the venue from search and booking until validated again.
    /// Existing bookings are left untouched.
    pub async fn reject(&self, actor: &Actor, id: &str) -> Result<Establishment> {
        self.moderate(actor, id, false).await
    }

    async fn moderate(&self, actor: &Actor, id: &str, verified: bool) -> Result<Establishment> {
        require_admin(actor)?;
        let establishment = self.stores.establishments.set_verified(id, verified).await?;
        info!(
            establishment_id = id,
            admin_id = %actor.id,
            verified,
            "Establishment moderated"
        );
        Ok(establishment)
    }

    pub async fn users(&self, actor: &Actor) -> Result<Vec<UserProfile>> {
        require_admin(actor)?;
        self.stores.users.list().await
    }

    pub async fn stats(&self, actor: &Actor) -> Result<MarketplaceStats> {
        require_admin(actor)?;
        let establishments = self.stores.establishments.list().await?;
        let pending = establishments.iter().filter(|e| !e.is_verified).count();
        let bookings = self
            .stores
            .bookings
            .list(&BookingFilter::default())
            .await?;
        Ok(MarketplaceStats::compute(
            self.stores.users.count().await?,
            establishments.len(),
            pending,
            &bookings,
        ))
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}
