use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::establishment::{Establishment, EstablishmentPatch};
use crate::error::{BookingError, Result};
use crate::ports::establishment_store::EstablishmentStore;

#[derive(Default)]
pub struct MemoryEstablishmentStore {
    inner: RwLock<HashMap<String, Establishment>>,
}

impl MemoryEstablishmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_establishments(establishments: impl IntoIterator<Item = Establishment>) -> Self {
        let map = establishments
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl std::fmt::Debug for MemoryEstablishmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEstablishmentStore").finish()
    }
}

#[async_trait]
impl EstablishmentStore for MemoryEstablishmentStore {
    async fn get(&self, id: &str) -> Result<Option<Establishment>> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Establishment>> {
        let mut all: Vec<Establishment> = self.inner.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn upsert(&self, establishment: Establishment) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(establishment.id.clone(), establishment);
        Ok(())
    }

    async fn set_verified(&self, id: &str, verified: bool) -> Result<Establishment> {
        let mut all = self.inner.write().await;
        let establishment = all
            .get_mut(id)
            .ok_or_else(|| BookingError::not_found("Establishment", id))?;
        establishment.is_verified = verified;
        Ok(establishment.clone())
    }

    async fn update(
        &self,
        id: &str,
        patch: EstablishmentPatch,
        owner: Option<&str>,
    ) -> Result<Establishment> {
        let mut all = self.inner.write().await;
        let establishment = all
            .get_mut(id)
            .ok_or_else(|| BookingError::not_found("Establishment", id))?;
        if owner.is_some_and(|owner| establishment.operator_id != owner) {
            return Err(BookingError::unauthorized(
                "only the owning operator or an administrator can edit an establishment",
            ));
        }
        establishment.apply(patch);
        Ok(establishment.clone())
    }

    async fn remove(&self, id: &str) -> Result<Option<Establishment>> {
        Ok(self.inner.write().await.remove(id))
    }
}
