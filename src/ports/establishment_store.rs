use async_trait::async_trait;

use crate::domain::establishment::{Establishment, EstablishmentPatch};
use crate::error::Result;

#[async_trait]
pub trait EstablishmentStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Establishment>>;
    async fn list(&self) -> Result<Vec<Establishment>>;
    async fn upsert(&self, establishment: Establishment) -> Result<()>;

    /// Sets the moderation flag and returns the updated record.
    async fn set_verified(&self, id: &str, verified: bool) -> Result<Establishment>;

    /// Applies `patch` to the stored record in one step and returns the
    /// result. With `owner` set the record must belong to that operator.
    /// The moderation flag is left as stored.
    async fn update(
        &self,
        id: &str,
        patch: EstablishmentPatch,
        owner: Option<&str>,
    ) -> Result<Establishment>;

    async fn remove(&self, id: &str) -> Result<Option<Establishment>>;

    async fn list_by_operator(&self, operator_id: &str) -> Result<Vec<Establishment>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|e| e.operator_id == operator_id)
            .collect())
    }
}
