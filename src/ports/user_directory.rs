use async_trait::async_trait;

use crate::domain::actor::UserProfile;
use crate::error::Result;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<UserProfile>>;
    async fn upsert(&self, profile: UserProfile) -> Result<()>;
    async fn count(&self) -> Result<usize>;

    /// Every profile, ordered by last name, first name, then id.
    async fn list(&self) -> Result<Vec<UserProfile>>;
}
