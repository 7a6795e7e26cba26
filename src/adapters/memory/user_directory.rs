use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::actor::UserProfile;
use crate::error::Result;
use crate::ports::user_directory::UserDirectory;

#[derive(Default)]
pub struct MemoryUserDirectory {
    inner: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            inner: RwLock::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
        }
    }
}

impl std::fmt::Debug for MemoryUserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUserDirectory").finish()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get(&self, id: &str) -> Result<Option<UserProfile>> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> Result<()> {
        self.inner.write().await.insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.len())
    }

    async fn list(&self) -> Result<Vec<UserProfile>> {
        let mut all: Vec<UserProfile> = self.inner.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }
}
