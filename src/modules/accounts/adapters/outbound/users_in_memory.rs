// In memory implementation of the UserDirectory port.
//
// Purpose
// - Seed rosters in tests and run the service locally without a database.

use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::accounts::core::user::{Role, UserAccount, sort_roster};
use crate::shared::core::repository_error::RepositoryError;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserAccount>>,
    is_offline: bool,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
            is_offline: false,
        }
    }

    pub async fn remove(&self, user_id: &str) -> Option<UserAccount> {
        self.users.write().await.remove(user_id)
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend("User directory offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError> {
        self.ensure_online()?;
        let mut roster: Vec<UserAccount> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.role == role)
            .cloned()
            .collect();
        sort_roster(&mut roster);
        Ok(roster)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserAccount>, RepositoryError> {
        self.ensure_online()?;
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user: UserAccount) -> Result<(), RepositoryError> {
        self.ensure_online()?;
        self.users.write().await.insert(user.id.clone(), user);
        Ok(())
    }
}
