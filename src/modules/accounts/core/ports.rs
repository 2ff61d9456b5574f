use crate::modules::accounts::core::user::{Role, UserAccount};
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;

/// Read access to the account roster, queried fresh on every call.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns every account with `role`, ordered by name then id.
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserAccount>, RepositoryError>;
    async fn upsert(&self, user: UserAccount) -> Result<(), RepositoryError>;
}
