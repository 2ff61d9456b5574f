// SQLite implementation of the UserDirectory port over the `users` table.

use crate::modules::accounts::core::ports::UserDirectory;
use crate::modules::accounts::core::user::{Role, UserAccount};
use crate::shared::core::repository_error::RepositoryError;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserAccount {
            role: row.role.parse().map_err(RepositoryError::Corrupt)?,
            id: row.id,
            name: row.name,
            email: row.email,
        })
    }
}

pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, name, email, role FROM users WHERE role = ? ORDER BY name, id",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(UserAccount::try_from).collect()
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, email, role FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserAccount::try_from).transpose()
    }

    async fn upsert(&self, user: UserAccount) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, role) VALUES (?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET name = excluded.name, email = excluded.email, role = excluded.role",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
