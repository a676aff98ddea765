//! User row model.

use sqlx::FromRow;
use taskboard_core::types::DbId;
use taskboard_core::user::User;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            image: row.image,
        }
    }
}
