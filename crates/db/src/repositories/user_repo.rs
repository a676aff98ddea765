//! Repository for the `users` table.

use sqlx::PgPool;
use taskboard_core::types::DbId;
use taskboard_core::user::SignIn;

use crate::models::user::UserRow;

const COLUMNS: &str = "id, name, email, image";

/// Provides lookup and sign-in upsert for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user on first sign-in, or refresh name/image on later ones.
    ///
    /// Missing name or image keep the stored value.
    pub async fn upsert_by_email(pool: &PgPool, input: &SignIn) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, image)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                image = COALESCE(EXCLUDED.image, users.image),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
