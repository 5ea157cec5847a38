use anyhow::{Context, Result};
use models_preservation::user::UserProfile;
use sqlx::{Pool, Postgres};

pub async fn get_user(db: &Pool<Postgres>, id: &str) -> Result<Option<UserProfile>> {
    sqlx::query_as::<_, UserProfile>(
        "SELECT id, email, first_name, last_name, role, organization_id, created_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("failed to get user profile")
}
