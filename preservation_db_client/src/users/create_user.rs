use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use models_preservation::user::{UserProfile, UserRole};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateUserOptions {
    /// the identity service's id for the account
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insert the profile row for a freshly signed-up account.
///
/// This runs immediately after the identity service accepts the sign-up, so
/// the profile exists the moment the caller gets a response; nothing waits
/// on a trigger to materialize it.
pub async fn create_user(db: &Pool<Postgres>, options: CreateUserOptions) -> Result<UserProfile> {
    sqlx::query_as::<_, UserProfile>(
        "INSERT INTO users (id, email, first_name, last_name, role, organization_id, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, email, first_name, last_name, role, organization_id, created_at",
    )
    .bind(&options.id)
    .bind(&options.email)
    .bind(&options.first_name)
    .bind(&options.last_name)
    .bind(options.role)
    .bind(options.organization_id)
    .bind(options.created_at)
    .fetch_one(db)
    .await
    .context("unable to create user profile")
}
