use anyhow::{Context, Result};
use models_preservation::organization::Organization;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_organization(db: &Pool<Postgres>, id: Uuid) -> Result<Option<Organization>> {
    sqlx::query_as::<_, Organization>(
        "SELECT id, name, org_type, contact_email, created_at FROM organizations WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("failed to get organization")
}
