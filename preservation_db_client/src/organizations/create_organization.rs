use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use models_preservation::organization::{Organization, OrganizationType};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateOrganizationOptions {
    pub name: String,
    pub org_type: OrganizationType,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create_organization(
    db: &Pool<Postgres>,
    options: CreateOrganizationOptions,
) -> Result<Organization> {
    sqlx::query_as::<_, Organization>(
        "INSERT INTO organizations (id, name, org_type, contact_email, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, name, org_type, contact_email, created_at",
    )
    .bind(Uuid::now_v7())
    .bind(&options.name)
    .bind(options.org_type)
    .bind(&options.contact_email)
    .bind(options.created_at)
    .fetch_one(db)
    .await
    .context("unable to create organization")
}
