use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use models_preservation::property::{CreatePropertyRequest, Property};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const PROPERTY_COLUMNS: &str = "id, organization_id, created_by, address, city, county, state, \
     zip, parcel_id, property_type, acquisition_date, bank_reference, notes, status, \
     created_at, updated_at";

pub async fn create_property(
    db: &Pool<Postgres>,
    req: CreatePropertyRequest,
    created_at: DateTime<Utc>,
) -> Result<Property> {
    sqlx::query_as::<_, Property>(&format!(
        "INSERT INTO properties (id, organization_id, created_by, address, city, county, state, \
         zip, parcel_id, property_type, acquisition_date, bank_reference, notes, status, \
         created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'active', $14, $14) \
         RETURNING {PROPERTY_COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(req.organization_id)
    .bind(&req.created_by)
    .bind(&req.address)
    .bind(&req.city)
    .bind(&req.county)
    .bind(&req.state)
    .bind(&req.zip)
    .bind(&req.parcel_id)
    .bind(&req.property_type)
    .bind(req.acquisition_date)
    .bind(&req.bank_reference)
    .bind(&req.notes)
    .bind(created_at)
    .fetch_one(db)
    .await
    .context("unable to create property")
}
