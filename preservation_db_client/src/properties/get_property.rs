use anyhow::{Context, Result};
use models_preservation::property::Property;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_property(db: &Pool<Postgres>, id: Uuid) -> Result<Option<Property>> {
    sqlx::query_as::<_, Property>(
        "SELECT id, organization_id, created_by, address, city, county, state, zip, parcel_id, \
         property_type, acquisition_date, bank_reference, notes, status, created_at, updated_at \
         FROM properties WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("failed to get property")
}
