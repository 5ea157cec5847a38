use anyhow::{Context, Result};
use models_preservation::property::PropertyWithWorkOrderCount;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Every property for an organization, newest first, each with the number of
/// work orders raised against it.
pub async fn get_properties(
    db: &Pool<Postgres>,
    organization_id: Uuid,
) -> Result<Vec<PropertyWithWorkOrderCount>> {
    sqlx::query_as::<_, PropertyWithWorkOrderCount>(
        "SELECT p.id, p.organization_id, p.created_by, p.address, p.city, p.county, p.state, \
         p.zip, p.parcel_id, p.property_type, p.acquisition_date, p.bank_reference, p.notes, \
         p.status, p.created_at, p.updated_at, \
         (SELECT COUNT(*) FROM work_orders w WHERE w.property_id = p.id) AS work_order_count \
         FROM properties p \
         WHERE p.organization_id = $1 \
         ORDER BY p.created_at DESC",
    )
    .bind(organization_id)
    .fetch_all(db)
    .await
    .context("failed to list properties")
}
