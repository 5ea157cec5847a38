use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use models_preservation::property::{Property, UpdatePropertyRequest};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn patch_property(
    db: &Pool<Postgres>,
    id: Uuid,
    patch: UpdatePropertyRequest,
    updated_at: DateTime<Utc>,
) -> Result<Option<Property>> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE properties SET updated_at = ");
    builder.push_bind(updated_at);

    macro_rules! set_if_present {
        ($field:ident, $column:literal) => {
            if let Some(value) = patch.$field {
                builder.push(concat!(", ", $column, " = "));
                builder.push_bind(value);
            }
        };
    }
    set_if_present!(address, "address");
    set_if_present!(city, "city");
    set_if_present!(county, "county");
    set_if_present!(state, "state");
    set_if_present!(zip, "zip");
    set_if_present!(parcel_id, "parcel_id");
    set_if_present!(property_type, "property_type");
    set_if_present!(acquisition_date, "acquisition_date");
    set_if_present!(bank_reference, "bank_reference");
    set_if_present!(notes, "notes");
    set_if_present!(status, "status");

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(
        " RETURNING id, organization_id, created_by, address, city, county, state, zip, \
         parcel_id, property_type, acquisition_date, bank_reference, notes, status, \
         created_at, updated_at",
    );

    builder
        .build_query_as::<Property>()
        .fetch_optional(db)
        .await
        .context("unable to update property")
}
