use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A property under management for an organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Property {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: String,
    pub address: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub zip: String,
    pub parcel_id: Option<String>,
    pub property_type: String,
    pub acquisition_date: Option<NaiveDate>,
    /// the submitting bank's own reference for the asset
    pub bank_reference: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A property plus how many work orders have been raised against it, the
/// shape the portal list views want.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PropertyWithWorkOrderCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub work_order_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub organization_id: Uuid,
    pub created_by: String,
    pub address: String,
    pub city: String,
    pub county: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub parcel_id: Option<String>,
    pub property_type: String,
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default)]
    pub bank_reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_state() -> String {
    "NC".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePropertyRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub parcel_id: Option<String>,
    pub property_type: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub bank_reference: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}
