use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which side of the marketplace an organization is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Display)]
#[sqlx(type_name = "organization_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrganizationType {
    Bank,
    Vendor,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub org_type: OrganizationType,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}
