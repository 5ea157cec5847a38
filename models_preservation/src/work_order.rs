use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;

/// Priority of a work order, set by the client at creation time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Display,
)]
#[sqlx(type_name = "work_order_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Emergency,
}

/// Lifecycle status of a work order.
///
/// `Completed` and `Declined` are terminal; the legal moves between the
/// others are owned by the lifecycle module in the `work_orders` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Display)]
#[sqlx(type_name = "work_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    New,
    Accepted,
    InProgress,
    Completed,
    Declined,
}

/// The cadence a work order's total is charged at, chosen by the client
/// independently of the individual services' own frequencies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Display,
)]
#[sqlx(type_name = "billing_frequency", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BillingFrequency {
    #[default]
    OneTime,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// A work order row.
///
/// `wo_number`, `property_id`, `organization_id`, `created_by` and
/// `created_at` are assigned once at creation and immutable afterwards;
/// `total_cost` is derived from the service lines and never set
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct WorkOrder {
    pub id: Uuid,
    pub wo_number: String,
    pub organization_id: Uuid,
    pub property_id: Uuid,
    pub created_by: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub billing_frequency: BillingFrequency,
    pub scheduled_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub access_instructions: Option<String>,
    pub assigned_to: Option<String>,
    pub total_cost: Decimal,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One selected catalog service attached to a work order.
///
/// `unit_price` and `service_name` are snapshots taken from the catalog at
/// selection time; later catalog changes do not flow into existing lines.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ServiceLine {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    /// insertion order, kept for display
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// One append-only progress log entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub created_by: String,
    pub message: String,
    pub status_at_time: WorkOrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A work order with its service lines and progress log attached.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkOrderDetail {
    pub order: WorkOrder,
    pub services: Vec<ServiceLine>,
    pub progress_log: Vec<ProgressEntry>,
}

/// One service picked in a creation request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceSelection {
    pub service_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct CreateWorkOrderRequest {
    pub organization_id: Uuid,
    pub created_by: String,
    pub property_id: Uuid,
    #[serde(default)]
    #[builder(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    #[builder(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    #[builder(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[builder(default)]
    pub access_instructions: Option<String>,
    pub services: Vec<ServiceSelection>,
    #[serde(default)]
    #[builder(default)]
    pub billing_frequency: BillingFrequency,
}

/// The fields a PATCH may touch. Everything else on a work order is either
/// immutable or owned by the lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateWorkOrderRequest {
    pub priority: Option<Priority>,
    pub scheduled_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub access_instructions: Option<String>,
    pub assigned_to: Option<String>,
}

/// Field names an update is never allowed to touch.
pub const IMMUTABLE_FIELDS: &[&str] = &[
    "id",
    "wo_number",
    "organization_id",
    "property_id",
    "created_by",
    "created_at",
];

impl UpdateWorkOrderRequest {
    /// Names of the immutable fields present in a raw PATCH body.
    ///
    /// The caller rejects the whole request when this is non-empty, naming
    /// every offending field rather than silently dropping them.
    pub fn immutable_fields_in(body: &serde_json::Value) -> Vec<String> {
        let Some(map) = body.as_object() else {
            return Vec::new();
        };
        IMMUTABLE_FIELDS
            .iter()
            .filter(|field| map.contains_key(**field))
            .map(|field| field.to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.scheduled_date.is_none()
            && self.description.is_none()
            && self.access_instructions.is_none()
            && self.assigned_to.is_none()
    }
}

/// Outcome of a creation request.
///
/// The order row and its line rows are two independent writes with no
/// transaction spanning them; when the line write fails the order still
/// exists and `service_lines_persisted` is false so the caller can decide
/// whether to retry the lines or flag the order for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedWorkOrder {
    pub order: WorkOrder,
    pub services: Vec<ServiceLine>,
    pub service_lines_persisted: bool,
    /// what one billing period costs at the chosen billing frequency
    pub billing_amount: Decimal,
}

/// A progress note submitted against a work order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddProgressRequest {
    pub created_by: String,
    pub message: String,
}

/// Body for the explicit lifecycle action routes (accept, decline, start,
/// complete). The optional note overrides the default log message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LifecycleActionRequest {
    pub actor: String,
    #[serde(default)]
    pub note: Option<String>,
}
