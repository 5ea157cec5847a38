use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

/// The grouping a catalog service is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceCategory {
    LawnCare,
    Cleaning,
    Security,
    Seasonal,
    Inspection,
    Maintenance,
    Emergency,
}

/// How often a catalog service is normally performed.
///
/// This is the service's own cadence, independent of the billing frequency a
/// client picks for a work order. `OneTime` and `AsNeeded` charges are
/// non-recurring: they are reported as-is and never divided into a monthly
/// figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceFrequency {
    OneTime,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Seasonal,
    Yearly,
    AsNeeded,
}

impl ServiceFrequency {
    /// true when the charge recurs and participates in monthly normalization
    pub fn is_recurring(self) -> bool {
        !matches!(self, ServiceFrequency::OneTime | ServiceFrequency::AsNeeded)
    }
}

/// One offerable service in the static catalog.
///
/// Entries are seed data compiled into the binary; changing them is a
/// redeploy, not a runtime operation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ServiceCategory,
    pub description: &'static str,
    pub base_price: Decimal,
    /// unit label shown next to the price, e.g. "per visit"
    pub unit: &'static str,
    pub frequency: ServiceFrequency,
}
