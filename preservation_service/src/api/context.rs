use std::sync::Arc;

use axum::extract::FromRef;
use identity_service_client::IdentityServiceClient;
use sqlx::PgPool;
use work_orders::domain::services::WorkOrderFlow;
use work_orders::outbound::{postgres::PgWorkOrderStore, time::DefaultTime};

/// The concrete work-order service the routes run against.
pub type Flow = WorkOrderFlow<PgWorkOrderStore, DefaultTime>;

#[derive(Clone, FromRef)]
pub struct ApiContext {
    pub db: PgPool,
    pub flow: Arc<Flow>,
    pub identity: Arc<IdentityServiceClient>,
}
