use axum::{
    Json, Router,
    extract::Query,
    routing::get,
};
use models_preservation::catalog::{ServiceCategory, ServiceDefinition};
use serde::Deserialize;
use utoipa::ToSchema;
use work_orders::domain::catalog;

use crate::api::context::ApiContext;

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ServiceListParams {
    pub category: Option<ServiceCategory>,
}

#[utoipa::path(
    get,
    path = "/services",
    params(ServiceListParams),
    responses(
        (status = 200, description = "The service catalog, optionally filtered by category", body = Vec<ServiceDefinition>)
    ),
    tag = "services"
)]
pub async fn list_services(
    Query(params): Query<ServiceListParams>,
) -> Json<Vec<ServiceDefinition>> {
    match params.category {
        Some(category) => Json(catalog::list_by_category(category).cloned().collect()),
        None => Json(catalog::CATALOG.to_vec()),
    }
}

pub fn router() -> Router<ApiContext> {
    Router::new().route("/", get(list_services))
}
