use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use models_preservation::property::{
    CreatePropertyRequest, Property, PropertyWithWorkOrderCount, UpdatePropertyRequest,
};
use preservation_db_client::properties;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::context::ApiContext;

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn internal_error(err: anyhow::Error, message: &str) -> ErrorResponse {
    tracing::error!(error = ?err, "{message}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
}

fn not_found() -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "property not found" })),
    )
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListParams {
    pub organization_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/properties",
    params(PropertyListParams),
    responses(
        (status = 200, description = "Properties for the organization, newest first", body = Vec<PropertyWithWorkOrderCount>),
        (status = 500, description = "Internal server error")
    ),
    tag = "properties"
)]
#[tracing::instrument(skip(db), fields(organization_id = %params.organization_id))]
pub async fn list_properties(
    State(db): State<PgPool>,
    Query(params): Query<PropertyListParams>,
) -> Result<Json<Vec<PropertyWithWorkOrderCount>>, ErrorResponse> {
    properties::get_properties::get_properties(&db, params.organization_id)
        .await
        .map(Json)
        .map_err(|e| internal_error(e, "unable to list properties"))
}

#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "properties"
)]
#[tracing::instrument(skip(db, req))]
pub async fn create_property(
    State(db): State<PgPool>,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Property>), ErrorResponse> {
    let property =
        properties::create_property::create_property(&db, req, chrono::Utc::now())
            .await
            .map_err(|e| internal_error(e, "unable to create property"))?;
    Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    get,
    path = "/properties/{id}",
    responses(
        (status = 200, description = "The property", body = Property),
        (status = 404, description = "Property not found")
    ),
    tag = "properties"
)]
pub async fn get_property(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, ErrorResponse> {
    properties::get_property::get_property(&db, id)
        .await
        .map_err(|e| internal_error(e, "unable to fetch property"))?
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    patch,
    path = "/properties/{id}",
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "The updated property", body = Property),
        (status = 404, description = "Property not found")
    ),
    tag = "properties"
)]
#[tracing::instrument(skip(db, patch), fields(%id))]
pub async fn patch_property(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdatePropertyRequest>,
) -> Result<Json<Property>, ErrorResponse> {
    properties::patch_property::patch_property(&db, id, patch, chrono::Utc::now())
        .await
        .map_err(|e| internal_error(e, "unable to update property"))?
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    delete,
    path = "/properties/{id}",
    responses(
        (status = 204, description = "Property removed"),
        (status = 404, description = "Property not found")
    ),
    tag = "properties"
)]
#[tracing::instrument(skip(db), fields(%id))]
pub async fn delete_property(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    let deleted = properties::delete_property::delete_property(&db, id)
        .await
        .map_err(|e| internal_error(e, "unable to delete property"))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/{id}",
            get(get_property)
                .patch(patch_property)
                .delete(delete_property),
        )
}
