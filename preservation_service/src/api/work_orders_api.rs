use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use models_preservation::work_order::{
    AddProgressRequest, CreateWorkOrderRequest, CreatedWorkOrder, LifecycleActionRequest,
    ProgressEntry, WorkOrder, WorkOrderDetail, WorkOrderStatus,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use work_orders::domain::models::{LifecycleAction, WorkOrderError};

use crate::api::context::{ApiContext, Flow};

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

/// Map a domain error onto a response the portal can show.
fn error_response(err: WorkOrderError) -> ErrorResponse {
    let status = match &err {
        WorkOrderError::Validation(_) | WorkOrderError::ImmutableField { .. } => {
            StatusCode::BAD_REQUEST
        }
        WorkOrderError::InvalidTransition { .. } | WorkOrderError::Conflict => {
            StatusCode::CONFLICT
        }
        WorkOrderError::NotFound(_) => StatusCode::NOT_FOUND,
        WorkOrderError::Numbering(_) | WorkOrderError::Store(_) => {
            tracing::error!(error = ?err, "work order operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderListParams {
    pub organization_id: Uuid,
    pub status: Option<WorkOrderStatus>,
}

#[utoipa::path(
    get,
    path = "/work-orders",
    params(WorkOrderListParams),
    responses(
        (status = 200, description = "Work orders for the organization, newest first", body = Vec<WorkOrder>),
        (status = 500, description = "Internal server error")
    ),
    tag = "work-orders"
)]
#[tracing::instrument(skip(flow), fields(organization_id = %params.organization_id))]
pub async fn list_work_orders(
    State(flow): State<Arc<Flow>>,
    Query(params): Query<WorkOrderListParams>,
) -> Result<Json<Vec<WorkOrder>>, ErrorResponse> {
    flow.list(params.organization_id, params.status)
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/work-orders",
    request_body = CreateWorkOrderRequest,
    responses(
        (status = 201, description = "Work order created", body = CreatedWorkOrder),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Referenced property not found"),
        (status = 409, description = "Numbering contention, retry"),
        (status = 500, description = "Internal server error")
    ),
    tag = "work-orders"
)]
#[tracing::instrument(skip(flow, req))]
pub async fn create_work_order(
    State(flow): State<Arc<Flow>>,
    Json(req): Json<CreateWorkOrderRequest>,
) -> Result<(StatusCode, Json<CreatedWorkOrder>), ErrorResponse> {
    let created = flow.create(req).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/work-orders/{id}",
    responses(
        (status = 200, description = "The work order with lines and progress log", body = WorkOrderDetail),
        (status = 404, description = "Work order not found")
    ),
    tag = "work-orders"
)]
pub async fn get_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    flow.get(id).await.map(Json).map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/work-orders/{id}",
    responses(
        (status = 200, description = "The updated work order", body = WorkOrder),
        (status = 400, description = "Invalid or immutable fields in the patch"),
        (status = 404, description = "Work order not found")
    ),
    tag = "work-orders"
)]
#[tracing::instrument(skip(flow, body), fields(%id))]
pub async fn patch_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WorkOrder>, ErrorResponse> {
    flow.update(id, body).await.map(Json).map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/work-orders/{id}",
    responses(
        (status = 204, description = "Work order and dependent rows removed"),
        (status = 404, description = "Work order not found")
    ),
    tag = "work-orders"
)]
#[tracing::instrument(skip(flow), fields(%id))]
pub async fn delete_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    flow.delete(id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn lifecycle_action(
    flow: &Flow,
    id: Uuid,
    action: LifecycleAction,
    req: LifecycleActionRequest,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    flow.apply(id, action, req.actor, req.note)
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/work-orders/{id}/accept",
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Work order accepted", body = WorkOrderDetail),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Not acceptable from the current status")
    ),
    tag = "work-orders"
)]
pub async fn accept_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(req): Json<LifecycleActionRequest>,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    lifecycle_action(&flow, id, LifecycleAction::Accept, req).await
}

#[utoipa::path(
    post,
    path = "/work-orders/{id}/decline",
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Work order declined", body = WorkOrderDetail),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Not declinable from the current status")
    ),
    tag = "work-orders"
)]
pub async fn decline_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(req): Json<LifecycleActionRequest>,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    lifecycle_action(&flow, id, LifecycleAction::Decline, req).await
}

#[utoipa::path(
    post,
    path = "/work-orders/{id}/start",
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Work started", body = WorkOrderDetail),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Not startable from the current status")
    ),
    tag = "work-orders"
)]
pub async fn start_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(req): Json<LifecycleActionRequest>,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    lifecycle_action(&flow, id, LifecycleAction::Start, req).await
}

#[utoipa::path(
    post,
    path = "/work-orders/{id}/complete",
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Work completed", body = WorkOrderDetail),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Not completable from the current status")
    ),
    tag = "work-orders"
)]
pub async fn complete_work_order(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(req): Json<LifecycleActionRequest>,
) -> Result<Json<WorkOrderDetail>, ErrorResponse> {
    lifecycle_action(&flow, id, LifecycleAction::Complete, req).await
}

#[utoipa::path(
    get,
    path = "/work-orders/{id}/progress",
    responses(
        (status = 200, description = "The progress log, oldest first", body = Vec<ProgressEntry>),
        (status = 404, description = "Work order not found")
    ),
    tag = "work-orders"
)]
pub async fn get_progress(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ProgressEntry>>, ErrorResponse> {
    flow.get(id)
        .await
        .map(|detail| Json(detail.progress_log))
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/work-orders/{id}/progress",
    request_body = AddProgressRequest,
    responses(
        (status = 201, description = "Progress note appended", body = ProgressEntry),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Notes are only allowed once work is in progress")
    ),
    tag = "work-orders"
)]
#[tracing::instrument(skip(flow, req), fields(%id))]
pub async fn post_progress(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddProgressRequest>,
) -> Result<(StatusCode, Json<ProgressEntry>), ErrorResponse> {
    let entry = flow.add_progress(id, req).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/", post(create_work_order).get(list_work_orders))
        .route(
            "/{id}",
            get(get_work_order)
                .patch(patch_work_order)
                .delete(delete_work_order),
        )
        .route("/{id}/accept", post(accept_work_order))
        .route("/{id}/decline", post(decline_work_order))
        .route("/{id}/start", post(start_work_order))
        .route("/{id}/complete", post(complete_work_order))
        .route("/{id}/progress", get(get_progress).post(post_progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_onto_the_right_status_codes() {
        let (status, _) = error_response(WorkOrderError::Validation("bad".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(WorkOrderError::ImmutableField {
            fields: vec!["wo_number".to_string()],
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(WorkOrderError::InvalidTransition {
            current: WorkOrderStatus::New,
            action: LifecycleAction::Complete,
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(WorkOrderError::Conflict);
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(WorkOrderError::NotFound("work order"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = error_response(WorkOrderError::Store(anyhow::anyhow!("db down")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["error"], "db down");
    }
}
