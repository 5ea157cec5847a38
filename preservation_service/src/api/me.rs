use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::AUTHORIZATION, HeaderMap},
};
use identity_service_client::{IdentityServiceClient, error::ClientError};
use models_preservation::user::CurrentUserResponse;
use preservation_db_client::{organizations, users};
use sqlx::PgPool;

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn error_body(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(serde_json::json!({ "error": message })))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "The signed-in user's profile and organization", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No profile for the account")
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(db, identity, headers))]
pub async fn current_user(
    State(db): State<PgPool>,
    State(identity): State<Arc<IdentityServiceClient>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserResponse>, ErrorResponse> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| error_body(StatusCode::UNAUTHORIZED, "no authorization header"))?;

    let account = identity.current_user(token).await.map_err(|e| match e {
        ClientError::Unauthorized => error_body(StatusCode::UNAUTHORIZED, "invalid token"),
        other => {
            tracing::error!(error = ?other, "unable to resolve token");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "unable to resolve token")
        }
    })?;

    let user = users::get_user::get_user(&db, &account.id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "unable to fetch profile");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "unable to fetch profile")
        })?
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "no profile for this account"))?;

    let organization = match user.organization_id {
        Some(organization_id) => {
            organizations::get_organization::get_organization(&db, organization_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = ?e, "unable to fetch organization");
                    error_body(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "unable to fetch organization",
                    )
                })?
        }
        None => None,
    };

    Ok(Json(CurrentUserResponse { user, organization }))
}
