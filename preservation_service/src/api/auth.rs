use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use identity_service_client::{
    IdentityServiceClient, error::ClientError, sign_in::IdentitySignIn, sign_up::IdentitySignUp,
};
use models_preservation::user::{CurrentUserResponse, Session, SignInRequest, SignUpRequest};
use preservation_db_client::{organizations, users};
use sqlx::PgPool;

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn error_body(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(serde_json::json!({ "error": message })))
}

fn identity_error(err: ClientError, context: &str) -> ErrorResponse {
    match err {
        ClientError::Unauthorized => error_body(StatusCode::UNAUTHORIZED, "invalid credentials"),
        ClientError::NetworkError {
            status_code,
            message,
        } if status_code < 500 => {
            tracing::warn!(status_code, %message, "{context}");
            error_body(StatusCode::BAD_REQUEST, &message)
        }
        other => {
            tracing::error!(error = ?other, "{context}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account, profile and (optionally) organization created", body = CurrentUserResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(db, identity, req), fields(email = %req.email))]
pub async fn signup(
    State(db): State<PgPool>,
    State(identity): State<Arc<IdentityServiceClient>>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<CurrentUserResponse>), ErrorResponse> {
    // Create the organization first when the signup carries one, so the
    // profile row can reference it immediately.
    let organization = match (&req.organization_name, req.organization_type) {
        (Some(name), Some(org_type)) => Some(
            organizations::create_organization::create_organization(
                &db,
                organizations::create_organization::CreateOrganizationOptions {
                    name: name.clone(),
                    org_type,
                    contact_email: req.email.clone(),
                    created_at: chrono::Utc::now(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "unable to create organization");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "unable to create organization",
                )
            })?,
        ),
        _ => None,
    };

    let account = identity
        .sign_up(IdentitySignUp {
            email: req.email.clone(),
            password: req.password,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            role: req.role.to_string(),
        })
        .await
        .map_err(|e| identity_error(e, "unable to create account"))?;

    // The profile row is inserted right here, with the organization already
    // attached; nothing waits on a trigger to materialize it.
    let user = users::create_user::create_user(
        &db,
        users::create_user::CreateUserOptions {
            id: account.id,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            organization_id: organization.as_ref().map(|org| org.id),
            created_at: chrono::Utc::now(),
        },
    )
    .await
    .map_err(|e| {
        tracing::error!(error = ?e, "account created but its profile failed to persist");
        error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "account created but its profile failed to persist",
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CurrentUserResponse { user, organization }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "A session for the account", body = Session),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(identity, req), fields(email = %req.email))]
pub async fn signin(
    State(identity): State<Arc<IdentityServiceClient>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<Session>, ErrorResponse> {
    identity
        .sign_in(IdentitySignIn {
            email: req.email,
            password: req.password,
        })
        .await
        .map(Json)
        .map_err(|e| identity_error(e, "unable to sign in"))
}
