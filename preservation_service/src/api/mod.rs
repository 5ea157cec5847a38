use std::sync::Arc;

use crate::{api::context::ApiContext, config::Config};
use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use identity_service_client::IdentityServiceClient;
use models_preservation::paths;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use work_orders::domain::services::WorkOrderFlow;
use work_orders::outbound::{postgres::PgWorkOrderStore, time::DefaultTime};

pub mod auth;
pub mod context;
pub mod health;
pub mod me;
pub mod properties;
pub mod services;
pub mod swagger;
pub mod work_orders_api;

pub async fn setup_and_serve(config: &Config, db: PgPool) -> anyhow::Result<()> {
    let cors = CorsLayer::permissive();

    let identity = IdentityServiceClient::new(
        config.identity_service_secret_key.clone(),
        config.identity_service_url.clone(),
    );
    let flow = WorkOrderFlow::new(PgWorkOrderStore::new(db.clone()), DefaultTime);

    let app = api_router()
        .with_state(ApiContext {
            db,
            flow: Arc::new(flow),
            identity: Arc::new(identity),
        })
        .layer(cors.clone())
        .nest(paths::HEALTH, health::router().layer(cors))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .context("failed to bind to port")?;

    tracing::info!(
        "preservation service is up and running on port {}",
        &config.port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error starting service")
}

fn api_router() -> Router<ApiContext> {
    Router::new()
        .route(paths::AUTH_SIGNUP, post(auth::signup))
        .route(paths::AUTH_SIGNIN, post(auth::signin))
        .route(paths::ME, get(me::current_user))
        .nest(paths::SERVICES, services::router())
        .nest(paths::PROPERTIES, properties::router())
        .nest(paths::WORK_ORDERS, work_orders_api::router())
}
