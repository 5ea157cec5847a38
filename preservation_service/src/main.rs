use anyhow::Context;
use preservation_service::{api, config::Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
#[tracing::instrument(err)]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::trace!("initialized config");

    let db = PgPoolOptions::new()
        .min_connections(3)
        .max_connections(20)
        .connect(&config.database_url)
        .await
        .context("could not connect to db")?;

    tracing::trace!("initialized db connection");

    api::setup_and_serve(&config, db).await
}
