use anyhow::Context;

/// The configuration parameters for the application.
///
/// These are pulled from environment variables, which is how the container
/// is populated in every deployed environment.
pub struct Config {
    /// The connection URL for the Postgres database this application should use.
    pub database_url: String,
    /// The port to listen for HTTP requests on.
    pub port: usize,
    /// url of the identity service
    pub identity_service_url: String,
    /// Identity service secret key, used for internal access
    pub identity_service_secret_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be provided")?;
        let port: usize = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse::<usize>()
            .unwrap();

        let identity_service_url = std::env::var("IDENTITY_SERVICE_URL")
            .context("IDENTITY_SERVICE_URL must be provided")?;

        let identity_service_secret_key = std::env::var("IDENTITY_SERVICE_SECRET_KEY")
            .context("IDENTITY_SERVICE_SECRET_KEY must be provided")?;

        Ok(Config {
            database_url,
            port,
            identity_service_url,
            identity_service_secret_key,
        })
    }
}
