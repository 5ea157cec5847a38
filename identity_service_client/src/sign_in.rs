use crate::IdentityServiceClient;
use crate::error::{ClientError, ResponseExt};
use models_preservation::user::Session;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IdentitySignIn {
    pub email: String,
    pub password: String,
}

impl IdentityServiceClient {
    /// Exchange credentials for a session. Bad credentials come back as
    /// [ClientError::Unauthorized], not a generic failure.
    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn sign_in(&self, req: IdentitySignIn) -> Result<Session, ClientError> {
        let response = self
            .client
            .post(format!("{}/sessions", self.url))
            .json(&req)
            .send()
            .await
            .map_client_error()
            .await?;

        response
            .json::<Session>()
            .await
            .map_err(|e| ClientError::Generic(anyhow::anyhow!(e.to_string())))
    }
}
