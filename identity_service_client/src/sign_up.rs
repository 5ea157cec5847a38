use crate::IdentityServiceClient;
use crate::error::{ClientError, ResponseExt};
use models_preservation::user::Identity;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IdentitySignUp {
    pub email: String,
    pub password: String,
    /// profile attributes the identity service stores against the account
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl IdentityServiceClient {
    /// Create an account and return the fully-formed identity. There is no
    /// follow-up read: the identity in the response is the record.
    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn sign_up(&self, req: IdentitySignUp) -> Result<Identity, ClientError> {
        let response = self
            .client
            .post(format!("{}/accounts", self.url))
            .json(&req)
            .send()
            .await
            .map_client_error()
            .await?;

        response
            .json::<Identity>()
            .await
            .map_err(|e| ClientError::Generic(anyhow::anyhow!(e.to_string())))
    }
}
