use crate::IdentityServiceClient;
use crate::error::{ClientError, ResponseExt};
use models_preservation::user::Identity;

impl IdentityServiceClient {
    /// Resolve a bearer token to the account it belongs to. An expired or
    /// unknown token is [ClientError::Unauthorized].
    #[tracing::instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> Result<Identity, ClientError> {
        let response = self
            .client
            .get(format!("{}/accounts/me", self.url))
            .bearer_auth(token)
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
