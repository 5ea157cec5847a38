//! Typed client for the external identity service: account creation,
//! sign-in, and token-to-account resolution.

use constants::INTERNAL_AUTH_HEADER_KEY;

pub(crate) mod constants;
pub mod current_user;
pub mod error;
pub mod sign_in;
pub mod sign_up;

#[derive(Clone)]
pub struct IdentityServiceClient {
    url: String,
    client: reqwest::Client,
}

impl IdentityServiceClient {
    pub fn new(internal_auth_key: String, url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(INTERNAL_AUTH_HEADER_KEY, internal_auth_key.parse().unwrap());

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();

        Self { url, client }
    }
}
