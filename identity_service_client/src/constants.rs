pub(crate) const INTERNAL_AUTH_HEADER_KEY: &str = "x-internal-auth-key";
