use jsonwebtoken::Algorithm;

/// Scheme prefix expected in front of the token in the Authorization header.
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

/// Configuration for session token signing and verification
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (HS256); verification rejects every other algorithm
    pub algorithm: Algorithm,
    /// Authorization header scheme prefix, compared case-insensitively
    pub auth_scheme: String,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
        }
    }

    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
