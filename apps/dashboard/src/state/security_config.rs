use jsonwebtoken::Algorithm;

/// Audience the hosted auth provider stamps on user access tokens.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// How incoming bearer tokens are verified.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub audience: String,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}
