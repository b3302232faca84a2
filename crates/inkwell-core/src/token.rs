use chrono::{Duration, Utc};
use inkwell_types::api::Claims;
use inkwell_types::{Error, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Issues and verifies signed, self-contained bearer tokens carrying a user
/// identity claim. The signing secret is injected at construction; there is
/// no revocation or refresh; tokens are valid until natural expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    expires_in: &'static str,
}

impl TokenService {
    /// Short-lived tokens for production deployments.
    pub fn production(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(1), "1h")
    }

    /// Longer-lived tokens everywhere else.
    pub fn development(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::days(1), "1d")
    }

    pub fn with_ttl(secret: &str, ttl: Duration, expires_in: &'static str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            expires_in,
        }
    }

    /// Human-readable TTL label returned alongside issued tokens.
    pub fn expires_in(&self) -> &'static str {
        self.expires_in
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(anyhow::Error::from)?;
        Ok(token)
    }

    /// Fails with `Unauthorized` when the signature does not match, the token
    /// is malformed, or it is expired. A valid token whose subject no longer
    /// exists is the caller's problem; existence is not checked here.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::Unauthorized("Invalid token".into()))?;
        Ok(data.claims)
    }
}
