use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, as a string.
    pub sub: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
    /// Random id so that two tokens minted in the same second never collide.
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// A freshly signed refresh token together with the expiry that gets persisted next to it.
#[derive(Debug, Clone)]
pub struct IssuedRefresh {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access and refresh tokens. Built once from [`Config`].
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm: config.algorithm,
            access_ttl: Duration::try_minutes(config.access_token_expire_minutes)
                .unwrap_or(Duration::MAX),
            refresh_ttl: Duration::try_days(config.refresh_token_expire_days)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn issue_access(&self, user_id: i64) -> Result<String, String> {
        let now = Utc::now();
        self.sign(user_id, TokenKind::Access, now, expiry(now, self.access_ttl)?)
    }

    pub fn issue_refresh(&self, user_id: i64) -> Result<IssuedRefresh, String> {
        let now = Utc::now();
        let expires_at = expiry(now, self.refresh_ttl)?;
        let token = self.sign(user_id, TokenKind::Refresh, now, expires_at)?;
        Ok(IssuedRefresh { token, expires_at })
    }

    /// Verify signature and expiry. Any failure yields `None`.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .ok()
    }

    fn sign(
        &self,
        user_id: i64,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, String> {
        let claims = Claims {
            sub: user_id.to_string(),
            kind,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: hex::encode(rand::random::<[u8; 16]>()),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| format!("JWT encode failed: {e}"))
    }
}

fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, String> {
    issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| "Token lifetime out of range".to_string())
}

/// Fingerprint stored in `refresh_tokens.token_hash`; the raw token is never persisted.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
