//! Signed admin session tokens and the cookie that carries them.
//!
//! A token is `base64url(claims_json) + "." + hex(hmac_sha256(key, payload))`
//! with a short expiry. It is minted on a successful login, stored in an
//! HTTP-only cookie, and verified by the [`AdminSession`] extractor on every
//! protected route. Verification failures never say what was wrong beyond a
//! generic message.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use roster_core::defaults::{SESSION_COOKIE, SESSION_LIFETIME_SECS};
use roster_core::{Error, Result};

use crate::error::ApiError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

const GENERIC_REJECTION: &str = "invalid or expired session";

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject; the admin gate has a single global identity.
    pub sub: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Signing key for session tokens.
#[derive(Clone)]
pub struct SessionKey {
    key: [u8; 32],
}

impl SessionKey {
    /// Derive a fixed-size signing key from a configured secret string.
    pub fn from_secret(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        Self {
            key: hasher.finalize().into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // A 32-byte key is always a valid HMAC key.
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length")
    }

    /// Mint a token valid for [`SESSION_LIFETIME_SECS`] from `now`.
    pub fn mint(&self, now: i64) -> Result<String> {
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: now,
            exp: now + SESSION_LIFETIME_SECS,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify a token and return its claims.
    ///
    /// Rejects on bad shape, bad signature, or expiry, always with the same
    /// generic message.
    pub fn verify(&self, token: &str, now: i64) -> Result<SessionClaims> {
        let reject = || Error::Unauthorized(GENERIC_REJECTION.to_string());

        let (payload, signature) = token.split_once('.').ok_or_else(reject)?;
        let signature = hex::decode(signature).map_err(|_| reject())?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| reject())?;

        let claims: SessionClaims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).map_err(|_| reject())?)
                .map_err(|_| reject())?;
        if claims.exp <= now {
            return Err(reject());
        }
        Ok(claims)
    }
}

/// `Set-Cookie` value installing a session token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_LIFETIME_SECS
    )
}

/// `Set-Cookie` value clearing the session.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extractor gating protected routes on a valid session cookie.
pub struct AdminSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|cookies| {
                cookies
                    .split(';')
                    .filter_map(|pair| pair.trim().split_once('='))
                    .find(|(name, _)| *name == SESSION_COOKIE)
                    .map(|(_, value)| value.to_string())
            })
            .ok_or_else(|| ApiError::Unauthorized(GENERIC_REJECTION.to_string()))?;

        let claims = state
            .session_key
            .verify(&token, chrono::Utc::now().timestamp())?;
        Ok(AdminSession(claims))
    }
}
