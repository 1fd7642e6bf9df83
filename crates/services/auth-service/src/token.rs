//! Access token signing and verification (HS256 JWT).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SigningSecret;
use crate::error::TokenError;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Issued at, unix seconds
    #[serde(default)]
    pub iat: i64,
}

impl AuthClaims {
    /// Claims for a subject; `iat` and `exp` are filled in by `issue`.
    pub fn new(sub: Uuid, email: impl Into<String>, role: Option<String>) -> Self {
        Self {
            sub,
            email: email.into(),
            role,
            exp: 0,
            iat: 0,
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Sign `claims` with HS256, stamping `iat = now` and `exp = now + ttl`.
pub fn issue(
    mut claims: AuthClaims,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = Utc::now();
    claims.iat = now.timestamp();
    claims.exp = (now + ttl).timestamp();

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
///
/// Only HS256 is accepted. A token asserting any other algorithm, `none`
/// included, fails as `BadSignature`; expiry has no leeway.
pub fn verify(token: &str, secret: &SigningSecret) -> Result<AuthClaims, TokenError> {
    ensure_hs256(token)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

/// Read the asserted algorithm before handing the token to the decoder,
/// which would report `none` as a parse failure rather than a bad signature.
fn ensure_hs256(token: &str) -> Result<(), TokenError> {
    let mut parts = token.split('.');
    let header = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(_), Some(_), None) => header,
        _ => return Err(TokenError::Malformed),
    };

    let raw = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

    if header.alg != "HS256" {
        return Err(TokenError::BadSignature);
    }
    Ok(())
}

/// Issues and verifies tokens with one injected secret and lifetime.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: SigningSecret,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: SigningSecret, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn issue(&self, claims: AuthClaims) -> Result<String, TokenError> {
        issue(claims, &self.secret, self.ttl)
    }

    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        verify(token, &self.secret)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SigningSecret {
        SigningSecret::new(value).unwrap()
    }

    fn claims() -> AuthClaims {
        AuthClaims::new(
            Uuid::new_v4(),
            "alice@example.com",
            Some("user".to_string()),
        )
    }

    #[test]
    fn test_issue_then_verify_returns_claims() {
        let key = secret("test-secret-key-for-testing-only-32chars");
        let original = claims();

        let token = issue(original.clone(), &key, Duration::hours(1)).unwrap();
        let verified = verify(&token, &key).unwrap();

        assert_eq!(verified.sub, original.sub);
        assert_eq!(verified.email, original.email);
        assert_eq!(verified.role, original.role);
        assert_eq!(verified.exp - verified.iat, 3600);
    }

    #[test]
    fn test_role_is_optional() {
        let key = secret("test-secret-key-for-testing-only-32chars");
        let token = issue(
            AuthClaims::new(Uuid::new_v4(), "bob@example.com", None),
            &key,
            Duration::hours(1),
        )
        .unwrap();

        assert_eq!(verify(&token, &key).unwrap().role, None);
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let token = issue(
            claims(),
            &secret("first-secret-first-secret-first-secret"),
            Duration::hours(1),
        )
        .unwrap();

        let result = verify(&token, &secret("second-secret-second-secret-second-sec"));
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_other_hmac_algorithm_is_bad_signature() {
        let key = secret("test-secret-key-for-testing-only-32chars");
        let mut body = claims();
        body.exp = (Utc::now() + Duration::hours(1)).timestamp();

        let token = encode(
            &Header::new(Algorithm::HS384),
            &body,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify(&token, &key), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_alg_none_is_bad_signature() {
        let key = secret("test-secret-key-for-testing-only-32chars");
        let mut body = claims();
        body.exp = (Utc::now() + Duration::hours(1)).timestamp();

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&body).unwrap());
        let token = format!("{}.{}.", header, payload);

        assert_eq!(verify(&token, &key), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let key = secret("test-secret-key-for-testing-only-32chars");

        assert_eq!(verify("not-a-token", &key), Err(TokenError::Malformed));
        assert_eq!(verify("a.b.c", &key), Err(TokenError::Malformed));
        assert_eq!(verify("", &key), Err(TokenError::Malformed));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let key = secret("test-secret-key-for-testing-only-32chars");
        let token = issue(claims(), &key, Duration::seconds(-5)).unwrap();

        assert_eq!(verify(&token, &key), Err(TokenError::Expired));
    }

    #[test]
    fn test_signer_uses_its_ttl() {
        let signer = TokenSigner::new(
            secret("test-secret-key-for-testing-only-32chars"),
            Duration::hours(24),
        );

        let token = signer.issue(claims()).unwrap();
        let verified = signer.verify(&token).unwrap();

        assert_eq!(verified.exp - verified.iat, 24 * 3600);
    }
}
