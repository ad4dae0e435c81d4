use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::ZeroizeOnDrop;

pub mod password;

pub use password::{hash_password, verify_password, PasswordError};

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm tokens are signed with
pub const ALGORITHM: &str = "HS256";

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Signing key must not be empty")]
    EmptyKey,
    #[error("Malformed token")]
    Malformed,
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// HMAC secret that zeroes itself when dropped
#[derive(Clone, ZeroizeOnDrop)]
pub struct SigningKey {
    key: Vec<u8>,
}

impl SigningKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let key = secret.as_ref().to_vec();
        if key.is_empty() {
            return Err(TokenError::EmptyKey);
        }
        Ok(Self { key })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        <HmacSha256 as Mac>::new_from_slice(&self.key).map_err(|_| TokenError::EmptyKey)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Access token payload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub user_type: String,
    /// Token id, recorded on logout to revoke the token
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issues and verifies compact HS256 JWTs
#[derive(Clone, Debug)]
pub struct TokenSigner {
    key: SigningKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(key: SigningKey, ttl: Duration) -> Self {
        Self { key, ttl }
    }

    pub fn issue(&self, user_id: Uuid, user_type: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, user_type, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        user_type: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            sub: user_id,
            user_type: user_type.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };

        let signing_input = format!(
            "{}.{}",
            general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );

        let mut mac = self.key.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{}.{}", signing_input, signature),
            claims,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature first, then algorithm and expiry
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (header_b64, claims_b64, signature_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(TokenError::Malformed),
            };

        let signature = general_purpose::URL_SAFE_NO_PAD.decode(signature_b64)?;
        let mut mac = self.key.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let header: Header =
            serde_json::from_slice(&general_purpose::URL_SAFE_NO_PAD.decode(header_b64)?)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let claims: Claims =
            serde_json::from_slice(&general_purpose::URL_SAFE_NO_PAD.decode(claims_b64)?)?;
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> TokenSigner {
        TokenSigner::new(SigningKey::new(secret).unwrap(), Duration::minutes(30))
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer("test-secret");
        let user_id = Uuid::new_v4();

        let issued = signer.issue(user_id, "tenant").unwrap();
        let claims = signer.verify(&issued.token).unwrap();

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.user_type, "tenant");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_wrong_key_fails() {
        let issued = signer("key-one").issue(Uuid::new_v4(), "landlord").unwrap();

        assert!(matches!(
            signer("key-two").verify(&issued.token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let signer = signer("test-secret");
        let issued_at = Utc::now() - Duration::hours(1);
        let issued = signer.issue_at(Uuid::new_v4(), "tenant", issued_at).unwrap();

        assert!(matches!(
            signer.verify(&issued.token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_tampered_claims() {
        let signer = signer("test-secret");
        let issued = signer.issue(Uuid::new_v4(), "tenant").unwrap();

        let mut forged = issued.claims.clone();
        forged.user_type = "admin".to_string();
        let forged_b64 =
            general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        let parts: Vec<&str> = issued.token.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_b64, parts[2]);

        assert!(matches!(
            signer.verify(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_token() {
        let signer = signer("test-secret");
        assert!(matches!(signer.verify("abc"), Err(TokenError::Malformed)));
        assert!(matches!(signer.verify("a.b.c.d"), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(SigningKey::new(""), Err(TokenError::EmptyKey)));
    }
}
