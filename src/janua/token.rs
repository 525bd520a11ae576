use crate::janua::store::UserRecord;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;

/// Payload of the access token: `sub` carries the user id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies access tokens (HS256) with a process-wide secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL_SECONDS)
    }

    #[must_use]
    pub fn with_ttl(secret: &SecretString, ttl_seconds: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_seconds,
        }
    }

    pub fn sign(&self, user: &UserRecord) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            iat,
            exp: iat + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding).context("failed to sign access token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("invalid access token")?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            username: "johndoe".to_string(),
            password_hash: "$2b$04$notarealhash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sign_then_verify() -> Result<()> {
        let signer = TokenSigner::new(&SecretString::from("sup3r-secret"));
        let user = user();

        let token = signer.sign(&user)?;
        assert!(!token.is_empty());

        let claims = signer.verify(&token)?;
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "johndoe");
        assert!(claims.exp > claims.iat);

        Ok(())
    }

    #[test]
    fn test_wrong_secret_rejected() -> Result<()> {
        let signer = TokenSigner::new(&SecretString::from("sup3r-secret"));
        let other = TokenSigner::new(&SecretString::from("other-secret"));

        let token = signer.sign(&user())?;
        assert!(other.verify(&token).is_err());

        Ok(())
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = TokenSigner::new(&SecretString::from("sup3r-secret"));
        assert!(signer.verify("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() -> Result<()> {
        let secret = SecretString::from("sup3r-secret");
        let signer = TokenSigner::with_ttl(&secret, -120);

        let token = signer.sign(&user())?;
        assert!(TokenSigner::new(&secret).verify(&token).is_err());

        Ok(())
    }
}
