use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// JWT Claims - data stored in the token
///
/// The auth collaborator issues tokens carrying the principal's stable id,
/// email, and whatever OAuth profile metadata it saw at sign-in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (user id as string)
    pub user_id: Uuid, // User UUID (assigned by the auth collaborator)
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub exp: i64,    // Expiration timestamp
    pub iat: i64,    // Issued at timestamp
    pub iss: String, // Issuer
    pub jti: String, // JWT ID (unique token identifier)
}

/// An authenticated principal, extracted from verified claims.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub id: UserId,
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub full_name: Option<String>,
}

impl From<Claims> for AuthPrincipal {
    fn from(claims: Claims) -> Self {
        Self {
            id: UserId::from_uuid(claims.user_id),
            email: claims.email,
            given_name: claims.given_name,
            family_name: claims.family_name,
            full_name: claims.full_name,
        }
    }
}

/// JWT Service - verifies tokens from the auth collaborator.
///
/// Token creation exists for the test harness and local development; in
/// production the collaborator signs with the same shared secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a new JWT token for a principal
    ///
    /// Token expires after 24 hours
    pub fn create_token(
        &self,
        user_id: Uuid,
        email: String,
        given_name: Option<String>,
        family_name: Option<String>,
        full_name: Option<String>,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(24);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email,
            given_name,
            family_name,
            full_name,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
