use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// JWT payload: the user id (hex) and email, plus the standard timestamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: &ObjectId, email: String, expiry_hours: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours)).timestamp();

        Self {
            sub: user_id.to_hex(),
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token secret is not configured")]
    MissingSecret,
}

/// Sign claims with the server secret (HS256).
pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    Ok(encode(&header, claims, &encoding_key)?)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims)
}

/// Hash a password with a randomized per-user salt at the given cost factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Compare a plain password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Authenticated user context, decoded from a verified bearer token.
///
/// Token-gated handlers take this as a parameter; public handlers simply have
/// no identity parameter. Extraction fails with 401 when the token is absent,
/// malformed, expired, or fails signature verification.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: ObjectId,
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| "Invalid user id in token".to_string())?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_from_headers(&parts.headers).map_err(ApiError::unauthorized)?;

        let claims = validate_jwt(&token, &state.config.security.token_secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        AuthUser::try_from(claims).map_err(ApiError::unauthorized)
    }
}

/// Extract JWT token from the Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
