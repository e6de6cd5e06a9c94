use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, hash_password, verify_password, AuthUser, Claims};
use crate::db::models::User;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// POST /auth/signup - create a new user with a hashed password
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.email.is_empty() || body.password.is_empty() || body.name.is_empty() {
        return Err(ApiError::bad_request("Provide email, password and name"));
    }

    let users = state.db.users();

    if users.find_by_email(&body.email).await?.is_some() {
        return Err(ApiError::bad_request("User already exists."));
    }

    let password_hash = hash_password(&body.password, state.config.security.bcrypt_cost)?;
    let user = User::new(body.name, body.email, password_hash);
    users.insert(&user).await?;

    // The response carries the new identity, never the hash
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": {
                "_id": user.id.map(|id| id.to_hex()).unwrap_or_default(),
                "name": user.name,
                "email": user.email,
            }
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and return a signed JWT
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Provide email and password."));
    }

    let found = state.db.users().find_by_email(&body.email).await?;

    let user = match found {
        Some(user) => user,
        None => return Err(ApiError::unauthorized("User not found.")),
    };

    if !verify_password(&body.password, &user.password)? {
        return Err(ApiError::unauthorized("Unable to authenticate the user"));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal_server_error("Stored user has no id"))?;

    let claims = Claims::new(
        &user_id,
        user.email.clone(),
        state.config.security.token_expiry_hours,
    );
    let auth_token = generate_jwt(&claims, &state.config.security.token_secret)?;

    Ok(Json(json!({
        "authToken": auth_token,
        "user": {
            "_id": user_id.to_hex(),
            "email": user.email,
        }
    })))
}

/// GET /auth/verify - echo the authenticated token payload
pub async fn verify(auth: AuthUser) -> Json<Value> {
    Json(json!({
        "_id": auth.user_id.to_hex(),
        "email": auth.email,
    }))
}
