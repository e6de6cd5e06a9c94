use axum::{
    extract::{Path, State},
    Json,
};
use bson::oid::ObjectId;

use crate::auth::AuthUser;
use crate::db::models::UserResponse;
use crate::error::ApiError;
use crate::AppState;

/// GET /user - the authenticated user's own record
pub async fn get_self(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .db
        .users()
        .find_by_id(&auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(Json(user.into()))
}

/// PUT /user/restaurants - add restaurant ids to the favorites set.
/// Duplicates collapse, so the operation is idempotent.
pub async fn add_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(restaurant_ids): Json<Vec<String>>,
) -> Result<Json<UserResponse>, ApiError> {
    let ids = restaurant_ids
        .iter()
        .map(|id| ObjectId::parse_str(id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ApiError::bad_request("Input should be an array of restaurant ids."))?;

    let user = state
        .db
        .users()
        .add_favorites(&auth.user_id, &ids)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(Json(user.into()))
}

/// DELETE /user/restaurants/:id - remove one id from the favorites set.
/// Removing an id that is not present is a no-op, not an error.
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(restaurant_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let restaurant_id = ObjectId::parse_str(&restaurant_id)
        .map_err(|_| ApiError::bad_request("Invalid restaurant id."))?;

    let user = state
        .db
        .users()
        .remove_favorite(&auth.user_id, &restaurant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(Json(user.into()))
}
