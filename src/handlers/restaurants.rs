use axum::{
    extract::{Path, Query, State},
    Json,
};
use bson::{oid::ObjectId, Document};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::db::models::{CuisineType, Neighborhood, Restaurant, RestaurantInput, RestaurantResponse};
use crate::db::repository::restaurant_filter;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub neighborhood: Option<Neighborhood>,
    pub cuisine_type: Option<CuisineType>,
}

/// GET /api/restaurants - list restaurants, optionally filtered by
/// neighborhood and cuisine type (exact match, ANDed)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let filter = restaurant_filter(query.neighborhood, query.cuisine_type);
    let restaurants = state.db.restaurants().find(filter).await?;

    Ok(Json(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// GET /api/restaurants/:id - restaurant details by id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let id = parse_restaurant_id(&id)?;

    let restaurant = state
        .db
        .restaurants()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found."))?;

    Ok(Json(restaurant.into()))
}

#[derive(Debug, Deserialize)]
pub struct CreateRestaurantsRequest {
    pub restaurants: Value,
}

/// POST /api/restaurants - bulk create, stamping the authenticated user as
/// the owner of every record
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateRestaurantsRequest>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    if !body.restaurants.is_array() {
        return Err(ApiError::bad_request(
            "Input should be an array of restaurants.",
        ));
    }

    let inputs: Vec<RestaurantInput> = serde_json::from_value(body.restaurants)
        .map_err(|e| ApiError::bad_request(format!("Invalid restaurant payload: {}", e)))?;

    let records: Vec<Restaurant> = inputs
        .into_iter()
        .map(|input| Restaurant::from_input(input, auth.user_id))
        .collect();

    if !records.is_empty() {
        state.db.restaurants().insert_many(&records).await?;
    }

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// PUT /api/restaurants/:id - partial update, owner only
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let id = parse_restaurant_id(&id)?;
    let repo = state.db.restaurants();

    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found."))?;

    ensure_owner(&existing, &auth.user_id)?;

    let patch = patch_document(patch)?;
    let updated = repo
        .update(&id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found."))?;

    Ok(Json(updated.into()))
}

/// DELETE /api/restaurants/:id - remove a restaurant, owner only
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let id = parse_restaurant_id(&id)?;
    let repo = state.db.restaurants();

    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found."))?;

    ensure_owner(&existing, &auth.user_id)?;

    let deleted = repo
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found."))?;

    Ok(Json(deleted.into()))
}

fn parse_restaurant_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::not_found("Restaurant not found."))
}

/// Write authorization: the stored owner id and the requester id are compared
/// as canonical ObjectIds, so the legitimate owner always passes.
fn ensure_owner(restaurant: &Restaurant, requester: &ObjectId) -> Result<(), ApiError> {
    if restaurant.created_by != *requester {
        return Err(ApiError::forbidden("Forbidden"));
    }
    Ok(())
}

/// Convert a JSON merge patch into a `$set` document, dropping fields a
/// client must not rewrite
fn patch_document(patch: Value) -> Result<Document, ApiError> {
    let mut doc = bson::to_document(&patch)
        .map_err(|_| ApiError::bad_request("Update payload must be a JSON object."))?;

    doc.remove("_id");
    doc.remove("createdBy");
    Ok(doc)
}
