use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User document. Field names are camelCase both in the store and on the
/// wire (`favoriteRestaurants`, `createdAt`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt hash. Never leaves the store layer; API responses go through
    /// [`UserResponse`], which has no password field.
    pub password: String,
    #[serde(default)]
    pub favorite_restaurants: Vec<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Some(ObjectId::new()),
            name,
            email,
            password: password_hash,
            favorite_restaurants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighborhood {
    Queens,
    Manhattan,
    Brooklyn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CuisineType {
    Mexican,
    Asian,
    American,
    Pizza,
}

impl Neighborhood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Neighborhood::Queens => "Queens",
            Neighborhood::Manhattan => "Manhattan",
            Neighborhood::Brooklyn => "Brooklyn",
        }
    }
}

impl CuisineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CuisineType::Mexican => "Mexican",
            CuisineType::Asian => "Asian",
            CuisineType::American => "American",
            CuisineType::Pizza => "Pizza",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub date: String,
    pub rating: f64,
    pub comments: String,
}

/// Restaurant document. `created_by` is the owning user and gates writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub neighborhood: Neighborhood,
    pub cuisine_type: CuisineType,
    pub address: String,
    pub latlng: LatLng,
    pub image: String,
    pub operating_hours: HashMap<String, String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_by: ObjectId,
}

/// Restaurant as submitted by a client: no id, no ownership field. The
/// server stamps both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInput {
    pub name: String,
    pub neighborhood: Neighborhood,
    pub cuisine_type: CuisineType,
    pub address: String,
    pub latlng: LatLng,
    pub image: String,
    pub operating_hours: HashMap<String, String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Restaurant {
    pub fn from_input(input: RestaurantInput, created_by: ObjectId) -> Self {
        Self {
            id: Some(ObjectId::new()),
            name: input.name,
            neighborhood: input.neighborhood,
            cuisine_type: input.cuisine_type,
            address: input.address,
            latlng: input.latlng,
            image: input.image,
            operating_hours: input.operating_hours,
            reviews: input.reviews,
            created_by,
        }
    }
}

/// User shape returned by the API: ObjectIds rendered as hex strings and
/// the password hash omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub favorite_restaurants: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            favorite_restaurants: user
                .favorite_restaurants
                .iter()
                .map(|id| id.to_hex())
                .collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub neighborhood: Neighborhood,
    pub cuisine_type: CuisineType,
    pub address: String,
    pub latlng: LatLng,
    pub image: String,
    pub operating_hours: HashMap<String, String>,
    pub reviews: Vec<Review>,
    pub created_by: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: r.name,
            neighborhood: r.neighborhood,
            cuisine_type: r.cuisine_type,
            address: r.address,
            latlng: r.latlng,
            image: r.image,
            operating_hours: r.operating_hours,
            reviews: r.reviews,
            created_by: r.created_by.to_hex(),
        }
    }
}
