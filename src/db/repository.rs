use bson::{doc, oid::ObjectId, Document};
use chrono::{SecondsFormat, Utc};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};

use super::models::{CuisineType, Neighborhood, Restaurant, User};

type Result<T> = mongodb::error::Result<T>;

#[derive(Clone)]
pub struct MongoContext {
    db: Database,
}

impl MongoContext {
    pub fn new(client: Client, database_name: &str) -> Self {
        Self {
            db: client.database(database_name),
        }
    }

    pub fn users(&self) -> UserRepository {
        UserRepository {
            collection: self.db.collection("users"),
        }
    }

    pub fn restaurants(&self) -> RestaurantRepository {
        RestaurantRepository {
            collection: self.db.collection("restaurants"),
        }
    }

    /// Round-trip to the server, used by the health endpoint and at startup.
    pub async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub async fn init_indexes(&self) -> Result<()> {
        // Signup relies on email uniqueness
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.db
            .collection::<User>("users")
            .create_index(email_index)
            .await?;

        tracing::info!("Database indexes created successfully");
        Ok(())
    }
}

/// Equality filter over restaurant listings; absent keys are unconstrained.
pub fn restaurant_filter(
    neighborhood: Option<Neighborhood>,
    cuisine_type: Option<CuisineType>,
) -> Document {
    let mut query = Document::new();
    if let Some(n) = neighborhood {
        query.insert("neighborhood", n.as_str());
    }
    if let Some(c) = cuisine_type {
        query.insert("cuisineType", c.as_str());
    }
    query
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.collection.find_one(doc! { "email": email }).await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    /// Set-add restaurant ids to the favorites array. `$addToSet` collapses
    /// duplicates and is atomic on the single user document, so concurrent
    /// favorite edits by the same user cannot lose updates.
    pub async fn add_favorites(
        &self,
        id: &ObjectId,
        restaurant_ids: &[ObjectId],
    ) -> Result<Option<User>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "favoriteRestaurants": { "$each": restaurant_ids.to_vec() } },
                    "$set": { "updatedAt": now_timestamp() },
                },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Remove a single id from the favorites array; a no-op if absent.
    pub async fn remove_favorite(
        &self,
        id: &ObjectId,
        restaurant_id: &ObjectId,
    ) -> Result<Option<User>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$pull": { "favoriteRestaurants": restaurant_id },
                    "$set": { "updatedAt": now_timestamp() },
                },
            )
            .return_document(ReturnDocument::After)
            .await
    }
}

#[derive(Clone)]
pub struct RestaurantRepository {
    collection: Collection<Restaurant>,
}

impl RestaurantRepository {
    pub async fn insert_many(&self, restaurants: &[Restaurant]) -> Result<()> {
        self.collection.insert_many(restaurants).await?;
        Ok(())
    }

    pub async fn find(&self, filter: Document) -> Result<Vec<Restaurant>> {
        let cursor = self.collection.find(filter).await?;
        cursor.try_collect().await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Restaurant>> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    /// Partial merge patch, returning the post-update record.
    pub async fn update(&self, id: &ObjectId, patch: Document) -> Result<Option<Restaurant>> {
        if patch.is_empty() {
            // "$set": {} is rejected by the server
            return self.find_by_id(id).await;
        }

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch })
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<Option<Restaurant>> {
        self.collection.find_one_and_delete(doc! { "_id": id }).await
    }
}
