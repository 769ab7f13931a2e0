use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Read cap for list-style queries.
pub(crate) const FIND_LIMIT: i64 = 1000;

/// User record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // never exposed in JSON
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields the caller supplies when creating a user. The store generates
/// the identifier and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Recipe record as stored and as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cooking_time: String,
    pub difficulty: String,
    pub image: String,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Fields the caller supplies when creating a recipe.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cooking_time: String,
    pub difficulty: String,
    pub image: String,
    pub created_by: Uuid,
}

/// Collection-style access to users, recipes and favorites.
///
/// Every operation is independent; there are no transactions across
/// calls. Uniqueness checks done before an insert can therefore race,
/// which the schema-level constraints backstop.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User>;

    /// List recipes, optionally restricted to one category.
    async fn list_recipes(&self, category: Option<&str>) -> anyhow::Result<Vec<Recipe>>;
    /// Case-insensitive substring match on recipe name or any ingredient.
    async fn search_recipes(&self, query: &str) -> anyhow::Result<Vec<Recipe>>;
    async fn find_recipe(&self, id: Uuid) -> anyhow::Result<Option<Recipe>>;
    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>>;
    async fn insert_recipe(&self, recipe: NewRecipe) -> anyhow::Result<Recipe>;

    async fn favorite_exists(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool>;
    async fn list_favorite_recipe_ids(&self, user_id: Uuid) -> anyhow::Result<Vec<Uuid>>;
    async fn insert_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<()>;
    /// Returns false when there was nothing to delete.
    async fn delete_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool>;
}
