use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CatalogStore, NewRecipe, NewUser, Recipe, User, FIND_LIMIT};

/// In-memory store for tests. Insertion order is preserved, and the row
/// counters let tests assert side effects directly.
#[derive(Default)]
pub struct MemStore {
    users: Mutex<Vec<User>>,
    recipes: Mutex<Vec<Recipe>>,
    favorites: Mutex<Vec<(Uuid, Uuid)>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn recipe_count(&self) -> usize {
        self.recipes.lock().await.len()
    }

    pub async fn favorite_count(&self) -> usize {
        self.favorites.lock().await.len()
    }
}

#[async_trait]
impl CatalogStore for MemStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.lock().await.push(user.clone());
        Ok(user)
    }

    async fn list_recipes(&self, category: Option<&str>) -> anyhow::Result<Vec<Recipe>> {
        let recipes = self.recipes.lock().await;
        Ok(recipes
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .take(FIND_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn search_recipes(&self, query: &str) -> anyhow::Result<Vec<Recipe>> {
        let needle = query.to_lowercase();
        let recipes = self.recipes.lock().await;
        Ok(recipes
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.ingredients.iter().any(|i| i.to_lowercase().contains(&needle))
            })
            .take(FIND_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn find_recipe(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipes = self.recipes.lock().await;
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        let recipes = self.recipes.lock().await;
        Ok(recipes.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: recipe.name,
            category: recipe.category,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty,
            image: recipe.image,
            created_by: Some(recipe.created_by),
            created_at: Some(OffsetDateTime::now_utc()),
        };
        self.recipes.lock().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn favorite_exists(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let favorites = self.favorites.lock().await;
        Ok(favorites.contains(&(user_id, recipe_id)))
    }

    async fn list_favorite_recipe_ids(&self, user_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        let favorites = self.favorites.lock().await;
        Ok(favorites
            .iter()
            .filter(|&&(u, _)| u == user_id)
            .map(|&(_, r)| r)
            .take(FIND_LIMIT as usize)
            .collect())
    }

    async fn insert_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<()> {
        self.favorites.lock().await.push((user_id, recipe_id));
        Ok(())
    }

    async fn delete_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let mut favorites = self.favorites.lock().await;
        let before = favorites.len();
        favorites.retain(|&(u, r)| !(u == user_id && r == recipe_id));
        Ok(favorites.len() < before)
    }
}
