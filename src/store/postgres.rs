use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CatalogStore, NewRecipe, NewUser, Recipe, User, FIND_LIMIT};

const RECIPE_COLUMNS: &str =
    "id, name, category, ingredients, steps, cooking_time, difficulty, image, created_by, created_at";

/// Postgres-backed catalog store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Wrap user input in `%...%` with LIKE metacharacters escaped, so the
/// query only ever matches literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_recipes(&self, category: Option<&str>) -> anyhow::Result<Vec<Recipe>> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, Recipe>(&format!(
                    r#"
                    SELECT {RECIPE_COLUMNS}
                    FROM recipes
                    WHERE category = $1
                    ORDER BY created_at DESC NULLS LAST
                    LIMIT $2
                    "#,
                ))
                .bind(category)
                .bind(FIND_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Recipe>(&format!(
                    r#"
                    SELECT {RECIPE_COLUMNS}
                    FROM recipes
                    ORDER BY created_at DESC NULLS LAST
                    LIMIT $1
                    "#,
                ))
                .bind(FIND_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn search_recipes(&self, query: &str) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE name ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(ingredients) AS ing WHERE ing ILIKE $1)
            ORDER BY created_at DESC NULLS LAST
            LIMIT $2
            "#,
        ))
        .bind(like_pattern(query))
        .bind(FIND_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_recipe(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(recipe)
    }

    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes
            WHERE id = ANY($1)
            ORDER BY created_at DESC NULLS LAST
            "#,
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes (name, category, ingredients, steps, cooking_time, difficulty, image, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {RECIPE_COLUMNS}
            "#,
        ))
        .bind(&recipe.name)
        .bind(&recipe.category)
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .bind(&recipe.cooking_time)
        .bind(&recipe.difficulty)
        .bind(&recipe.image)
        .bind(recipe.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(recipe)
    }

    async fn favorite_exists(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            SELECT 1
            FROM favorites
            WHERE user_id = $1 AND recipe_id = $2
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn list_favorite_recipe_ids(&self, user_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        let rows = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT recipe_id
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(FIND_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn insert_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, recipe_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE user_id = $1 AND recipe_id = $2
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("chicken"), "%chicken%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
