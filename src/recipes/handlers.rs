use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::recipes::dto::{CreateRecipeRequest, ListParams, SearchParams};
use crate::state::AppState;
use crate::store::{NewRecipe, Recipe};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/search", get(search_recipes))
        .route("/recipes/:id", get(get_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    // An empty category filter is no filter.
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let recipes = state.store.list_recipes(category).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.store.search_recipes(&params.q).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    // An id that does not parse can match nothing.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("Recipe"))?;
    match state.store.find_recipe(id).await? {
        Some(recipe) => Ok(Json(recipe)),
        None => Err(ApiError::NotFound("Recipe")),
    }
}

#[instrument(skip(state, user, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state
        .store
        .insert_recipe(NewRecipe {
            name: payload.name,
            category: payload.category,
            ingredients: payload.ingredients,
            steps: payload.steps,
            cooking_time: payload.cooking_time,
            difficulty: payload.difficulty,
            image: payload.image,
            created_by: user.id,
        })
        .await?;

    info!(recipe_id = %recipe.id, user_id = %user.id, "recipe created");
    Ok(Json(recipe))
}
