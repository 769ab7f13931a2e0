use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::favorites::dto::{FavoriteRequest, MessageResponse};
use crate::state::AppState;
use crate::store::Recipe;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/:recipe_id", delete(remove_favorite))
}

/// Returns the favorite recipes themselves, resolved through the recipes
/// collection. Favorites whose recipe no longer resolves are dropped.
#[instrument(skip(state, user))]
pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipe_ids = state.store.list_favorite_recipe_ids(user.id).await?;
    let recipes = state.store.find_recipes_by_ids(&recipe_ids).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state, user, payload))]
pub async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<FavoriteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state
        .store
        .favorite_exists(user.id, payload.recipe_id)
        .await?
    {
        return Ok(Json(MessageResponse {
            message: "Already in favorites",
        }));
    }

    state
        .store
        .insert_favorite(user.id, payload.recipe_id)
        .await?;

    info!(user_id = %user.id, recipe_id = %payload.recipe_id, "favorite added");
    Ok(Json(MessageResponse {
        message: "Added to favorites",
    }))
}

#[instrument(skip(state, user))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    // An id that does not parse can match nothing.
    let recipe_id = Uuid::parse_str(&recipe_id).map_err(|_| ApiError::NotFound("Favorite"))?;
    if !state.store.delete_favorite(user.id, recipe_id).await? {
        return Err(ApiError::NotFound("Favorite"));
    }

    info!(user_id = %user.id, recipe_id = %recipe_id, "favorite removed");
    Ok(Json(MessageResponse {
        message: "Removed from favorites",
    }))
}
