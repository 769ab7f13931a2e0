use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub recipe_id: Uuid,
}

/// Outcome message for favorite mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
