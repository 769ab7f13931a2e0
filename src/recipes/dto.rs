use serde::Deserialize;

/// Request body for recipe creation.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cooking_time: String,
    pub difficulty: String,
    pub image: String,
}

/// Query parameters for recipe listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// Query parameters for recipe search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}
