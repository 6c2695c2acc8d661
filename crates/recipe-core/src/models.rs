//! Core data models for the recipe catalog.
//!
//! These types are shared across all crates and are what every request
//! surface returns to its caller.

use serde::{Deserialize, Serialize};

// =============================================================================
// RECIPE
// =============================================================================

/// A fully hydrated recipe.
///
/// Nutrition and timing fields are `None` when unknown; `None` never means
/// zero. `ingredients` and `instructions` are always lists, empty when the
/// stored value is missing or undecodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub rating: Option<f64>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

/// Decode a stored JSON string list.
///
/// Missing, blank, or malformed input yields an empty list; this never fails.
pub fn decode_string_list(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => {
            serde_json::from_str::<Option<Vec<String>>>(text)
                .ok()
                .flatten()
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// Outbound shape of every search-like operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub recipes: Vec<Recipe>,
    pub count: usize,
}

impl SearchResults {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let count = recipes.len();
        Self { recipes, count }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}
