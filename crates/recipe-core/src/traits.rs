//! Core traits for the catalog's external collaborators.
//!
//! The relational store and the natural-language translator sit behind these
//! traits so the catalog, the adapters and every request surface can be
//! exercised against in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::models::Recipe;
use crate::presets::DietPreset;

// =============================================================================
// STORE TRAITS
// =============================================================================

/// Read-only access to the recipe table.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Run a filtered search. Preset constraints apply ahead of `filter`;
    /// at most `filter.row_limit` recipes are returned.
    async fn search(&self, preset: Option<&DietPreset>, filter: &FilterSpec)
        -> Result<Vec<Recipe>>;

    /// Fetch one recipe. Missing rows yield `Error::RecipeNotFound`.
    async fn fetch(&self, id: i64) -> Result<Recipe>;
}

// =============================================================================
// TRANSLATOR TRAITS
// =============================================================================

/// Turns a free-text request into a recipe-search query string such as
/// `diet=keto&max_calories=500`.
///
/// Implementations own their timeout; failures surface as
/// `Error::Translator` and are never retried by callers.
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
