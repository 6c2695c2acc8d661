//! Catalog service shared by every request surface.
//!
//! REST, JSON-RPC and chat handlers all call into [`RecipeCatalog`], so preset
//! resolution, the preset/caller merge hand-off and the row-cap check happen
//! in exactly one place.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::adapters::RecipeQuery;
use crate::error::Result;
use crate::models::{Recipe, SearchResults};
use crate::presets::{DietPreset, DietPresetTable};
use crate::traits::RecipeStore;

/// Outcome of a catalog search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: SearchResults,
    /// The preset that was applied, when the request named a known one.
    pub preset: Option<DietPreset>,
}

/// Read-only recipe catalog over an injected store and preset table.
#[derive(Clone)]
pub struct RecipeCatalog {
    store: Arc<dyn RecipeStore>,
    presets: Arc<DietPresetTable>,
}

impl RecipeCatalog {
    pub fn new(store: Arc<dyn RecipeStore>, presets: Arc<DietPresetTable>) -> Self {
        Self { store, presets }
    }

    /// Catalog over the built-in preset table.
    pub fn with_builtin_presets(store: Arc<dyn RecipeStore>) -> Self {
        Self::new(store, Arc::new(DietPresetTable::builtin()))
    }

    pub fn presets(&self) -> &DietPresetTable {
        &self.presets
    }

    /// Resolve a preset key. Unknown or absent keys resolve to `None`.
    pub fn resolve_preset(&self, key: Option<&str>) -> Option<&DietPreset> {
        let key = key?;
        let preset = self.presets.lookup(key);
        if preset.is_none() {
            debug!(preset = key, "Unknown diet preset ignored");
        }
        preset
    }

    /// Run a search. Never returns more than `query.filter.row_limit` recipes.
    pub async fn search(&self, query: &RecipeQuery) -> Result<SearchOutcome> {
        let start = Instant::now();
        let preset = self.resolve_preset(query.diet.as_deref());
        let limit = query.filter.row_limit as usize;

        let mut recipes = self.store.search(preset, &query.filter).await?;
        if recipes.len() > limit {
            warn!(
                subsystem = "catalog",
                returned = recipes.len(),
                row_limit = limit,
                "Store returned more rows than requested, truncating"
            );
            recipes.truncate(limit);
        }

        let results = SearchResults::new(recipes);
        info!(
            subsystem = "catalog",
            op = "search",
            preset = preset.map(|p| p.key).unwrap_or(""),
            result_count = results.count,
            row_limit = limit,
            duration_ms = start.elapsed().as_millis() as u64,
            "Recipe search complete"
        );

        Ok(SearchOutcome {
            results,
            preset: preset.cloned(),
        })
    }

    /// Fetch one recipe. Missing ids yield `Error::RecipeNotFound`.
    pub async fn get(&self, id: i64) -> Result<Recipe> {
        let recipe = self.store.fetch(id).await?;
        debug!(subsystem = "catalog", op = "fetch", recipe_id = id, "Recipe fetched");
        Ok(recipe)
    }

    /// The full preset table, for listing.
    pub fn diet_plans(&self) -> &DietPresetTable {
        &self.presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::TOOL_SEARCH_LIMIT;
    use crate::error::Error;
    use crate::filter::FilterSpec;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {id}"),
            description: String::new(),
            image: String::new(),
            prep_time_minutes: None,
            cook_time_minutes: None,
            total_time_minutes: None,
            servings: None,
            rating: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            calories: None,
            protein: None,
            fat: None,
            carbs: None,
            fiber: None,
            sodium: None,
        }
    }

    /// Ignores the row cap so truncation can be observed.
    #[derive(Default)]
    struct GreedyStore {
        rows: usize,
        seen_presets: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl RecipeStore for GreedyStore {
        async fn search(
            &self,
            preset: Option<&DietPreset>,
            _filter: &FilterSpec,
        ) -> Result<Vec<Recipe>> {
            self.seen_presets
                .lock()
                .unwrap()
                .push(preset.map(|p| p.key.to_string()));
            Ok((1..=self.rows as i64).map(recipe).collect())
        }

        async fn fetch(&self, id: i64) -> Result<Recipe> {
            if id == 1 {
                Ok(recipe(1))
            } else {
                Err(Error::RecipeNotFound(id))
            }
        }
    }

    #[tokio::test]
    async fn test_search_truncates_to_row_limit() {
        let store = Arc::new(GreedyStore {
            rows: 50,
            ..Default::default()
        });
        let catalog = RecipeCatalog::with_builtin_presets(store);
        let query = RecipeQuery::new(FilterSpec::new(TOOL_SEARCH_LIMIT));
        let outcome = catalog.search(&query).await.unwrap();
        assert_eq!(outcome.results.count, TOOL_SEARCH_LIMIT as usize);
        assert_eq!(outcome.results.recipes.len(), outcome.results.count);
    }

    #[tokio::test]
    async fn test_search_resolves_known_preset_only() {
        let store = Arc::new(GreedyStore::default());
        let catalog = RecipeCatalog::with_builtin_presets(store.clone());

        let known = catalog
            .search(&RecipeQuery::default().with_diet("vegan"))
            .await
            .unwrap();
        assert_eq!(known.preset.map(|p| p.key), Some("vegan"));

        let unknown = catalog
            .search(&RecipeQuery::default().with_diet("carnivore"))
            .await
            .unwrap();
        assert!(unknown.preset.is_none());

        let seen = store.seen_presets.lock().unwrap().clone();
        assert_eq!(seen, vec![Some("vegan".to_string()), None]);
    }

    #[tokio::test]
    async fn test_get_missing_recipe_is_not_found() {
        let catalog = RecipeCatalog::with_builtin_presets(Arc::new(GreedyStore::default()));
        assert_eq!(catalog.get(1).await.unwrap().id, 1);
        let err = catalog.get(999999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_diet_plans_lists_builtin_table() {
        let catalog = RecipeCatalog::with_builtin_presets(Arc::new(GreedyStore::default()));
        assert_eq!(catalog.diet_plans().len(), 10);
    }
}
