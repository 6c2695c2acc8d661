//! Recipe repository over MySQL.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;
use tracing::{debug, info};

use recipe_core::defaults::RECIPE_TABLE;
use recipe_core::{DietPreset, Error, FilterSpec, Recipe, RecipeStore, Result};

use crate::filter_query::{QueryParam, RecipeFilterQueryBuilder, RECIPE_COLUMNS};
use crate::hydrate::{hydrate_rows, RecipeRow};

/// MySQL implementation of [`RecipeStore`].
#[derive(Clone)]
pub struct MySqlRecipeRepository {
    pool: MySqlPool,
}

impl MySqlRecipeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for MySqlRecipeRepository {
    async fn search(&self, preset: Option<&DietPreset>, filter: &FilterSpec) -> Result<Vec<Recipe>> {
        let start = Instant::now();
        let composed = RecipeFilterQueryBuilder::new(preset, filter).build();
        let sql = composed.sql();

        debug!(
            subsystem = "db",
            component = "composer",
            preset = preset.map(|p| p.key).unwrap_or(""),
            predicate_count = composed.clauses.len(),
            order = %composed.order_clause(),
            row_limit = composed.limit,
            "Composed recipe search"
        );

        let mut q = sqlx::query(&sql);
        for param in &composed.params {
            q = match param {
                QueryParam::Int(val) => q.bind(*val),
                QueryParam::Float(val) => q.bind(*val),
                QueryParam::String(s) => q.bind(s.as_str()),
            };
        }
        q = q.bind(composed.limit); // Final parameter

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;
        let (recipes, skipped) = hydrate_rows(&rows);

        info!(
            subsystem = "db",
            component = "recipes",
            op = "search",
            result_count = recipes.len(),
            skipped_rows = skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Recipe search executed"
        );
        Ok(recipes)
    }

    async fn fetch(&self, id: i64) -> Result<Recipe> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", RECIPE_COLUMNS, RECIPE_TABLE);
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        match row {
            Some(row) => Ok(row.hydrate()),
            None => {
                debug!(subsystem = "db", component = "recipes", recipe_id = id, "Recipe not found");
                Err(Error::RecipeNotFound(id))
            }
        }
    }
}
