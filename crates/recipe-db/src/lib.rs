//! # recipe-db
//!
//! MySQL store layer for the recipe catalog.
//!
//! This crate provides:
//! - Connection pool management and `DB_*` URL assembly
//! - The filter query builder that merges a diet preset with caller filters
//!   into one parameterized statement
//! - Row hydration for the JSON-encoded ingredient and instruction lists
//! - [`MySqlRecipeRepository`], the `RecipeStore` used in production
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use recipe_db::{Database, RecipeCatalog, RecipeQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("mysql://localhost/recipes").await?;
//!     let catalog = RecipeCatalog::with_builtin_presets(Arc::new(db.recipes.clone()));
//!
//!     let query = RecipeQuery::from_query_string("diet=vegan&include_ingredients=tofu", 100);
//!     let outcome = catalog.search(&query).await?;
//!     println!("{} recipes", outcome.results.count);
//!     Ok(())
//! }
//! ```
pub mod filter_query;
pub mod hydrate;
pub mod pool;
pub mod recipes;

// Re-export core types
pub use recipe_core::*;

pub use filter_query::{compose, ComposedQuery, QueryParam, RecipeFilterQueryBuilder};
pub use hydrate::{hydrate_rows, RecipeRow};
pub use pool::{
    create_pool, create_pool_with_config, database_url_from_env, log_pool_metrics,
    ConnectionSettings, PoolConfig,
};
pub use recipes::MySqlRecipeRepository;

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::MySqlPool,
    /// Recipe repository.
    pub recipes: MySqlRecipeRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::MySqlPool) -> Self {
        Self {
            recipes: MySqlRecipeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::MySqlPool {
        &self.pool
    }
}
