//! # recipe-core
//!
//! Core types, traits, and abstractions for the recipe catalog.
//!
//! This crate provides the filter model every request surface reduces to,
//! the diet preset table, the protocol adapters, and the catalog service
//! that the store and API crates plug into.

pub mod adapters;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logging;
pub mod models;
pub mod presets;
pub mod traits;

// Re-export commonly used types at crate root
pub use adapters::{extract_query_string, translate_query, RecipeQuery, TranslatedQuery};
pub use catalog::{RecipeCatalog, SearchOutcome};
pub use defaults::{DIRECT_SEARCH_LIMIT, TOOL_SEARCH_LIMIT};
pub use error::{Error, ErrorKind, Result};
pub use fields::{NumericField, NumericKind, SortColumn, SortOrder};
pub use filter::{Bound, FilterSpec, RangeBounds};
pub use models::*;
pub use presets::{DietPreset, DietPresetTable};
pub use traits::*;
