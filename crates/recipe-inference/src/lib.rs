//! # recipe-inference
//!
//! Natural-language front end for the recipe catalog.
//!
//! This crate provides:
//! - An OpenAI-compatible [`QueryTranslator`] (feature `openai`, default)
//! - The system prompt that teaches the model the search vocabulary
//! - A scripted mock translator (feature `mock`, and in tests)
//!
//! The translator only produces a query string; parsing and validation stay
//! in `recipe_core::adapters`, so translated requests obey the same rules as
//! every other surface.
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_core::{translate_query, DietPresetTable, TOOL_SEARCH_LIMIT};
//! use recipe_inference::OpenAITranslator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let presets = DietPresetTable::builtin();
//!     let translator = OpenAITranslator::from_env(&presets).unwrap();
//!     let translated = translate_query(&translator, "low carb chicken", TOOL_SEARCH_LIMIT)
//!         .await
//!         .unwrap();
//!     println!("{}", translated.query_string);
//! }
//! ```

pub mod prompt;

#[cfg(feature = "openai")]
pub mod openai;

// Mock translator for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use recipe_core::*;

#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAITranslator};

pub use prompt::system_prompt;
