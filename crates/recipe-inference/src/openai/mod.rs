//! OpenAI-compatible query translator.
//!
//! Works with any endpoint that speaks the chat completions API, including:
//!
//! - OpenAI cloud API
//! - Azure OpenAI
//! - Ollama (in OpenAI compatibility mode)
//! - vLLM, LocalAI, LM Studio
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_core::{DietPresetTable, QueryTranslator};
//! use recipe_inference::openai::{OpenAIConfig, OpenAITranslator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let presets = DietPresetTable::builtin();
//!
//!     // From environment variables
//!     let translator = OpenAITranslator::from_env(&presets).unwrap();
//!
//!     // Or against a local Ollama
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(),
//!         api_key: None,
//!         gen_model: "llama3".to_string(),
//!         timeout_seconds: 30,
//!     };
//!     let translator = OpenAITranslator::new(config, &presets).unwrap();
//!
//!     let query = translator.translate("quick vegan dinner under 500 calories").await.unwrap();
//!     println!("{query}");
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    OpenAIConfig, OpenAITranslator, DEFAULT_GEN_MODEL, DEFAULT_OPENAI_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::{to_translator_error, OpenAIErrorCode};
pub use types::*;
