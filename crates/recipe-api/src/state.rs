//! Shared handler state.

use std::sync::Arc;

use recipe_core::{QueryTranslator, RecipeCatalog};

/// State cloned into every handler.
///
/// The catalog owns the read-only preset table and the pooled store; the
/// translator is optional because the chat surface is the only consumer.
#[derive(Clone)]
pub struct AppState {
    pub catalog: RecipeCatalog,
    pub translator: Option<Arc<dyn QueryTranslator>>,
}

impl AppState {
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self {
            catalog,
            translator: None,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn QueryTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }
}
