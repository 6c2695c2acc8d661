//! Mock query translator for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recipe_core::QueryTranslator;
//! use recipe_inference::mock::MockTranslator;
//!
//! #[tokio::test]
//! async fn test_with_mock_translator() {
//!     let translator = MockTranslator::new()
//!         .with_fixed_response("diet=vegan")
//!         .with_response_mapping("keto breakfast", "diet=keto&search=breakfast");
//!
//!     assert_eq!(translator.translate("anything").await.unwrap(), "diet=vegan");
//!     assert_eq!(translator.call_count(), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use recipe_core::{Error, QueryTranslator, Result};

/// Scripted translator for tests.
#[derive(Clone)]
pub struct MockTranslator {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    responses: HashMap<String, String>,
    default_response: String,
    failure: Option<String>,
    latency_ms: u64,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Response for any input without a mapping.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Response for one exact input.
    pub fn with_response_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .insert(input.into(), output.into());
        self
    }

    /// Fail every call with `Error::Translator(message)`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Set simulated latency for every call.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Inputs received so far.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().map(|log| log.len()).unwrap_or_default()
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTranslator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(text.to_string());
        }
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
        if let Some(message) = &self.config.failure {
            return Err(Error::Translator(message.clone()));
        }
        Ok(self
            .config
            .responses
            .get(text)
            .unwrap_or(&self.config.default_response)
            .clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
