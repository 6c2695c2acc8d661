//! Shared fixtures for router tests: an in-memory store and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use recipe_api::{cors_layer, router, AppState};
use recipe_core::{
    DietPreset, Error, FilterSpec, QueryTranslator, Recipe, RecipeCatalog, RecipeStore, Result,
};

/// One recorded `RecipeStore::search` call.
#[derive(Debug, Clone)]
pub struct SearchCall {
    pub preset: Option<String>,
    pub filter: FilterSpec,
}

/// In-memory store. Search ignores the filter and returns every row, so the
/// catalog's own row cap is what the tests observe.
#[derive(Default)]
pub struct FakeStore {
    recipes: Vec<Recipe>,
    unavailable: bool,
    calls: Mutex<Vec<SearchCall>>,
}

impl FakeStore {
    pub fn with_recipes(count: i64) -> Self {
        Self {
            recipes: (1..=count).map(recipe).collect(),
            ..Default::default()
        }
    }

    /// Every call fails the way a dropped connection pool does.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> SearchCall {
        self.calls().pop().expect("store was never searched")
    }
}

#[async_trait]
impl RecipeStore for FakeStore {
    async fn search(&self, preset: Option<&DietPreset>, filter: &FilterSpec) -> Result<Vec<Recipe>> {
        self.calls.lock().unwrap().push(SearchCall {
            preset: preset.map(|p| p.key.to_string()),
            filter: filter.clone(),
        });
        if self.unavailable {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.recipes.clone())
    }

    async fn fetch(&self, id: i64) -> Result<Recipe> {
        if self.unavailable {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(Error::RecipeNotFound(id))
    }
}

pub fn recipe(id: i64) -> Recipe {
    Recipe {
        id,
        name: format!("Recipe {id}"),
        description: "Test recipe".to_string(),
        image: String::new(),
        prep_time_minutes: Some(10),
        cook_time_minutes: Some(20),
        total_time_minutes: Some(30),
        servings: Some(2),
        rating: Some(4.5),
        ingredients: vec!["tofu".to_string(), "rice".to_string()],
        instructions: vec!["Cook.".to_string()],
        calories: Some(400),
        protein: Some(20.0),
        fat: Some(10.0),
        carbs: Some(50.0),
        fiber: Some(6.0),
        sodium: Some(300.0),
    }
}

pub fn app(store: Arc<FakeStore>, translator: Option<Arc<dyn QueryTranslator>>) -> Router {
    let mut state = AppState::new(RecipeCatalog::with_builtin_presets(store));
    if let Some(translator) = translator {
        state = state.with_translator(translator);
    }
    router(state, cors_layer(Vec::new()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, &body.to_string())
}

pub fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request; an empty body decodes as `Value::Null`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
