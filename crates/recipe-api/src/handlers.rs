//! REST and chat handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use recipe_core::{translate_query, Error, RecipeQuery, DIRECT_SEARCH_LIMIT, TOOL_SEARCH_LIMIT};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// SEARCH
// =============================================================================

/// `GET /api/recipes/search`
///
/// Unrecognized or malformed parameters are dropped, never rejected.
pub async fn search_recipes(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let query = RecipeQuery::from_query_string(raw.as_deref().unwrap_or(""), DIRECT_SEARCH_LIMIT);
    let outcome = state.catalog.search(&query).await?;

    let mut body = json!({
        "recipes": outcome.results.recipes,
        "count": outcome.results.count,
    });
    if let Some(preset) = outcome.preset {
        body["diet_plan"] = json!(preset);
    }
    Ok(Json(body))
}

/// `GET /api/recipe/:id`
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid recipe ID".to_string()))?;
    let recipe = state.catalog.get(id).await?;
    Ok(Json(json!(recipe)))
}

/// `GET /api/diet-plans`
pub async fn list_diet_plans(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "diet_plans": state.catalog.diet_plans() }))
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// CHAT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Run the translated query and include its results.
    #[serde(default)]
    pub execute: bool,
}

/// `POST /api/chat`
///
/// Translates free text into a query string. With `execute` set, the query
/// also runs under the tool row cap.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let translator = state
        .translator
        .as_deref()
        .ok_or_else(|| Error::Translator("no query translator is configured".to_string()))?;

    let translated = translate_query(translator, message, TOOL_SEARCH_LIMIT).await?;
    debug!(
        subsystem = "api",
        component = "chat",
        model = translator.model_name(),
        query = %translated.query_string,
        "Chat message translated"
    );

    let mut body = json!({
        "message": message,
        "query": translated.query_string,
        "filters": translated.parameters,
    });

    if request.execute {
        let outcome = state.catalog.search(&translated.query).await?;
        info!(
            subsystem = "api",
            component = "chat",
            result_count = outcome.results.count,
            "Chat query executed"
        );
        body["results"] = json!(outcome.results);
    }

    Ok(Json(body))
}
