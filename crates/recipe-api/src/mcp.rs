//! MCP tool surface over JSON-RPC.
//!
//! Methods: `initialize`, `tools/list`, `tools/call`, `resources/list`,
//! `resources/read`. Tool arguments go through the same adapter as REST query
//! strings, so both surfaces filter identically.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use recipe_core::defaults::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use recipe_core::{
    DietPresetTable, Error, NumericField, NumericKind, RecipeCatalog, RecipeQuery, SortColumn,
    TOOL_SEARCH_LIMIT,
};

use crate::jsonrpc::error_codes::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::state::AppState;

pub const SEARCH_RECIPES: &str = "search_recipes";
pub const GET_RECIPE: &str = "get_recipe";
pub const GET_DIET_PLANS: &str = "get_diet_plans";

pub const DIET_PLANS_URI: &str = "recipe://diet-plans";

type RpcResult = std::result::Result<Value, JsonRpcError>;

/// `POST /mcp`
///
/// A body that is not JSON is answered with -32700 and HTTP 400; every other
/// outcome is HTTP 200 with a JSON-RPC envelope. Notifications get 202 and no
/// body.
pub async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            debug!(subsystem = "api", component = "mcp", error = %e, "Unparseable JSON-RPC body");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let id = value.get("id").filter(|id| !id.is_null()).cloned();
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            debug!(subsystem = "api", component = "mcp", error = %e, "Malformed JSON-RPC request");
            return Json(JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid Request"))
                .into_response();
        }
    };

    if request.is_notification() && request.method.starts_with("notifications/") {
        debug!(subsystem = "api", component = "mcp", rpc_method = %request.method, "Notification acknowledged");
        return StatusCode::ACCEPTED.into_response();
    }

    Json(dispatch(&state.catalog, request).await).into_response()
}

/// Route one request to its method handler.
pub async fn dispatch(catalog: &RecipeCatalog, request: JsonRpcRequest) -> JsonRpcResponse {
    let start = Instant::now();
    let params = request.params.as_ref();

    let outcome = match request.method.as_str() {
        "initialize" => Ok(initialize_result()),
        "tools/list" => Ok(json!({ "tools": tool_definitions(catalog.presets()) })),
        "tools/call" => call_tool(catalog, params).await,
        "resources/list" => Ok(json!({ "resources": resource_definitions() })),
        "resources/read" => read_resource(catalog, params),
        _ => Err(JsonRpcError::new(METHOD_NOT_FOUND, "Method not found")),
    };

    debug!(
        subsystem = "api",
        component = "mcp",
        rpc_method = %request.method,
        success = outcome.is_ok(),
        duration_ms = start.elapsed().as_millis() as u64,
        "JSON-RPC request handled"
    );

    match outcome {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(error) => JsonRpcResponse::failure(request.id, error),
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

// =============================================================================
// TOOLS
// =============================================================================

/// Tool descriptors with JSON input schemas.
pub fn tool_definitions(presets: &DietPresetTable) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "search".to_string(),
        json!({"type": "string", "description": "Text search in recipe name or description"}),
    );
    properties.insert(
        "diet".to_string(),
        json!({
            "type": "string",
            "description": format!(
                "Diet plan filter ({})",
                presets.keys().collect::<Vec<_>>().join(", ")
            ),
        }),
    );
    properties.insert(
        "include_ingredients".to_string(),
        json!({"type": "string", "description": "Comma-separated ingredients to include"}),
    );
    properties.insert(
        "exclude_ingredients".to_string(),
        json!({"type": "string", "description": "Comma-separated ingredients to exclude"}),
    );
    for field in NumericField::ALL {
        let kind = match field.kind() {
            NumericKind::Integer => "integer",
            NumericKind::Real => "number",
        };
        for bound in ["min", "max"] {
            properties.insert(
                format!("{bound}_{}", field.param_stem()),
                json!({
                    "type": kind,
                    "description": format!("{} {}", bound_label(bound), field.column()),
                }),
            );
        }
    }
    properties.insert(
        "sort_by".to_string(),
        json!({
            "type": "string",
            "description": format!(
                "Sort field ({})",
                SortColumn::all().map(SortColumn::column).collect::<Vec<_>>().join(", ")
            ),
        }),
    );
    properties.insert(
        "sort_order".to_string(),
        json!({"type": "string", "description": "Sort order (asc or desc)"}),
    );

    json!([
        {
            "name": SEARCH_RECIPES,
            "description": "Search for recipes based on various criteria including diet plans, ingredients, nutritional values, and preparation time",
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "additionalProperties": true,
            },
        },
        {
            "name": GET_RECIPE,
            "description": "Get detailed information about a specific recipe by ID",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer", "description": "Recipe ID"},
                },
                "required": ["id"],
            },
        },
        {
            "name": GET_DIET_PLANS,
            "description": "Get list of available diet plans with their descriptions and filters",
            "inputSchema": {"type": "object", "properties": {}},
        },
    ])
}

fn bound_label(bound: &str) -> &'static str {
    if bound == "min" {
        "Minimum"
    } else {
        "Maximum"
    }
}

async fn call_tool(catalog: &RecipeCatalog, params: Option<&Value>) -> RpcResult {
    let params = params
        .and_then(Value::as_object)
        .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Invalid params"))?;
    let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
    let no_arguments = Map::new();
    let arguments = params
        .get("arguments")
        .and_then(Value::as_object)
        .unwrap_or(&no_arguments);

    debug!(subsystem = "api", component = "mcp", tool = name, "Tool call");

    match name {
        SEARCH_RECIPES => {
            let query = RecipeQuery::from_rpc_arguments(arguments, TOOL_SEARCH_LIMIT);
            let outcome = catalog.search(&query).await.map_err(internal_error)?;
            text_content(&outcome.results)
        }
        GET_RECIPE => {
            let id = recipe_id(arguments.get("id"))
                .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Invalid recipe ID"))?;
            match catalog.get(id).await {
                Ok(recipe) => text_content(&recipe),
                Err(err) if err.is_not_found() => Ok(tool_error(err.to_string())),
                Err(err) => Err(internal_error(err)),
            }
        }
        GET_DIET_PLANS => text_content(&json!({ "diet_plans": catalog.diet_plans() })),
        _ => Err(JsonRpcError::new(METHOD_NOT_FOUND, "Tool not found")),
    }
}

/// Recipe ids arrive as integral JSON numbers or numeric strings.
fn recipe_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_content<T: Serialize>(value: &T) -> RpcResult {
    let text = serde_json::to_string_pretty(value).map_err(|e| internal_error(e.into()))?;
    Ok(json!({ "content": [{ "type": "text", "text": text }] }))
}

fn tool_error(message: String) -> Value {
    json!({
        "content": [{ "type": "text", "text": message }],
        "isError": true,
    })
}

fn internal_error(err: Error) -> JsonRpcError {
    let kind = err.kind();
    warn!(
        subsystem = "api",
        component = "mcp",
        error_kind = kind.as_str(),
        error = %err,
        "Tool call failed"
    );
    JsonRpcError::with_data(INTERNAL_ERROR, err.to_string(), json!({ "kind": kind }))
}

// =============================================================================
// RESOURCES
// =============================================================================

fn resource_definitions() -> Value {
    json!([{
        "uri": DIET_PLANS_URI,
        "name": "Diet Plans",
        "description": "Available diet plans and their configurations",
        "mimeType": "application/json",
    }])
}

fn read_resource(catalog: &RecipeCatalog, params: Option<&Value>) -> RpcResult {
    let params = params
        .and_then(Value::as_object)
        .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Invalid params"))?;
    let uri = params.get("uri").and_then(Value::as_str).unwrap_or_default();

    match uri {
        DIET_PLANS_URI => {
            let text = serde_json::to_string_pretty(catalog.diet_plans())
                .map_err(|e| internal_error(e.into()))?;
            Ok(json!({
                "contents": [{
                    "uri": uri,
                    "mimeType": "application/json",
                    "text": text,
                }],
            }))
        }
        _ => Err(JsonRpcError::new(METHOD_NOT_FOUND, "Resource not found")),
    }
}
