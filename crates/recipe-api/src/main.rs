//! recipe-api - HTTP server for the recipe catalog

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_api::{cors_layer, parse_allowed_origins, router, AppState};
use recipe_core::defaults::{SERVER_HOST, SERVER_PORT};
use recipe_core::{QueryTranslator, RecipeCatalog};
use recipe_db::{database_url_from_env, log_pool_metrics, Database, PoolConfig};
use recipe_inference::{OpenAIConfig, OpenAITranslator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "recipe_api=debug,recipe_db=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recipe_api=debug,recipe_db=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("recipe-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files by default
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| SERVER_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT);

    // Connect to database
    info!("Connecting to database...");
    let database_url = database_url_from_env()?;
    let db = Database::connect_with_config(&database_url, PoolConfig::from_env()).await?;
    log_pool_metrics(db.pool());
    info!("Database connected");

    let catalog = RecipeCatalog::with_builtin_presets(Arc::new(db.recipes.clone()));
    let mut state = AppState::new(catalog);

    // Query translator for the chat surface
    let translator_config = OpenAIConfig::from_env();
    if translator_config.is_usable() {
        let translator = OpenAITranslator::new(translator_config, state.catalog.presets())?;
        info!(
            model = translator.model_name(),
            "Query translator enabled"
        );
        state = state.with_translator(Arc::new(translator));
    } else {
        warn!("OPENAI_API_KEY not set; /api/chat will report translator failures");
    }

    let allowed_origins =
        parse_allowed_origins(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default());
    if allowed_origins.is_empty() {
        info!("CORS: any origin allowed");
    } else {
        info!(origins = allowed_origins.len(), "CORS: origin list configured");
    }

    let app = router(state, cors_layer(allowed_origins));

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
