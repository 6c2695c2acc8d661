//! Centralized default constants for the recipe catalog.
//!
//! Crates reference these instead of defining their own magic numbers.

// =============================================================================
// ROW CAPS
// =============================================================================

/// Row cap for direct searches (REST query surface).
pub const DIRECT_SEARCH_LIMIT: u32 = 100;

/// Row cap for tool-driven and chat-driven searches.
pub const TOOL_SEARCH_LIMIT: u32 = 20;

// =============================================================================
// STORE
// =============================================================================

/// Table holding every recipe.
pub const RECIPE_TABLE: &str = "recipes";

/// Default MySQL host when `DB_HOST` is unset.
pub const DB_HOST: &str = "localhost";

/// Default MySQL port when `DB_PORT` is unset.
pub const DB_PORT: u16 = 3306;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 8080;

/// Name reported by the MCP `initialize` handshake.
pub const SERVER_NAME: &str = "recipe-server";

/// MCP protocol revision spoken by the tool surface.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

// =============================================================================
// TRANSLATOR
// =============================================================================

/// Default OpenAI-compatible endpoint for the query translator.
pub const TRANSLATOR_URL: &str = "https://api.openai.com/v1";

/// Default chat model for the query translator.
pub const TRANSLATOR_MODEL: &str = "gpt-4o-mini";

/// Default translator request timeout in seconds.
pub const TRANSLATOR_TIMEOUT_SECS: u64 = 30;
