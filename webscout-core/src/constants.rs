//! Application constants
//!
//! Single source of truth for paths, environment variable names and defaults.

/// Default credentials file, loaded without overriding the process environment
pub const ENV_PATH: &str = "keys.env";

/// Default settings file path
pub const SETTINGS_PATH: &str = "config/agent.toml";

/// Model identifier used when none is configured
pub const DEFAULT_MODEL: &str = "moonshotai/Kimi-K2-Instruct:fireworks-ai";

/// Tool runner used to launch the published tool-server package
pub const TOOL_RUNNER: &str = "npx";

/// Published MCP tool-server package
pub const TOOL_SERVER_PACKAGE: &str = "firecrawl-mcp";

/// Runner flag that answers yes to every install prompt
pub const AUTO_CONFIRM_FLAG: &str = "-y";

/// Environment variable carrying the tool-server credential into the child
pub const TOOL_SERVER_KEY_VAR: &str = "FIRECRAWL_API_KEY";

/// Default companion HTTP listen address
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";
