use clap::Parser;

use crate::config::Config;

/// Availability MCP Server
///
/// A Model Context Protocol server that formats selected availability slots
/// as text in the user's timezone, optionally alongside a recipient's timezone.
///
/// ## Features
/// - **Tools**: `generate_availability_text` in continuous or chunked layout
/// - **Timezones**: IANA names, naive or offset-aware slot boundaries, DST handling
/// - **Security**: Optional shared API key checked on every tool call
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-availability
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "availability": {
///       "command": "mcp-server-availability",
///       "args": ["--api-key", "change-me"],
///       "env": {
///         "RUST_LOG": "info"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
/// - `AVAILABILITY_API_KEY`: Same as `--api-key`
/// - `AVAILABILITY_DEBUG`: Same as `--debug` (`true` or `false`)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-availability")]
#[command(about = "An MCP server that turns availability slots into timezone-aware text")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) server that formats availability slots as text. \nSupports continuous and chunked layouts with an optional second timezone for the recipient."
)]
pub struct Cli {
    /// Shared secret tool calls must present in their `api_key` field.
    ///
    /// When omitted, tool calls are accepted without a key.
    #[arg(
        long,
        env = "AVAILABILITY_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub api_key: Option<String>,

    /// Log at debug level when RUST_LOG is not set
    #[arg(long, env = "AVAILABILITY_DEBUG")]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> Config {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> Config {
        Config {
            api_key: self.api_key.filter(|key| !key.trim().is_empty()),
            debug: self.debug,
        }
    }
}
