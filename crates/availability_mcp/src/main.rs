mod cli;
mod config;
mod core;
mod server;
mod utils;

use cli::Cli;
use utils::logging;

/// Availability MCP Server
///
/// Formats availability slots as shareable text:
/// - Tools: generate_availability_text (continuous or chunks layout)
/// - Resources: Server status, help and rendered layout samples
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-availability
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config();

    // Initialize logging based on environment
    logging::init_logging(config.debug)?;

    tracing::info!(
        api_key_required = config.requires_api_key(),
        "Starting Availability MCP server"
    );

    if let Err(e) = server::run(config).await {
        tracing::error!("Error running Availability MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
