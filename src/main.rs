//! Tire Pressure Manager (TPM)
//!
//! An MCP server for bicycle tire pressure recommendations.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use tpm::build_info;
use tpm::config::Config;
use tpm::mcp::TpmService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tpm=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    // Print startup banner to stderr
    build_info::print_startup_banner(&config);
    eprintln!("Starting MCP server on stdio...");

    std::fs::create_dir_all(&config.report_dir)?;

    // Create the TPM service
    let service = TpmService::new(&config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
