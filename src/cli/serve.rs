// src/cli/serve.rs
// MCP server initialization and main loop

use anyhow::Result;
use roadmap_mcp::config::{Config, EnvConfig, FileConfig};
use roadmap_mcp::mcp::{RoadmapServer, ToolDispatcher};
use tracing::{info, warn};

/// Load configuration once and build the dispatcher shared by every tool call
pub fn setup_dispatcher() -> Result<ToolDispatcher> {
    let env_config = EnvConfig::load();
    let file_config = FileConfig::load();

    let report = Config::validate(&env_config, &file_config);
    for issue in report.warnings() {
        warn!(setting = issue.setting, "{}", issue.message);
    }

    let config = Config::resolve(&env_config, &file_config)?;
    info!(
        repo = %config.default_repo,
        associate_with_project = config.planning.associate_with_project,
        max_concurrency = config.planning.max_concurrency,
        "Configuration loaded"
    );

    Ok(ToolDispatcher::from_config(&config))
}

pub async fn run_mcp_server() -> Result<()> {
    let server = RoadmapServer::new(setup_dispatcher()?);

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    info!("MCP server ready on stdio");
    service.waiting().await?;

    Ok(())
}
