// src/main.rs
// roadmap-mcp - GitHub roadmap and sprint planning over MCP

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, global_env_path, run_config_check, run_mcp_server, run_tool};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files; the first value set wins, so project beats global
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(global_env_path());

    let cli = Cli::parse();

    // stdout belongs to the MCP transport
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server().await?,
        Some(Commands::Tool { name, args }) => run_tool(name, args).await?,
        Some(Commands::Config) => run_config_check()?,
    }

    Ok(())
}
