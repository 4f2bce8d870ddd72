// src/cli/mod.rs
// CLI module for roadmap-mcp commands

use clap::{Parser, Subcommand};
use roadmap_mcp::config::FileConfig;
use std::path::PathBuf;
use tracing::Level;

pub mod config;
pub mod serve;
pub mod tool;

pub use config::run_config_check;
pub use serve::run_mcp_server;
pub use tool::run_tool;

#[derive(Parser)]
#[command(name = "roadmap-mcp")]
#[command(about = "MCP server for GitHub roadmaps and sprint planning")]
#[command(version)]
pub struct Cli {
    /// Override the log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<Level>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Execute a tool directly and print its JSON result
    Tool {
        /// Tool name (create_roadmap, plan_sprint, list_projects)
        #[arg(index = 1)]
        name: String,

        /// JSON arguments (e.g. '{"project": "Q3"}')
        #[arg(index = 2, default_value = "{}")]
        args: String,
    },

    /// Validate configuration and print the report
    Config,
}

impl Cli {
    /// Quiet for MCP stdio, verbose for one-shot commands
    pub fn log_level(&self) -> Level {
        self.log_level.unwrap_or(match &self.command {
            Some(Commands::Serve) | None => Level::WARN,
            Some(Commands::Tool { .. }) | Some(Commands::Config) => Level::INFO,
        })
    }
}

/// Global .env alongside config.toml
pub fn global_env_path() -> PathBuf {
    FileConfig::config_dir().join(".env")
}
