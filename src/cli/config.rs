// src/cli/config.rs
// Configuration check command

use anyhow::{Result, bail};
use roadmap_mcp::config::{Config, EnvConfig, FileConfig};

/// Print the validation report; fails when the configuration is unusable
pub fn run_config_check() -> Result<()> {
    let env_config = EnvConfig::load();
    let file_config = FileConfig::load();

    println!("Config directory: {}", FileConfig::config_dir().display());

    let report = Config::validate(&env_config, &file_config);
    println!("{}", report);
    if !report.is_usable() {
        bail!("configuration is invalid");
    }

    let config = Config::resolve(&env_config, &file_config)?;
    println!("Repository: {}", config.default_repo);
    println!("REST API: {}", config.github.api_url);
    println!("GraphQL API: {}", config.github.graphql_url);
    println!(
        "Board association: {}",
        if config.planning.associate_with_project { "enabled" } else { "disabled" }
    );
    println!("Max concurrency: {}", config.planning.max_concurrency);
    println!("Request timeout: {}s", config.request_timeout.as_secs());
    Ok(())
}
