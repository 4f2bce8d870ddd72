// src/cli/tool.rs
// Direct tool execution from CLI

use super::serve::setup_dispatcher;
use anyhow::Result;

/// Execute a tool directly from the command line
pub async fn run_tool(name: String, args: String) -> Result<()> {
    let args: serde_json::Value = serde_json::from_str(&args)?;
    let dispatcher = setup_dispatcher()?;

    match dispatcher.dispatch_json(&name, args).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.to_user_string())),
    }
}
