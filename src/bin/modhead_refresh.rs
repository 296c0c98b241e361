//! Command-line entry point for refreshing a variable.
//!
//! Reads a settings file, refreshes one variable by name and prints the new
//! value on stdout. Logging goes to stderr and is controlled by `RUST_LOG`.
//!
//! ```text
//! modhead-refresh --settings settings.json --variable token --write
//! ```

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use modhead_refresh::config::load_config;
use modhead_refresh::executor::{refresh_in_place, RefreshClient};
use modhead_refresh::store::SettingsFile;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "modhead-refresh", version, about = "Refresh a ModHead variable")]
struct Cli {
    /// Settings file holding the variables
    #[arg(short, long)]
    settings: PathBuf,

    /// Name of the variable to refresh
    #[arg(short, long)]
    variable: String,

    /// Write the new value back to the settings file
    #[arg(short, long)]
    write: bool,

    /// Print sensitive values instead of masking them
    #[arg(long)]
    reveal: bool,

    /// JSON file with a "modhead" section of client settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let settings_json = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Some(serde_json::from_str(&content).context("Config file is not valid JSON")?)
        }
        None => None,
    };
    load_config(settings_json).map_err(|e| anyhow!(e))?;

    let mut settings = SettingsFile::load(&cli.settings)?;
    let variable = settings
        .find_by_name(&cli.variable)
        .ok_or_else(|| anyhow!("No variable named '{}'", cli.variable))?;
    let id = variable.id.clone();

    let client = RefreshClient::from_global_config()?;
    let new_value = refresh_in_place(&client, &mut settings.variables, &id)
        .await
        .with_context(|| format!("Failed to refresh variable '{}'", cli.variable))?;

    if cli.write {
        settings.save()?;
        log::info!("Saved new value to {}", settings.path().display());
    }

    let shown = match settings.variables.iter().find(|v| v.id == id) {
        Some(refreshed) if !cli.reveal => refreshed.display_value(),
        _ => new_value.as_str(),
    };
    println!("{}", shown);

    Ok(())
}
