//! `beeproject config` inspects the loaded configuration.

use std::path::Path;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.print(config.to_toml()?.trim_end())?;
            }
        }

        ConfigCommands::Path => match AppConfig::active_path(config_file) {
            Some(path) => output.print(&path.display().to_string())?,
            None => {
                output.print(&AppConfig::global_path().display().to_string())?;
                output.info("No configuration file found; built-in defaults are in use")?;
            }
        },
    }

    Ok(())
}

/// Strings print bare, unset values print empty, everything else as JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
