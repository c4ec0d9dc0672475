//! Configuration view and validation commands - `taskboard config`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use taskboard::config::{self, BoardToml, CONFIG_FILE_NAME, LOG_ENV_VAR};

use super::super::ConfigCommands;

pub fn cmd_config(explicit: Option<&Path>, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            let (toml, source) = BoardToml::load_or_default(explicit)?;

            println!();
            println!("Taskboard Configuration");
            println!("=======================");
            println!();

            match &source {
                Some(path) => println!("Config file: {}", path.display()),
                None => {
                    println!("No {} found. Using default configuration.", CONFIG_FILE_NAME)
                }
            }
            println!();

            println!("[board]");
            println!("  heading_suffix = \"{}\"", toml.board.heading_suffix);
            println!();

            for (field, rule) in [
                ("title", &toml.validation.title),
                ("description", &toml.validation.description),
            ] {
                println!("[validation.{}]", field);
                println!("  required = {}", rule.required);
                if let Some(min) = rule.min_length {
                    println!("  min_length = {}", min);
                }
                if let Some(max) = rule.max_length {
                    println!("  max_length = {}", max);
                }
                println!();
            }

            let people = &toml.validation.people;
            println!("[validation.people]");
            println!("  required = {}", people.required);
            if let Some(min) = people.min {
                println!("  min = {}", min);
            }
            if let Some(max) = people.max {
                println!("  max = {}", max);
            }
            println!();

            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!("  json = {}", toml.logging.json);
            if let Some(file) = &toml.logging.file {
                println!("  file = \"{}\"", file.display());
            }
            println!();

            if let Ok(filter) = std::env::var(LOG_ENV_VAR) {
                println!("{} = \"{}\" overrides logging.level", LOG_ENV_VAR, filter);
                println!();
            }

            if source.is_none() {
                println!("Run 'taskboard config init' to create a {} file.", CONFIG_FILE_NAME);
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let Some(path) = config::locate(explicit) else {
                if let Some(path) = explicit {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                println!("No {} found. Using defaults (valid).", CONFIG_FILE_NAME);
                return Ok(());
            };

            let toml = BoardToml::load(&path)?;
            let warnings = toml.validate();

            println!("Config file: {}", path.display());
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            let path = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

            if path.exists() {
                println!("{} already exists at {}", CONFIG_FILE_NAME, path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            BoardToml::default()
                .save(&path)
                .with_context(|| format!("Failed to initialize {}", path.display()))?;

            println!("Created {} at {}", CONFIG_FILE_NAME, path.display());
            println!();
            println!("You can now customize:");
            println!("  - [board] heading_suffix");
            println!("  - [validation.title], [validation.description], [validation.people]");
            println!("  - [logging] level, json, file");
            println!();
        }
    }

    Ok(())
}
