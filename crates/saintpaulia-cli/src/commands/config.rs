//! Config command implementation.
//!
//! The config file is the settings store; every change is validated before
//! it is saved.

use anyhow::{Context, Result};

use crate::cli::{ConfigAction, ConfigKey};
use crate::config::Config;
use crate::style;

pub fn cmd_config(action: ConfigAction, no_color: bool, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load();
            print!("{}", format_config(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Get { key } => {
            let config = Config::load();
            println!("{}", config.get(key));
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            config
                .set(key, &value)
                .with_context(|| format!("Cannot set {}", key_name(key)))?;
            config.save()?;
            if !quiet {
                println!(
                    "{}",
                    style::format_success(
                        &format!("{} = {}", key_name(key), config.get(key)),
                        no_color
                    )
                );
            }
        }
        ConfigAction::Reset { key } => {
            let mut config = Config::load();
            match key {
                Some(key) => config.reset(key),
                None => config = Config::default(),
            }
            config.save()?;
            if !quiet {
                let message = match key {
                    Some(key) => format!("{} reset to {}", key_name(key), config.get(key)),
                    None => "All settings reset to defaults".to_string(),
                };
                println!("{}", style::format_success(&message, no_color));
            }
        }
    }
    Ok(())
}

/// Key name as typed on the command line
fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::Plants => "plants",
        ConfigKey::NoColor => "no-color",
        ConfigKey::DefaultView => "default-view",
        ConfigKey::PlantsPerPage => "plants-per-page",
        ConfigKey::Watering => "watering",
        ConfigKey::Fertilizing => "fertilizing",
        ConfigKey::Grooming => "grooming",
    }
}

/// The effective configuration as TOML, thresholds fully resolved
fn format_config(config: &Config) -> Result<String> {
    let mut effective = config.clone();
    effective.care = config.thresholds().into();
    let content = toml::to_string_pretty(&effective).context("Failed to serialize config")?;
    Ok(format!("# {}\n{}", Config::path().display(), content))
}
