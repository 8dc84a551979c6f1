use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!(
        "  defaults.theme        {}",
        config.theme().unwrap_or("light")
    );
    println!(
        "  defaults.language     {}",
        config.language().unwrap_or_default()
    );
    println!(
        "  defaults.start_slide  {}",
        config
            .start_slide()
            .map_or_else(|| "manifest".to_string(), |n| n.to_string())
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{}",
        format!("Set {key} = {value} in {}", path.display()).green()
    );
    Ok(())
}
