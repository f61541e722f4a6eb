use std::path::Path;

use anyhow::Result;
use dragscroll_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path(custom: Option<&Path>) -> Result<()> {
    match custom {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", AppConfig::config_path().display()),
    }
    Ok(())
}

pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
