use colored::Colorize;

use crate::application::config::AppConfig;

/// Print the effective configuration (file values plus environment overrides).
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", "# netwatch effective configuration".dimmed());
    print!("{}", config.to_toml()?);
    Ok(())
}
