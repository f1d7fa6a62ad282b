//! Config command - show the effective settings.

use std::path::Path;

use tilestream::config::Settings;

use crate::error::CliError;

/// Run the config command.
pub fn run(settings: &Settings, path: &Path) -> Result<(), CliError> {
    println!("Settings file: {}", path.display());
    println!();
    println!("[tilestream]");
    println!("  download_timeout_secs = {}", settings.download_timeout_secs);
    println!("  tile_count_limit = {}", settings.tile_count_limit);
    println!("  navigation_messages = {}", settings.navigation_messages);
    match &settings.layer_definition_dir {
        Some(dir) => println!("  layer_definition_dir = {}", dir.display()),
        None => println!("  layer_definition_dir = (not set)"),
    }
    match &settings.locale {
        Some(locale) => println!("  locale = {}", locale),
        None => println!("  locale = (not set)"),
    }
    Ok(())
}
