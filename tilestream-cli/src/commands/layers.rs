//! Layers command - list the layers in the external definition directory.

use std::path::PathBuf;

use clap::Args;
use tilestream::config::Settings;
use tilestream::i18n::Translator;
use tilestream::layer::load_definition_file;

use super::common::definition_files;
use crate::error::CliError;

/// Arguments for the layers command.
#[derive(Debug, Args)]
pub struct LayersArgs {
    /// Directory to scan instead of the configured one
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Run the layers command.
pub fn run(args: LayersArgs, settings: &Settings, tr: &Translator) -> Result<(), CliError> {
    let dir = args
        .dir
        .or_else(|| settings.layer_definition_dir.clone())
        .ok_or_else(|| {
            CliError::Config(
                "no definition directory: pass --dir or set layer_definition_dir".to_string(),
            )
        })?;

    let files = definition_files(&dir)?;
    if files.is_empty() {
        println!("No layer definition files in {}", dir.display());
        return Ok(());
    }

    for path in files {
        let layers =
            load_definition_file(&path).map_err(|e| CliError::Layer(e.localized_message(tr)))?;
        println!("{}", path.display());
        for layer in layers {
            println!(
                "  {}  zoom {}  {}",
                layer.title, layer.zoom_range, layer.url_template
            );
        }
    }
    Ok(())
}
