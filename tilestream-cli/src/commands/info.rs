//! Info command - print a layer's metadata listing.

use clap::Args;
use tilestream::config::Settings;
use tilestream::i18n::Translator;

use super::common::{resolve_layer, LayerArgs};
use crate::error::CliError;

/// Arguments for the info command.
#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub layer: LayerArgs,
}

/// Run the info command.
pub fn run(args: InfoArgs, settings: &Settings, tr: &Translator) -> Result<(), CliError> {
    let layer = resolve_layer(&args.layer, settings, tr)?;
    println!("{}", layer.properties(tr));
    Ok(())
}
