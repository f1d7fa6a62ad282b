//! TileStream CLI - batched tile downloads from the command line.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilestream::config::Settings;
use tilestream::i18n::Translator;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "tilestream", version, about = "Batched XYZ/TMS tile downloads")]
struct Cli {
    /// Settings file (default: ~/.config/tilestream/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Locale override, e.g. "ja"
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Download the tiles covering an extent at a zoom level
    Fetch(commands::fetch::FetchArgs),

    /// Print a layer's metadata listing
    Info(commands::info::InfoArgs),

    /// List layers found in the definition directory
    Layers(commands::layers::LayersArgs),

    /// Show the effective settings
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.config.unwrap_or_else(default_settings_path);
    let settings = Settings::load(&path).map_err(|e| CliError::Config(e.to_string()))?;
    let translator = resolve_translator(cli.locale.as_deref(), &settings);

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args, &settings, &translator),
        Commands::Info(args) => commands::info::run(args, &settings, &translator),
        Commands::Layers(args) => commands::layers::run(args, &settings, &translator),
        Commands::Config => commands::config::run(&settings, &path),
    }
}

/// Locale precedence: CLI flag, then settings, then the environment.
fn resolve_translator(cli_locale: Option<&str>, settings: &Settings) -> Translator {
    if let Some(locale) = cli_locale {
        return Translator::for_locale(locale);
    }
    if let Some(locale) = &settings.locale {
        return Translator::for_locale(locale);
    }
    match std::env::var("LANG") {
        Ok(lang) => Translator::for_locale(&lang),
        Err(_) => Translator::passthrough(),
    }
}

fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tilestream")
        .join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_fetch() {
        let cli = Cli::try_parse_from([
            "tilestream",
            "fetch",
            "--url",
            "https://tile.example/{z}/{x}/{y}.png",
            "--extent",
            "139.5",
            "35.5",
            "139.9",
            "35.8",
            "--zoom",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.zoom, 10);
                assert_eq!(args.extent.len(), 4);
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_translator_prefers_cli_flag() {
        let settings = Settings::default().with_locale("en");
        let tr = resolve_translator(Some("ja"), &settings);
        assert_eq!(tr.tr("TileLayer", "Not set"), "未設定");
    }

    #[test]
    fn test_translator_falls_back_to_settings() {
        let settings = Settings::default().with_locale("ja");
        let tr = resolve_translator(None, &settings);
        assert_eq!(tr.tr("TileLayer", "Not set"), "未設定");
    }
}
