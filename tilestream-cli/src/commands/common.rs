//! Shared argument types and resolution helpers for CLI commands.

use std::path::PathBuf;

use clap::Args;
use tilestream::config::Settings;
use tilestream::i18n::Translator;
use tilestream::layer::{load_definition_file, TileLayerDefinition, YOrigin, ZoomRange};

use crate::error::CliError;

/// How a command selects the layer it operates on.
///
/// Either a definition file (with an optional `--title` to pick one of its
/// layers) or an inline `--url` template. With neither, the external
/// definition directory from the settings is searched by title.
#[derive(Debug, Args)]
pub struct LayerArgs {
    /// Layer-definition TSV file
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Layer title to select (defaults to the first layer in the file)
    #[arg(long)]
    pub title: Option<String>,

    /// Inline tile URL template with {z}, {x}, {y} placeholders
    #[arg(long)]
    pub url: Option<String>,

    /// Zoom range for an inline template, e.g. 0-18
    #[arg(long, default_value = "0-18", value_parser = parse_zoom_range)]
    pub zoom_range: ZoomRange,

    /// y-origin for an inline template: top (XYZ) or bottom (TMS)
    #[arg(long, default_value = "top")]
    pub y_origin: String,
}

fn parse_zoom_range(raw: &str) -> Result<ZoomRange, String> {
    let (zmin, zmax) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected zmin-zmax, got '{raw}'"))?;
    let zmin: u8 = zmin.trim().parse().map_err(|_| format!("bad zmin in '{raw}'"))?;
    let zmax: u8 = zmax.trim().parse().map_err(|_| format!("bad zmax in '{raw}'"))?;
    ZoomRange::new(zmin, zmax)
}

/// Resolves a layer definition from CLI arguments and settings.
pub fn resolve_layer(
    args: &LayerArgs,
    settings: &Settings,
    tr: &Translator,
) -> Result<TileLayerDefinition, CliError> {
    if let Some(url) = &args.url {
        let title = args.title.clone().unwrap_or_else(|| "Inline layer".to_string());
        let y_origin: YOrigin = args
            .y_origin
            .parse()
            .map_err(|e: String| CliError::Layer(e))?;
        return Ok(TileLayerDefinition::new(title, url.clone(), args.zoom_range)
            .with_y_origin(y_origin));
    }

    if let Some(file) = &args.file {
        let layers = load_definition_file(file)
            .map_err(|e| CliError::Layer(e.localized_message(tr)))?;
        return pick_layer(layers, args.title.as_deref(), &file.display().to_string());
    }

    let Some(dir) = &settings.layer_definition_dir else {
        return Err(CliError::Config(
            "no layer given: pass --file or --url, or set layer_definition_dir".to_string(),
        ));
    };
    let mut layers = Vec::new();
    for path in definition_files(dir)? {
        layers.extend(
            load_definition_file(&path).map_err(|e| CliError::Layer(e.localized_message(tr)))?,
        );
    }
    pick_layer(layers, args.title.as_deref(), &dir.display().to_string())
}

fn pick_layer(
    layers: Vec<TileLayerDefinition>,
    title: Option<&str>,
    source: &str,
) -> Result<TileLayerDefinition, CliError> {
    match title {
        Some(title) => layers
            .into_iter()
            .find(|l| l.title == title)
            .ok_or_else(|| CliError::Layer(format!("no layer titled '{title}' in {source}"))),
        None => layers
            .into_iter()
            .next()
            .ok_or_else(|| CliError::Layer(format!("no layers defined in {source}"))),
    }
}

/// Lists the definition files (`.tsv`) in a directory, sorted by name.
pub fn definition_files(dir: &std::path::Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "tsv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zoom_range() {
        let range = parse_zoom_range("2-18").unwrap();
        assert_eq!((range.zmin, range.zmax), (2, 18));
        assert!(parse_zoom_range("18").is_err());
        assert!(parse_zoom_range("18-2").is_err());
    }

    #[test]
    fn test_inline_layer_resolution() {
        let args = LayerArgs {
            file: None,
            title: Some("OSM".to_string()),
            url: Some("https://tile.example/{z}/{x}/{y}.png".to_string()),
            zoom_range: ZoomRange::new(0, 19).unwrap(),
            y_origin: "top".to_string(),
        };
        let layer = resolve_layer(&args, &Settings::default(), &Translator::passthrough()).unwrap();
        assert_eq!(layer.title, "OSM");
        assert_eq!(layer.zoom_range.zmax, 19);
    }

    #[test]
    fn test_no_layer_source_is_config_error() {
        let args = LayerArgs {
            file: None,
            title: None,
            url: None,
            zoom_range: ZoomRange::new(0, 18).unwrap(),
            y_origin: "top".to_string(),
        };
        let err =
            resolve_layer(&args, &Settings::default(), &Translator::passthrough()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_definition_files_filters_and_sorts() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.tsv"), "").unwrap();
        std::fs::write(dir.path().join("a.tsv"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = definition_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.tsv", "b.tsv"]);
    }
}
