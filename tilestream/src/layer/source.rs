//! External layer-definition files.
//!
//! A definition file holds one layer per line, tab-separated:
//!
//! ```text
//! title<TAB>credit<TAB>url<TAB>yOriginTop<TAB>zmin<TAB>zmax[<TAB>xmin<TAB>ymin<TAB>xmax<TAB>ymax]
//! ```
//!
//! Lines starting with `#` and blank lines are skipped. The four extent
//! fields are optional as a group; a layer without them has no recorded
//! extent. Malformed lines and unreadable files surface as named errors
//! carrying the offending file and line so the message layer can
//! interpolate them.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::coord::Extent;
use crate::i18n::Translator;

use super::definition::{TileLayerDefinition, ZoomRange};

/// Errors from reading or parsing layer-definition files.
#[derive(Debug, Error)]
pub enum LayerDefError {
    /// A line did not match the expected tab-separated format.
    #[error("Invalid line format: {file} line {line}")]
    InvalidLineFormat {
        /// File the line came from.
        file: String,
        /// 1-based line number.
        line: usize,
    },

    /// The definition file could not be read.
    #[error("Fail to read {file}: {source}")]
    ReadFailure {
        /// File that failed to open or read.
        file: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LayerDefError {
    /// Renders the error for display in the user's locale.
    ///
    /// Uses the `AddLayerDialog` catalogue context, matching where these
    /// conditions are reported to the user.
    pub fn localized_message(&self, tr: &Translator) -> String {
        const CONTEXT: &str = "AddLayerDialog";
        match self {
            LayerDefError::InvalidLineFormat { file, line } => {
                tr.format(CONTEXT, "Invalid line format: {} line {}", &[file, line])
            }
            LayerDefError::ReadFailure { file, source } => {
                tr.format(CONTEXT, "Fail to read {0}: {1}", &[file, source])
            }
        }
    }
}

/// Parses a single definition line.
///
/// Returns `Ok(None)` for comments and blank lines. `file` and `line_no`
/// are only used to name the source of a malformed line.
pub fn parse_definition_line(
    text: &str,
    file: &str,
    line_no: usize,
) -> Result<Option<TileLayerDefinition>, LayerDefError> {
    let trimmed = text.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
        return Ok(None);
    }

    let bad_line = || LayerDefError::InvalidLineFormat {
        file: file.to_string(),
        line: line_no,
    };

    let fields: Vec<&str> = trimmed.split('\t').collect();
    // Six required fields, optionally followed by the four extent edges
    if fields.len() != 6 && fields.len() != 10 {
        return Err(bad_line());
    }

    let title = fields[0].trim();
    let credit = fields[1].trim();
    let url = fields[2].trim();
    if title.is_empty() || url.is_empty() {
        return Err(bad_line());
    }

    let y_origin = fields[3].parse().map_err(|_| bad_line())?;
    let zmin: u8 = fields[4].trim().parse().map_err(|_| bad_line())?;
    let zmax: u8 = fields[5].trim().parse().map_err(|_| bad_line())?;
    let zoom_range = ZoomRange::new(zmin, zmax).map_err(|_| bad_line())?;

    let extent = if fields.len() == 10 {
        let mut edges = [0.0f64; 4];
        for (slot, field) in edges.iter_mut().zip(&fields[6..10]) {
            *slot = field.trim().parse().map_err(|_| bad_line())?;
        }
        Some(Extent::new(edges[0], edges[1], edges[2], edges[3]).map_err(|_| bad_line())?)
    } else {
        None
    };

    let mut layer =
        TileLayerDefinition::new(title, url, zoom_range).with_y_origin(y_origin);
    if let Some(extent) = extent {
        layer = layer.with_extent(extent);
    }
    if !credit.is_empty() {
        layer = layer.with_credit(credit);
    }
    Ok(Some(layer))
}

/// Loads every layer defined in a file.
///
/// Parsing stops at the first malformed line; the returned error names the
/// file and line so the caller can report it verbatim.
pub fn load_definition_file(path: &Path) -> Result<Vec<TileLayerDefinition>, LayerDefError> {
    let file_name = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| LayerDefError::ReadFailure {
        file: file_name.clone(),
        source,
    })?;

    let mut layers = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if let Some(layer) = parse_definition_line(line, &file_name, index + 1)? {
            layers.push(layer);
        }
    }
    debug!(file = %file_name, count = layers.len(), "loaded layer definitions");
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::YOrigin;
    use std::io::Write;

    const OSM_LINE: &str =
        "OpenStreetMap\t© OpenStreetMap contributors\thttps://tile.openstreetmap.org/{z}/{x}/{y}.png\t1\t0\t19";

    #[test]
    fn test_parse_minimal_line() {
        let layer = parse_definition_line(OSM_LINE, "layers.tsv", 1)
            .unwrap()
            .unwrap();
        assert_eq!(layer.title, "OpenStreetMap");
        assert_eq!(layer.zoom_range.zmax, 19);
        assert_eq!(layer.y_origin, YOrigin::TopLeft);
        assert!(layer.extent.is_none());
        assert_eq!(
            layer.credit.as_deref(),
            Some("© OpenStreetMap contributors")
        );
    }

    #[test]
    fn test_parse_line_with_extent() {
        let line = "GSI Ortho\tGSI\thttps://example.jp/{z}/{x}/{y}.jpg\t1\t2\t18\t122.7\t20.4\t154.8\t45.6";
        let layer = parse_definition_line(line, "layers.tsv", 1)
            .unwrap()
            .unwrap();
        let extent = layer.extent.unwrap();
        assert_eq!(extent.xmin, 122.7);
        assert_eq!(extent.ymax, 45.6);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        assert!(parse_definition_line("# comment", "f", 1).unwrap().is_none());
        assert!(parse_definition_line("", "f", 2).unwrap().is_none());
        assert!(parse_definition_line("   ", "f", 3).unwrap().is_none());
    }

    #[test]
    fn test_wrong_field_count_names_file_and_line() {
        let err = parse_definition_line("only\tthree\tfields", "layers.tsv", 7).unwrap_err();
        match err {
            LayerDefError::InvalidLineFormat { file, line } => {
                assert_eq!(file, "layers.tsv");
                assert_eq!(line, 7);
            }
            other => panic!("expected InvalidLineFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_zoom_is_invalid_line() {
        let line = "t\tc\thttp://e/{z}/{x}/{y}\t1\tabc\t19";
        assert!(matches!(
            parse_definition_line(line, "f", 1),
            Err(LayerDefError::InvalidLineFormat { .. })
        ));
    }

    #[test]
    fn test_inverted_zoom_range_is_invalid_line() {
        let line = "t\tc\thttp://e/{z}/{x}/{y}\t1\t19\t2";
        assert!(matches!(
            parse_definition_line(line, "f", 1),
            Err(LayerDefError::InvalidLineFormat { .. })
        ));
    }

    #[test]
    fn test_load_definition_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# sample layers").unwrap();
        writeln!(file, "{}", OSM_LINE).unwrap();
        writeln!(file).unwrap();

        let layers = load_definition_file(file.path()).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].title, "OpenStreetMap");
    }

    #[test]
    fn test_load_missing_file_reports_read_failure() {
        let err = load_definition_file(Path::new("/nonexistent/layers.tsv")).unwrap_err();
        assert!(matches!(err, LayerDefError::ReadFailure { .. }));
    }

    #[test]
    fn test_localized_messages() {
        let tr = Translator::for_locale("ja");

        let err = LayerDefError::InvalidLineFormat {
            file: "layers.tsv".to_string(),
            line: 12,
        };
        assert_eq!(
            err.localized_message(&tr),
            "不正な行フォーマットです: layers.tsv line 12"
        );

        let err = LayerDefError::ReadFailure {
            file: "layers.tsv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.localized_message(&tr);
        assert!(msg.starts_with("layers.tsvの読み込みに失敗しました"));
    }
}
