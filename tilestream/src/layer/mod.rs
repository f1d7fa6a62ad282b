//! Tile layer definitions.
//!
//! A [`TileLayerDefinition`] describes one tile layer: where its tiles
//! live (URL template), which zoom levels it serves, which part of the
//! world it covers, how its grid counts rows, and what attribution it
//! requires. Definitions come either from code (builder style) or from
//! external layer-definition files (tab-separated, one layer per line).

mod definition;
mod source;

pub use definition::{TileLayerDefinition, YOrigin, ZoomRange};
pub use source::{load_definition_file, parse_definition_line, LayerDefError};
