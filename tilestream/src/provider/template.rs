//! URL-template tile provider.
//!
//! Builds tile URLs from a layer's template by substituting the `{z}`,
//! `{x}` and `{y}` placeholders. A template may omit placeholders (a
//! single-image layer repeats the same URL), but whatever placeholders it
//! has are always substituted.
//!
//! # Y-origin handling
//!
//! Internal tile rows use the top-left (XYZ) convention. For layers whose
//! scheme counts rows from the bottom (TMS), the row is flipped here, at
//! the last moment before the URL leaves the process:
//!
//! ```text
//! y_tms = 2^zoom - 1 - row
//! ```

use crate::coord::TileCoord;
use crate::layer::{TileLayerDefinition, YOrigin, ZoomRange};

use super::ProviderError;

/// Builds tile URLs for one layer definition.
#[derive(Debug, Clone)]
pub struct TemplateProvider {
    url_template: String,
    zoom_range: ZoomRange,
    y_origin: YOrigin,
}

impl TemplateProvider {
    /// Creates a provider from a layer definition.
    pub fn new(layer: &TileLayerDefinition) -> Self {
        Self {
            url_template: layer.url_template.clone(),
            zoom_range: layer.zoom_range,
            y_origin: layer.y_origin,
        }
    }

    /// Whether the provider serves the given zoom level natively.
    pub fn supports_zoom(&self, zoom: u8) -> bool {
        self.zoom_range.contains(zoom)
    }

    /// Builds the URL for a tile.
    ///
    /// Fails with [`ProviderError::UnsupportedZoom`] when the tile's zoom
    /// is outside the layer's native range; the fetch coordinator resolves
    /// zoom clamping before tiles get here.
    pub fn tile_url(&self, tile: &TileCoord) -> Result<String, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        let y = match self.y_origin {
            YOrigin::TopLeft => tile.row,
            YOrigin::BottomLeft => (1u32 << tile.zoom) - 1 - tile.row,
        };

        Ok(self
            .url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.col.to_string())
            .replace("{y}", &y.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(y_origin: YOrigin) -> TileLayerDefinition {
        TileLayerDefinition::new(
            "Test",
            "https://tiles.example.com/{z}/{x}/{y}.png",
            ZoomRange::new(0, 18).unwrap(),
        )
        .with_y_origin(y_origin)
    }

    #[test]
    fn test_url_substitution_top_left() {
        let provider = TemplateProvider::new(&layer(YOrigin::TopLeft));
        let tile = TileCoord {
            col: 57,
            row: 25,
            zoom: 6,
        };
        assert_eq!(
            provider.tile_url(&tile).unwrap(),
            "https://tiles.example.com/6/57/25.png"
        );
    }

    #[test]
    fn test_url_substitution_bottom_left_flips_row() {
        let provider = TemplateProvider::new(&layer(YOrigin::BottomLeft));
        let tile = TileCoord {
            col: 57,
            row: 25,
            zoom: 6,
        };
        // 2^6 - 1 - 25 = 38
        assert_eq!(
            provider.tile_url(&tile).unwrap(),
            "https://tiles.example.com/6/57/38.png"
        );
    }

    #[test]
    fn test_flip_is_an_involution() {
        let top = TemplateProvider::new(&layer(YOrigin::TopLeft));
        let bottom = TemplateProvider::new(&layer(YOrigin::BottomLeft));
        for row in [0u32, 1, 31, 63] {
            let tile = TileCoord {
                col: 0,
                row,
                zoom: 6,
            };
            let top_url = top.tile_url(&tile).unwrap();
            let flipped = TileCoord {
                col: 0,
                row: 63 - row,
                zoom: 6,
            };
            assert_eq!(bottom.tile_url(&flipped).unwrap(), top_url);
        }
    }

    #[test]
    fn test_unsupported_zoom_rejected() {
        let provider = TemplateProvider::new(&layer(YOrigin::TopLeft));
        let tile = TileCoord {
            col: 0,
            row: 0,
            zoom: 19,
        };
        assert!(matches!(
            provider.tile_url(&tile),
            Err(ProviderError::UnsupportedZoom(19))
        ));
    }

    #[test]
    fn test_template_without_placeholders() {
        let def = TileLayerDefinition::new(
            "Single image",
            "https://example.com/fixed.png",
            ZoomRange::new(0, 5).unwrap(),
        );
        let provider = TemplateProvider::new(&def);
        let tile = TileCoord {
            col: 1,
            row: 2,
            zoom: 3,
        };
        assert_eq!(
            provider.tile_url(&tile).unwrap(),
            "https://example.com/fixed.png"
        );
    }
}
