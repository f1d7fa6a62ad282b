//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile coordinates, and computes the rectangular tile
//! range a map extent covers at a given zoom level. The range size is what
//! the fetch coordinator checks against the tile count limit before any
//! network activity starts.

mod range;
mod types;

pub use range::TileRange;
pub use types::{
    CoordError, Extent, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 22)
///
/// # Returns
///
/// A `Result` containing the tile coordinates or an error if inputs are invalid.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    // Number of tiles along each axis at this zoom level
    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (n as u32).saturating_sub(1);

    // Longitude to column; the eastern edge (lon == 180) maps onto the last tile
    let col = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    // Latitude to row using the Web Mercator projection
    let lat_rad = lat * PI / 180.0;
    let row = ((((1.0 - lat_rad.tan().asinh() / PI) / 2.0) * n) as u32).min(max_index);

    Ok(TileCoord { col, row, zoom })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.col as f64 / n * 360.0 - 180.0;

    let y = tile.row as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

/// Returns the geographic extent covered by a single tile.
pub fn tile_extent(tile: &TileCoord) -> Extent {
    let (ymax, xmin) = tile_to_lat_lon(tile);
    let southeast = TileCoord {
        col: tile.col + 1,
        row: tile.row + 1,
        zoom: tile.zoom,
    };
    let (ymin, xmax) = tile_to_lat_lon(&southeast);
    Extent {
        xmin,
        ymin,
        xmax,
        ymax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_city_at_zoom_16() {
        // New York City: 40.7128°N, 74.0060°W
        let tile = to_tile_coords(40.7128, -74.0060, 16).unwrap();
        assert_eq!(tile.row, 24640);
        assert_eq!(tile.col, 19295);
        assert_eq!(tile.zoom, 16);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = to_tile_coords(90.0, 0.0, 10);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_invalid_zoom() {
        let result = to_tile_coords(0.0, 0.0, MAX_ZOOM + 1);
        assert!(matches!(result, Err(CoordError::InvalidZoom(_))));
    }

    #[test]
    fn test_eastern_edge_maps_to_last_column() {
        let tile = to_tile_coords(0.0, 180.0, 4).unwrap();
        assert_eq!(tile.col, 15);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let original_lat = 40.7128;
        let original_lon = -74.0060;
        let zoom = 16;

        let tile = to_tile_coords(original_lat, original_lon, zoom).unwrap();
        let (converted_lat, converted_lon) = tile_to_lat_lon(&tile);

        // tile_to_lat_lon returns the northwest corner, so one-tile tolerance
        assert!((converted_lat - original_lat).abs() < 0.01);
        assert!((converted_lon - original_lon).abs() < 0.01);
    }

    #[test]
    fn test_tile_extent_ordering() {
        let tile = TileCoord {
            col: 57,
            row: 25,
            zoom: 6,
        };
        let extent = tile_extent(&tile);
        assert!(extent.xmin < extent.xmax);
        assert!(extent.ymin < extent.ymax);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;
                let (converted_lat, converted_lon) = tile_to_lat_lon(&tile);

                let tile_size = 360.0 / (2.0_f64.powi(zoom as i32));

                prop_assert!(
                    (converted_lat - lat).abs() < tile_size,
                    "Latitude roundtrip failed: {} -> {} (tile_size: {})",
                    lat, converted_lat, tile_size
                );
                prop_assert!(
                    (converted_lon - lon).abs() < tile_size,
                    "Longitude roundtrip failed: {} -> {} (tile_size: {})",
                    lon, converted_lon, tile_size
                );
            }

            #[test]
            fn test_tile_coords_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;

                let max_tile = 2u32.pow(zoom as u32);
                prop_assert!(tile.row < max_tile);
                prop_assert!(tile.col < max_tile);
                prop_assert_eq!(tile.zoom, zoom);
            }

            #[test]
            fn test_longitude_monotonic(
                lat in 0.0..1.0_f64,
                lon1 in -180.0..-90.0_f64,
                lon2 in -90.0..0.0_f64,
                zoom in 10u8..=15
            ) {
                // For fixed latitude, increasing longitude should increase column
                let tile1 = to_tile_coords(lat, lon1, zoom)?;
                let tile2 = to_tile_coords(lat, lon2, zoom)?;

                prop_assert!(tile1.col < tile2.col);
            }

            #[test]
            fn test_reject_invalid_latitude(
                lat in -90.0..-85.06_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let result = to_tile_coords(lat, lon, zoom);
                prop_assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
            }
        }
    }
}
