//! Rectangular tile ranges covering a map extent.

use super::types::{CoordError, Extent, TileCoord};
use super::to_tile_coords;

/// Inclusive rectangle of tile addresses at one zoom level.
///
/// Produced from a viewport extent; its `count()` is what the fetch
/// coordinator compares against the tile count limit before dispatching
/// any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Zoom level of every tile in the range.
    pub zoom: u8,
    /// Westernmost column.
    pub col_min: u32,
    /// Easternmost column (inclusive).
    pub col_max: u32,
    /// Northernmost row.
    pub row_min: u32,
    /// Southernmost row (inclusive).
    pub row_max: u32,
}

impl TileRange {
    /// Computes the tile range covering `extent` at `zoom`.
    ///
    /// The northwest corner of the extent maps to the minimum column/row,
    /// the southeast corner to the maximum. Latitudes outside the Web
    /// Mercator band are clamped to it so that world-spanning extents work.
    pub fn from_extent(extent: &Extent, zoom: u8) -> Result<Self, CoordError> {
        let north = extent.ymax.clamp(super::MIN_LAT, super::MAX_LAT);
        let south = extent.ymin.clamp(super::MIN_LAT, super::MAX_LAT);

        let northwest = to_tile_coords(north, extent.xmin, zoom)?;
        let southeast = to_tile_coords(south, extent.xmax, zoom)?;

        Ok(Self {
            zoom,
            col_min: northwest.col,
            col_max: southeast.col,
            row_min: northwest.row,
            row_max: southeast.row,
        })
    }

    /// Number of tiles in the range.
    pub fn count(&self) -> u64 {
        let cols = (self.col_max - self.col_min + 1) as u64;
        let rows = (self.row_max - self.row_min + 1) as u64;
        cols * rows
    }

    /// Iterates over the tiles in row-major order (north to south).
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let zoom = self.zoom;
        let cols = self.col_min..=self.col_max;
        (self.row_min..=self.row_max)
            .flat_map(move |row| cols.clone().map(move |col| TileCoord { col, row, zoom }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_extent_is_one_tile() {
        let extent = Extent::new(139.7, 35.6, 139.7, 35.6).unwrap();
        let range = TileRange::from_extent(&extent, 10).unwrap();
        assert_eq!(range.count(), 1);
    }

    #[test]
    fn test_world_extent_at_zoom_2() {
        let extent = Extent::world();
        let range = TileRange::from_extent(&extent, 2).unwrap();
        assert_eq!(range.count(), 16);
    }

    #[test]
    fn test_count_matches_iteration() {
        let extent = Extent::new(135.0, 34.0, 140.0, 36.0).unwrap();
        let range = TileRange::from_extent(&extent, 8).unwrap();
        assert_eq!(range.iter().count() as u64, range.count());
    }

    #[test]
    fn test_iteration_row_major() {
        let range = TileRange {
            zoom: 4,
            col_min: 2,
            col_max: 3,
            row_min: 5,
            row_max: 6,
        };
        let tiles: Vec<_> = range.iter().collect();
        assert_eq!(tiles.len(), 4);
        assert_eq!(
            tiles[0],
            TileCoord {
                col: 2,
                row: 5,
                zoom: 4
            }
        );
        assert_eq!(
            tiles[1],
            TileCoord {
                col: 3,
                row: 5,
                zoom: 4
            }
        );
        assert_eq!(
            tiles[2],
            TileCoord {
                col: 2,
                row: 6,
                zoom: 4
            }
        );
    }

    #[test]
    fn test_range_grows_with_zoom() {
        let extent = Extent::new(135.0, 34.0, 140.0, 36.0).unwrap();
        let small = TileRange::from_extent(&extent, 6).unwrap();
        let large = TileRange::from_extent(&extent, 12).unwrap();
        assert!(large.count() > small.count());
    }

    #[test]
    fn test_full_latitude_extent_is_clamped() {
        // ymin/ymax beyond the Web Mercator band must not error
        let extent = Extent {
            xmin: -180.0,
            ymin: -90.0,
            xmax: 180.0,
            ymax: 90.0,
        };
        let range = TileRange::from_extent(&extent, 3).unwrap();
        assert_eq!(range.count(), 64);
    }

    mod property_tests {
        use super::super::super::{MAX_LAT, MIN_LAT};
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_range_covers_its_corners(
                lon_a in -179.0..179.0_f64,
                lat_a in -80.0..80.0_f64,
                dlon in 0.0..1.0_f64,
                dlat in 0.0..1.0_f64,
                zoom in 0u8..=14
            ) {
                let extent = Extent::new(
                    lon_a,
                    lat_a,
                    (lon_a + dlon).min(180.0),
                    (lat_a + dlat).min(85.05),
                ).unwrap();
                let range = TileRange::from_extent(&extent, zoom)?;

                let nw = to_tile_coords(extent.ymax.clamp(MIN_LAT, MAX_LAT), extent.xmin, zoom)?;
                let se = to_tile_coords(extent.ymin.clamp(MIN_LAT, MAX_LAT), extent.xmax, zoom)?;

                prop_assert!(range.col_min <= nw.col && nw.col <= range.col_max);
                prop_assert!(range.row_min <= nw.row && nw.row <= range.row_max);
                prop_assert!(range.col_min <= se.col && se.col <= range.col_max);
                prop_assert!(range.row_min <= se.row && se.row <= range.row_max);
            }

            #[test]
            fn test_count_is_positive(
                lon in -179.0..179.0_f64,
                lat in -80.0..80.0_f64,
                zoom in 0u8..=16
            ) {
                let extent = Extent::new(lon, lat, lon, lat).unwrap();
                let range = TileRange::from_extent(&extent, zoom)?;
                prop_assert!(range.count() >= 1);
            }
        }
    }
}
