//! Coordinate types for the Web Mercator tile grid.

use std::fmt;

use thiserror::Error;

/// Minimum latitude representable in Web Mercator (degrees).
pub const MIN_LAT: f64 = -85.05112878;

/// Maximum latitude representable in Web Mercator (degrees).
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum longitude (degrees).
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude (degrees).
pub const MAX_LON: f64 = 180.0;

/// Minimum supported zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum supported zoom level.
pub const MAX_ZOOM: u8 = 22;

/// Errors produced by coordinate conversions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside the Web Mercator range.
    #[error("Invalid latitude: {0} (must be within [{MIN_LAT}, {MAX_LAT}])")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Invalid longitude: {0} (must be within [{MIN_LON}, {MAX_LON}])")]
    InvalidLongitude(f64),

    /// Zoom level above the supported maximum.
    #[error("Invalid zoom level: {0} (max: {MAX_ZOOM})")]
    InvalidZoom(u8),

    /// Extent with inverted or out-of-range edges.
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),
}

/// A single tile address in the XYZ (top-left origin) grid.
///
/// `col` increases eastward, `row` increases southward. Both are in
/// `0..2^zoom`. Layers whose scheme counts rows from the bottom are
/// converted at URL-building time, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Tile column (X, west to east).
    pub col: u32,
    /// Tile row (Y, north to south).
    pub row: u32,
    /// Zoom level.
    pub zoom: u8,
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Geographic bounding rectangle in degrees.
///
/// Edges are inclusive; `xmin`/`xmax` are longitudes, `ymin`/`ymax` are
/// latitudes. A layer without a recorded extent carries `None` and is
/// displayed as "Not set".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Western edge (longitude).
    pub xmin: f64,
    /// Southern edge (latitude).
    pub ymin: f64,
    /// Eastern edge (longitude).
    pub xmax: f64,
    /// Northern edge (latitude).
    pub ymax: f64,
}

impl Extent {
    /// Creates an extent, validating ordering and geographic bounds.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, CoordError> {
        if !(MIN_LON..=MAX_LON).contains(&xmin) || !(MIN_LON..=MAX_LON).contains(&xmax) {
            return Err(CoordError::InvalidExtent(format!(
                "longitude out of range: [{}, {}]",
                xmin, xmax
            )));
        }
        if !(-90.0..=90.0).contains(&ymin) || !(-90.0..=90.0).contains(&ymax) {
            return Err(CoordError::InvalidExtent(format!(
                "latitude out of range: [{}, {}]",
                ymin, ymax
            )));
        }
        if xmin > xmax || ymin > ymax {
            return Err(CoordError::InvalidExtent(format!(
                "inverted edges: [{}, {}, {}, {}]",
                xmin, ymin, xmax, ymax
            )));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// The whole Web Mercator world.
    pub fn world() -> Self {
        Self {
            xmin: MIN_LON,
            ymin: MIN_LAT,
            xmax: MAX_LON,
            ymax: MAX_LAT,
        }
    }

    /// Intersection with another extent, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Extent) -> Option<Extent> {
        let xmin = self.xmin.max(other.xmin);
        let ymin = self.ymin.max(other.ymin);
        let xmax = self.xmax.min(other.xmax);
        let ymax = self.ymax.min(other.ymax);
        if xmin > xmax || ymin > ymax {
            None
        } else {
            Some(Extent {
                xmin,
                ymin,
                xmax,
                ymax,
            })
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.8}, {:.8}) - ({:.8}, {:.8})",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_new_valid() {
        let extent = Extent::new(135.0, 34.0, 140.0, 36.0).unwrap();
        assert_eq!(extent.xmin, 135.0);
        assert_eq!(extent.ymax, 36.0);
    }

    #[test]
    fn test_extent_rejects_inverted_edges() {
        let result = Extent::new(140.0, 34.0, 135.0, 36.0);
        assert!(matches!(result, Err(CoordError::InvalidExtent(_))));
    }

    #[test]
    fn test_extent_rejects_bad_longitude() {
        let result = Extent::new(-200.0, 0.0, 0.0, 1.0);
        assert!(matches!(result, Err(CoordError::InvalidExtent(_))));
    }

    #[test]
    fn test_extent_intersect_overlap() {
        let a = Extent::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Extent::new(5.0, 5.0, 15.0, 15.0).unwrap();
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, Extent::new(5.0, 5.0, 10.0, 10.0).unwrap());
    }

    #[test]
    fn test_extent_intersect_disjoint() {
        let a = Extent::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Extent::new(2.0, 2.0, 3.0, 3.0).unwrap();
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_tile_coord_display() {
        let tile = TileCoord {
            col: 57,
            row: 25,
            zoom: 6,
        };
        assert_eq!(tile.to_string(), "6/57/25");
    }
}
