//! Coordinate reference systems.
//!
//! Tile schemes are native to Web Mercator (EPSG:3857). Two concerns hang
//! off that fact:
//!
//! - the frame/graticule overlay is only drawn when the active CRS *is*
//!   the native one; any other CRS skips it with a reported reason rather
//!   than erroring, and
//! - reprojecting tiles into a non-native CRS is an optional capability.
//!   Web Mercator ⇄ WGS84 is built in; every other pair needs an external
//!   [`Reprojector`], and asking without one installed is a hard error.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::i18n::Translator;

/// Catalogue context for CRS-related messages.
const CONTEXT: &str = "TileLayer";

/// Earth radius used by the spherical Web Mercator projection (metres).
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A coordinate reference system identified by its EPSG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs(u32);

/// Web Mercator, the native CRS of XYZ/TMS tile schemes.
pub const EPSG_3857: Crs = Crs(3857);

/// WGS84 geographic coordinates.
pub const EPSG_4326: Crs = Crs(4326);

impl Crs {
    /// Creates a CRS from a bare EPSG code.
    pub fn from_epsg(code: u32) -> Self {
        Self(code)
    }

    /// The EPSG code.
    pub fn epsg(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for Crs {
    type Err = String;

    /// Accepts `EPSG:3857` and bare `3857`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .strip_prefix("EPSG:")
            .or_else(|| s.trim().strip_prefix("epsg:"))
            .unwrap_or_else(|| s.trim());
        code.parse::<u32>()
            .map(Crs)
            .map_err(|_| format!("unrecognized CRS: {s}"))
    }
}

/// Errors from CRS operations.
#[derive(Debug, Error)]
pub enum CrsError {
    /// Requested transform has no installed capability.
    #[error("No reprojection capability for {from} -> {to}")]
    ReprojectionUnavailable {
        /// Source CRS.
        from: Crs,
        /// Target CRS.
        to: Crs,
    },
}

impl CrsError {
    /// Renders the condition for display in the user's locale.
    pub fn localized_message(&self, tr: &Translator) -> String {
        match self {
            CrsError::ReprojectionUnavailable { .. } => tr
                .tr(CONTEXT, "Reprojection capability is not available")
                .into_owned(),
        }
    }
}

/// Optional coordinate-transform capability.
///
/// Implementations register with a [`CrsRegistry`]; the registry falls
/// back to them for any pair the built-in Web Mercator transform does not
/// cover.
pub trait Reprojector: Send + Sync {
    /// Whether the implementation can transform between the pair.
    fn supports(&self, from: Crs, to: Crs) -> bool;

    /// Transforms one coordinate pair.
    fn transform(&self, from: Crs, to: Crs, x: f64, y: f64) -> Result<(f64, f64), CrsError>;
}

/// Decision on whether to draw the frame/graticule overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePlan {
    /// Active CRS is the tile scheme's native system; draw the overlay.
    Draw,
    /// Any other CRS; skip the overlay and report why.
    Skipped {
        /// Localized reason shown to the user.
        reason: String,
    },
}

/// Plans the frame overlay for the active CRS.
pub fn plan_frame_overlay(active_crs: Crs, tr: &Translator) -> FramePlan {
    if active_crs == EPSG_3857 {
        FramePlan::Draw
    } else {
        FramePlan::Skipped {
            reason: tr
                .tr(CONTEXT, "Frame layer is drawn only in EPSG:3857")
                .into_owned(),
        }
    }
}

/// Transform dispatch over the built-in projection and optional
/// capabilities.
#[derive(Default)]
pub struct CrsRegistry {
    reprojector: Option<Arc<dyn Reprojector>>,
}

impl CrsRegistry {
    /// Creates a registry with only the built-in Web Mercator transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an external reprojection capability.
    pub fn with_reprojector(mut self, reprojector: Arc<dyn Reprojector>) -> Self {
        self.reprojector = Some(reprojector);
        self
    }

    /// Whether a transform between the pair is possible.
    pub fn supports(&self, from: Crs, to: Crs) -> bool {
        if from == to || is_builtin_pair(from, to) {
            return true;
        }
        self.reprojector
            .as_ref()
            .is_some_and(|r| r.supports(from, to))
    }

    /// Transforms a coordinate pair between systems.
    ///
    /// Identity and Web Mercator ⇄ WGS84 are handled internally; other
    /// pairs go to the installed capability or fail with
    /// [`CrsError::ReprojectionUnavailable`].
    pub fn transform(&self, from: Crs, to: Crs, x: f64, y: f64) -> Result<(f64, f64), CrsError> {
        if from == to {
            return Ok((x, y));
        }
        if from == EPSG_4326 && to == EPSG_3857 {
            return Ok(wgs84_to_mercator(x, y));
        }
        if from == EPSG_3857 && to == EPSG_4326 {
            return Ok(mercator_to_wgs84(x, y));
        }
        match &self.reprojector {
            Some(r) if r.supports(from, to) => r.transform(from, to, x, y),
            _ => Err(CrsError::ReprojectionUnavailable { from, to }),
        }
    }
}

fn is_builtin_pair(from: Crs, to: Crs) -> bool {
    (from == EPSG_4326 && to == EPSG_3857) || (from == EPSG_3857 && to == EPSG_4326)
}

/// Forward spherical Web Mercator: (lon, lat) degrees to metres.
fn wgs84_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon.to_radians() * EARTH_RADIUS_M;
    let y = (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS_M;
    (x, y)
}

/// Inverse spherical Web Mercator: metres to (lon, lat) degrees.
fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}
