//! The tile layer definition type and its display helpers.

use std::fmt;
use std::str::FromStr;

use crate::coord::Extent;
use crate::i18n::Translator;

/// Vertical origin convention of a tile grid.
///
/// XYZ-style schemes count rows from the top (north) edge, TMS-style
/// schemes from the bottom (south) edge. The convention only matters when
/// building tile URLs; all internal arithmetic uses the top-left form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YOrigin {
    /// Row 0 at the northern edge (XYZ / slippy-map convention).
    #[default]
    TopLeft,
    /// Row 0 at the southern edge (TMS convention).
    BottomLeft,
}

impl fmt::Display for YOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YOrigin::TopLeft => write!(f, "top-left"),
            YOrigin::BottomLeft => write!(f, "bottom-left"),
        }
    }
}

impl FromStr for YOrigin {
    type Err = String;

    /// Accepts the numeric flag used by layer-definition files (1 = top
    /// origin) as well as spelled-out names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "top" | "top-left" | "topleft" | "xyz" => Ok(YOrigin::TopLeft),
            "0" | "bottom" | "bottom-left" | "bottomleft" | "tms" => Ok(YOrigin::BottomLeft),
            other => Err(format!("unrecognized y-origin: {other}")),
        }
    }
}

/// Inclusive zoom range served by a layer, with `zmin <= zmax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    /// Smallest zoom level with native tiles.
    pub zmin: u8,
    /// Largest zoom level with native tiles.
    pub zmax: u8,
}

impl ZoomRange {
    /// Creates a zoom range, rejecting `zmin > zmax`.
    pub fn new(zmin: u8, zmax: u8) -> Result<Self, String> {
        if zmin > zmax {
            return Err(format!("zmin {zmin} exceeds zmax {zmax}"));
        }
        Ok(Self { zmin, zmax })
    }

    /// Whether the zoom level is within the range.
    pub fn contains(&self, zoom: u8) -> bool {
        (self.zmin..=self.zmax).contains(&zoom)
    }
}

impl fmt::Display for ZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.zmin, self.zmax)
    }
}

/// Definition of one tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerDefinition {
    /// Display title.
    pub title: String,

    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,

    /// Zoom levels the layer serves natively.
    pub zoom_range: ZoomRange,

    /// Geographic coverage; `None` renders as "Not set".
    pub extent: Option<Extent>,

    /// Vertical origin convention of the layer's grid.
    pub y_origin: YOrigin,

    /// Attribution text shown with the layer, if any.
    pub credit: Option<String>,
}

impl TileLayerDefinition {
    /// Creates a definition with defaults: world-unbounded extent, top-left
    /// origin, no credit.
    pub fn new(
        title: impl Into<String>,
        url_template: impl Into<String>,
        zoom_range: ZoomRange,
    ) -> Self {
        Self {
            title: title.into(),
            url_template: url_template.into(),
            zoom_range,
            extent: None,
            y_origin: YOrigin::default(),
            credit: None,
        }
    }

    /// Sets the geographic extent.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Sets the y-origin convention.
    pub fn with_y_origin(mut self, y_origin: YOrigin) -> Self {
        self.y_origin = y_origin;
        self
    }

    /// Sets the credit (attribution) text.
    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.credit = Some(credit.into());
        self
    }

    /// Renders the layer metadata listing shown to users.
    ///
    /// Labels and the "Not set" marker are localized through the
    /// `TileLayer` catalogue context; values are shown as recorded.
    pub fn properties(&self, tr: &Translator) -> String {
        const CONTEXT: &str = "TileLayer";
        let mut lines = Vec::with_capacity(6);
        lines.push(format!("{}: {}", tr.tr(CONTEXT, "Title"), self.title));
        lines.push(format!(
            "{}: {}",
            tr.tr(CONTEXT, "Credit"),
            self.credit.as_deref().unwrap_or("")
        ));
        lines.push(format!("{}: {}", tr.tr(CONTEXT, "URL"), self.url_template));
        lines.push(format!("{}: {}", tr.tr(CONTEXT, "yOrigin"), self.y_origin));
        lines.push(format!(
            "{}: {}",
            tr.tr(CONTEXT, "Zoom range"),
            self.zoom_range
        ));
        let extent = match &self.extent {
            Some(extent) => extent.to_string(),
            None => tr.tr(CONTEXT, "Not set").into_owned(),
        };
        lines.push(format!("{}: {}", tr.tr(CONTEXT, "Layer Extent"), extent));
        lines.join("\n")
    }
}
