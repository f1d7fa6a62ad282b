//! TileStream - batched XYZ/TMS tile fetching with a localized surface
//!
//! This library turns a tile layer definition (URL template, zoom range,
//! optional extent, y-origin convention) plus a geographic viewport into a
//! bounded, cache-aware batch of tile downloads, and renders every
//! user-facing message through a translation catalogue.
//!
//! The main pieces:
//!
//! - [`coord`] - Web Mercator tile arithmetic and extent/range types.
//! - [`layer`] - layer definitions and the TSV definition-file parser.
//! - [`provider`] - HTTP client abstraction and URL-template expansion.
//! - [`cache`] - async tile cache trait with an in-memory implementation.
//! - [`fetch`] - the batch coordinator: planning, fan-out, timeouts,
//!   summaries.
//! - [`crs`] - EPSG codes, the frame-overlay gate, and optional
//!   reprojection.
//! - [`i18n`] - the translation catalogue and positional placeholder
//!   formatting.
//! - [`config`] - INI-persisted user settings.

pub mod cache;
pub mod config;
pub mod coord;
pub mod crs;
pub mod fetch;
pub mod i18n;
pub mod layer;
pub mod provider;
