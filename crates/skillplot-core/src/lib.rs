//! skillplot-core - Chart engine for team rating visualization
//!
//! This crate turns a loaded rating table into render commands for two
//! charts that share one controller implementation:
//!
//! - **Scatter**: one point per team at (μ, σ), with a highlighted match
//! - **Density**: Gaussian curves for a left and a right team, compared
//!
//! # Key Components
//!
//! - **Scale**: linear domain → pixel mappings derived from the table
//! - **ChartController**: explicit `Empty | Unavailable | Ready` state and the
//!   per-keystroke `on_query` lookup and redraw
//! - **Scene**: retained render surface keyed by record, painted by the
//!   terminal front end and the SVG exporter
//! - **ChartSession**: application state owning both charts
//!
//! Queries are handled synchronously and fully recompute on every call.
//! There is no debouncing, which is fine for tables of a few hundred teams.

pub mod chart;
pub mod config;
pub mod curve;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod render;
pub mod scale;
pub mod scene;
pub mod session;

pub use chart::*;
pub use config::*;
pub use curve::*;
pub use error::*;
pub use export::{export_scene, render_svg, scene_json, ExportFormat};
pub use format::*;
pub use model::*;
pub use render::*;
pub use scale::*;
pub use scene::*;
pub use session::*;

pub use skillplot_io::{RatingRecord, RatingTable, RecordId};
