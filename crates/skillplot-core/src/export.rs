//! Chart export
//!
//! Supports writing a scene to:
//! - SVG: the chart as drawn, through a plotters `SVGBackend`
//! - JSON: the scene itself, including every point's tooltip, for other
//!   renderers
//!
//! SVG has no per-point hover text; the highlighted point's tooltip is drawn
//! as a label beside it instead.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{validation, ExportError, ExportResult};
use crate::format::{display2, format_percent};
use crate::render::{AxisOrient, AxisPrimitive, PathPrimitive, PointPrimitive, Rgb};
use crate::scene::{Scene, SceneStatus};

const TICK_SIZE: i32 = 6;
const FONT_SIZE: f64 = 10.0;

/// Export format for charts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// SVG scalable vector graphics
    Svg,
    /// Serialized scene
    Json,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
        }
    }

    /// Pick a format from the output file extension
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat { extension }),
        }
    }
}

/// Render a scene as a standalone SVG document
pub fn render_svg(scene: &Scene) -> ExportResult<String> {
    validation::validate_dimensions(scene.width, scene.height)?;
    let size = (scene.width.round() as u32, scene.height.round() as u32);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_scene(&root, scene).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

/// Serialize a scene as pretty JSON
pub fn scene_json(scene: &Scene) -> ExportResult<String> {
    serde_json::to_string_pretty(scene).map_err(|e| ExportError::Serialize {
        message: e.to_string(),
    })
}

/// Write a ready scene to `path`
pub fn export_scene(scene: &Scene, format: ExportFormat, path: &Path) -> ExportResult<()> {
    validation::validate_dimensions(scene.width, scene.height)?;
    match &scene.status {
        SceneStatus::Ready => {}
        SceneStatus::Loading => {
            return Err(ExportError::NotReady {
                reason: "dataset not loaded".to_string(),
            })
        }
        SceneStatus::Unavailable(reason) => {
            return Err(ExportError::NotReady {
                reason: reason.clone(),
            })
        }
    }

    let content = match format {
        ExportFormat::Svg => render_svg(scene)?,
        ExportFormat::Json => scene_json(scene)?,
    };
    std::fs::write(path, content).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(
        "Exported {} chart as {} to {:?}",
        scene.kind.name(),
        format.mime_type(),
        path
    );
    Ok(())
}

fn render_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Render {
        message: e.to_string(),
    }
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn draw_scene<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    for axis in &scene.axes {
        draw_axis(root, axis)?;
    }
    for curve in &scene.curves {
        draw_curve(root, curve)?;
    }
    for point in scene.points_in_draw_order() {
        draw_point(root, point)?;
    }
    if let Some(point) = scene.highlighted() {
        let label = format!(
            "{}  μ {}  σ {}",
            point.tooltip.team,
            display2(point.tooltip.mu),
            display2(point.tooltip.sigma)
        );
        let at = (px(point.cx + point.radius + 2.0), px(point.cy));
        root.draw(&Text::new(label, at, text_style(HPos::Left, VPos::Center)))?;
    }

    let mut captions = Vec::new();
    if let Some(readout) = &scene.readout {
        captions.push(format!(
            "{}  rank {}  μ {}  σ {}",
            readout.team,
            display2(readout.rank),
            display2(readout.mu),
            display2(readout.sigma)
        ));
    }
    if let Some(matchup) = &scene.matchup {
        let mut text = format!(
            "P(left wins) {}",
            format_percent(matchup.left_win_probability)
        );
        if let Some(q) = matchup.quality {
            text.push_str(&format!("  quality {}", format_percent(q)));
        }
        captions.push(text);
    }
    for (i, caption) in captions.into_iter().enumerate() {
        let at = (4, 4 + 14 * i as i32);
        root.draw(&Text::new(caption, at, text_style(HPos::Left, VPos::Top)))?;
    }
    Ok(())
}

fn draw_axis<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, axis: &AxisPrimitive) -> DrawResult<DB> {
    let (a, b) = (px(axis.extent.0), px(axis.extent.1));
    let o = px(axis.offset);
    match axis.orient {
        AxisOrient::Bottom => {
            root.draw(&PathElement::new(vec![(a, o), (b, o)], BLACK))?;
            for tick in &axis.ticks {
                let x = px(tick.position);
                root.draw(&PathElement::new(vec![(x, o), (x, o + TICK_SIZE)], BLACK))?;
                let at = (x, o + TICK_SIZE + 2);
                root.draw(&Text::new(tick.label.as_str(), at, text_style(HPos::Center, VPos::Top)))?;
            }
            if let Some(label) = &axis.label {
                let at = ((a + b) / 2, o + TICK_SIZE + 18);
                root.draw(&Text::new(label.as_str(), at, text_style(HPos::Center, VPos::Top)))?;
            }
        }
        AxisOrient::Left => {
            root.draw(&PathElement::new(vec![(o, a), (o, b)], BLACK))?;
            for tick in &axis.ticks {
                let y = px(tick.position);
                root.draw(&PathElement::new(vec![(o - TICK_SIZE, y), (o, y)], BLACK))?;
                let at = (o - TICK_SIZE - 3, y);
                root.draw(&Text::new(tick.label.as_str(), at, text_style(HPos::Right, VPos::Center)))?;
            }
            if let Some(label) = &axis.label {
                let at = (o + 4, a.min(b) + 4);
                root.draw(&Text::new(label.as_str(), at, text_style(HPos::Left, VPos::Top)))?;
            }
        }
    }
    Ok(())
}

fn draw_curve<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, curve: &PathPrimitive) -> DrawResult<DB> {
    let points: Vec<(i32, i32)> = curve.points.iter().map(|&(x, y)| (px(x), px(y))).collect();
    if points.len() < 2 {
        return Ok(());
    }
    root.draw(&Polygon::new(
        points.clone(),
        rgb(curve.fill).mix(curve.fill_opacity).filled(),
    ))?;
    root.draw(&PathElement::new(points, rgb(curve.stroke).stroke_width(1)))?;
    Ok(())
}

fn draw_point<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, point: &PointPrimitive) -> DrawResult<DB> {
    let center = (px(point.cx), px(point.cy));
    let radius = point.radius.round().max(1.0) as u32;
    root.draw(&Circle::new(
        center,
        radius,
        rgb(point.style.fill).mix(point.style.fill_opacity).filled(),
    ))?;
    if let Some(stroke) = point.style.stroke {
        root.draw(&Circle::new(center, radius, rgb(stroke).stroke_width(1)))?;
    }
    Ok(())
}

fn text_style(h: HPos, v: VPos) -> TextStyle<'static> {
    FontDesc::new(FontFamily::SansSerif, FONT_SIZE, FontStyle::Normal)
        .color(&BLACK)
        .pos(Pos::new(h, v))
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Scene pixels to backend pixels
fn px(value: f64) -> i32 {
    value.round() as i32
}
