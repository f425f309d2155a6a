//! Render primitives and commands
//!
//! The controller never paints. It emits `RenderCommand`s carrying fully
//! formed pixel coordinates and style attributes; a `RenderSurface` applies
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chart::Slot;
use crate::scale::Tick;
use skillplot_io::RecordId;

/// An sRGB color, written as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const CORAL: Rgb = Rgb::new(0xff, 0x7f, 0x50);
    pub const BLUE: Rgb = Rgb::new(0x1f, 0x75, 0xb7);
    pub const RED: Rgb = Rgb::new(0xe9, 0x37, 0x3d);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {}", s))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("color must be #rrggbb: {}", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{}: {}", s, e))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Fill and outline of a scatter point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub fill: Rgb,
    pub fill_opacity: f64,
    pub stroke: Option<Rgb>,
}

/// Hover metadata attached to a point, values rounded for display
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub team: String,
    pub mu: f64,
    pub sigma: f64,
}

/// A scatter point in pixel space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointPrimitive {
    pub id: RecordId,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub style: PointStyle,
    pub tooltip: Tooltip,
}

/// A filled polyline in pixel space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub slot: Slot,
    pub team: String,
    pub points: Vec<(f64, f64)>,
    pub stroke: Rgb,
    pub fill: Rgb,
    pub fill_opacity: f64,
}

impl PathPrimitive {
    /// SVG path data, `M x,y L x,y ...`
    pub fn path_data(&self) -> String {
        let mut d = String::with_capacity(self.points.len() * 16);
        for (i, (x, y)) in self.points.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&format!("{:.2},{:.2}", x, y));
        }
        d
    }
}

/// Axis placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrient {
    Bottom,
    Left,
}

/// An axis with ticks already placed in pixel space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisPrimitive {
    pub orient: AxisOrient,
    /// Pixel position of the axis line on the cross axis
    pub offset: f64,
    /// Pixel extent along the axis
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
    pub label: Option<String>,
}

/// Values reported for a highlighted team, rounded to 2 decimals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub team: String,
    pub rank: f64,
    pub mu: f64,
    pub sigma: f64,
}

/// Head-to-head prediction for the two density slots
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    /// Probability that the left team wins
    pub left_win_probability: f64,
    /// Draw quality in (0, 1]
    pub quality: Option<f64>,
}

/// Whether a query found a record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOutcome {
    Matched,
    LookupMiss,
}

/// A single update for a render surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// The chart is not ready; nothing changes
    Ignored,
    /// Loading failed; show the message and stay non-interactive
    Unavailable { message: String },
    /// Initial draw once records are loaded
    DrawChart {
        axes: Vec<AxisPrimitive>,
        points: Vec<PointPrimitive>,
    },
    /// Reset every point to `default_style`, then restyle `target`
    Highlight {
        default_style: PointStyle,
        target: Option<(RecordId, PointStyle)>,
        readout: Option<Readout>,
        outcome: QueryOutcome,
    },
    /// Remove all curves and draw these instead
    ReplaceCurves {
        curves: Vec<PathPrimitive>,
        matchup: Option<Matchup>,
        outcome: QueryOutcome,
    },
}

impl RenderCommand {
    /// Lookup result of a query command
    pub fn outcome(&self) -> Option<QueryOutcome> {
        match self {
            RenderCommand::Highlight { outcome, .. }
            | RenderCommand::ReplaceCurves { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    pub fn is_lookup_miss(&self) -> bool {
        self.outcome() == Some(QueryOutcome::LookupMiss)
    }
}

/// Anything that can apply render commands
pub trait RenderSurface {
    fn apply(&mut self, command: &RenderCommand);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let c: Rgb = "#1f75b7".parse().unwrap();
        assert_eq!(c, Rgb::BLUE);
        assert_eq!(c.to_string(), "#1f75b7");
        assert_eq!("#FF7F50".parse::<Rgb>().unwrap(), Rgb::CORAL);
    }

    #[test]
    fn test_rgb_rejects_malformed() {
        assert!("1f75b7".parse::<Rgb>().is_err());
        assert!("#1f75".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_serde_as_string() {
        let json = serde_json::to_string(&Rgb::RED).unwrap();
        assert_eq!(json, "\"#e9373d\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::RED);
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }

    #[test]
    fn test_path_data() {
        let path = PathPrimitive {
            slot: Slot::Left,
            team: "A".to_string(),
            points: vec![(1.0, 2.0), (3.5, 4.25)],
            stroke: Rgb::BLUE,
            fill: Rgb::BLUE,
            fill_opacity: 0.5,
        };
        assert_eq!(path.path_data(), "M1.00,2.00L3.50,4.25");
    }

    #[test]
    fn test_outcome() {
        assert_eq!(RenderCommand::Ignored.outcome(), None);
        let cmd = RenderCommand::ReplaceCurves {
            curves: vec![],
            matchup: None,
            outcome: QueryOutcome::LookupMiss,
        };
        assert!(cmd.is_lookup_miss());
    }
}
