//! Chart state machine and the lookup/redraw controller
//!
//! A chart starts `Empty`, becomes `Ready` once the rating table arrives, or
//! `Unavailable` when loading fails. Queries are only served in `Ready`;
//! anything else returns `RenderCommand::Ignored`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::SkillplotConfig;
use crate::curve::{sample_curve, to_pixels};
use crate::error::SkillplotResult;
use crate::format::round2;
use crate::render::{
    AxisOrient, AxisPrimitive, Matchup, PathPrimitive, PointPrimitive, QueryOutcome, Readout,
    RenderCommand, Rgb, Tooltip,
};
use crate::scale::{build_scale, LinearScale, Scale, YDomain, DEFAULT_TICK_COUNT};
use skillplot_io::{RatingRecord, RatingTable, RecordId};
use skillplot_stats::{match_quality, win_probability};

/// Which of the two charts a controller drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Teams plotted at (μ, σ)
    Scatter,
    /// Two teams' rating densities overlaid
    Density,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Density => "density",
        }
    }
}

/// Query slot of the density chart
///
/// The scatter chart tracks a single query and ignores the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Left, Slot::Right];

    fn index(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Right => 1,
        }
    }
}

/// Loaded data and the scales derived from it
#[derive(Clone, Debug)]
pub struct ReadyChart {
    table: Arc<RatingTable>,
    scale: Scale,
}

impl ReadyChart {
    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }
}

/// Lifecycle of a chart
#[derive(Clone, Debug)]
pub enum ChartState {
    /// Waiting for the dataset
    Empty,
    /// The dataset failed to load; the chart stays non-interactive
    Unavailable { reason: String },
    /// Axes drawn, queries served
    Ready(ReadyChart),
}

/// Turns the loaded table and each query into render commands
#[derive(Clone, Debug)]
pub struct ChartController {
    kind: ChartKind,
    config: SkillplotConfig,
    state: ChartState,
    queries: [String; 2],
}

impl ChartController {
    pub fn new(kind: ChartKind, config: &SkillplotConfig) -> Self {
        Self {
            kind,
            config: config.clone(),
            state: ChartState::Empty,
            queries: [String::new(), String::new()],
        }
    }

    pub fn scatter(config: &SkillplotConfig) -> Self {
        Self::new(ChartKind::Scatter, config)
    }

    pub fn density(config: &SkillplotConfig) -> Self {
        Self::new(ChartKind::Density, config)
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn config(&self) -> &SkillplotConfig {
        &self.config
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready(_))
    }

    pub fn scale(&self) -> Option<&Scale> {
        match &self.state {
            ChartState::Ready(ready) => Some(&ready.scale),
            _ => None,
        }
    }

    /// Last query seen for `slot`, trimmed
    pub fn query(&self, slot: Slot) -> &str {
        &self.queries[self.slot_index(slot)]
    }

    /// Pixel size of this chart
    pub fn size(&self) -> (f64, f64) {
        let geometry = match self.kind {
            ChartKind::Scatter => &self.config.scatter.geometry,
            ChartKind::Density => &self.config.density.geometry,
        };
        (geometry.width, geometry.height)
    }

    /// Complete the dataset load
    ///
    /// On success the chart becomes `Ready` and the initial draw is returned.
    /// On failure it becomes `Unavailable` for good.
    pub fn load(&mut self, result: SkillplotResult<Arc<RatingTable>>) -> RenderCommand {
        match result {
            Ok(table) => {
                let scale = self.build_scale(&table);
                let command = RenderCommand::DrawChart {
                    axes: self.axes(&scale),
                    points: self.points(&table, &scale),
                };
                info!(
                    "{} chart ready with {} records",
                    self.kind.name(),
                    table.len()
                );
                self.state = ChartState::Ready(ReadyChart { table, scale });
                command
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Mark the chart permanently unavailable
    pub fn fail(&mut self, reason: impl Into<String>) -> RenderCommand {
        let message = reason.into();
        warn!("{} chart unavailable: {}", self.kind.name(), message);
        self.state = ChartState::Unavailable {
            reason: message.clone(),
        };
        RenderCommand::Unavailable { message }
    }

    /// Look up `text` in `slot` and produce the redraw
    ///
    /// The text is trimmed, then matched exactly against team names; the
    /// first match wins. A miss is reported through the command's outcome.
    pub fn on_query(&mut self, slot: Slot, text: &str) -> RenderCommand {
        let query = text.trim().to_string();
        let index = self.slot_index(slot);
        self.queries[index] = query;

        let ChartState::Ready(ready) = &self.state else {
            debug!("{} chart not ready, ignoring query", self.kind.name());
            return RenderCommand::Ignored;
        };

        debug!(
            "{} query {:?}: {:?}",
            self.kind.name(),
            slot,
            self.queries[index]
        );
        match self.kind {
            ChartKind::Scatter => self.highlight(ready, &self.queries[index]),
            ChartKind::Density => self.curves(ready, slot),
        }
    }

    fn slot_index(&self, slot: Slot) -> usize {
        match self.kind {
            ChartKind::Scatter => 0,
            ChartKind::Density => slot.index(),
        }
    }

    fn build_scale(&self, table: &RatingTable) -> Scale {
        match self.kind {
            ChartKind::Scatter => {
                let g = &self.config.scatter.geometry;
                build_scale(table, YDomain::Spread, g.x_range(), g.y_range())
            }
            ChartKind::Density => {
                let g = &self.config.density.geometry;
                let y = match self.config.density.density_max {
                    Some(ceiling) => YDomain::Fixed(ceiling),
                    None => YDomain::PeakDensity(self.config.model.variance_mode),
                };
                build_scale(table, y, g.x_range(), g.y_range())
            }
        }
    }

    fn axes(&self, scale: &Scale) -> Vec<AxisPrimitive> {
        let bottom = axis(AxisOrient::Bottom, &scale.x, scale.y.range().0);
        match self.kind {
            ChartKind::Scatter => vec![
                AxisPrimitive {
                    label: Some("μ".to_string()),
                    ..bottom
                },
                AxisPrimitive {
                    label: Some("σ".to_string()),
                    ..axis(AxisOrient::Left, &scale.y, scale.x.range().0)
                },
            ],
            ChartKind::Density => vec![bottom],
        }
    }

    fn points(&self, table: &RatingTable, scale: &Scale) -> Vec<PointPrimitive> {
        if self.kind != ChartKind::Scatter {
            return Vec::new();
        }
        let style = self.config.scatter.default_style();
        table
            .iter()
            .filter(|(_, record)| record.is_plottable())
            .map(|(id, record)| {
                let (cx, cy) = scale.to_pixel(record.mu, record.sigma);
                PointPrimitive {
                    id,
                    cx,
                    cy,
                    radius: self.config.scatter.radius,
                    style,
                    tooltip: Tooltip {
                        team: record.team.clone(),
                        mu: round2(record.mu),
                        sigma: round2(record.sigma),
                    },
                }
            })
            .collect()
    }

    fn highlight(&self, ready: &ReadyChart, query: &str) -> RenderCommand {
        let scatter = &self.config.scatter;
        let found = ready.table.find(query);
        RenderCommand::Highlight {
            default_style: scatter.default_style(),
            target: found.map(|(id, _)| (id, scatter.highlight_style())),
            readout: found.map(|(_, record)| Readout {
                team: record.team.clone(),
                rank: round2(record.rank),
                mu: round2(record.mu),
                sigma: round2(record.sigma),
            }),
            outcome: outcome(found.is_some()),
        }
    }

    fn curves(&self, ready: &ReadyChart, queried: Slot) -> RenderCommand {
        let options = self.config.curve_options();
        let matches: Vec<Option<(RecordId, &RatingRecord)>> = Slot::ALL
            .iter()
            .map(|slot| ready.table.find(&self.queries[slot.index()]))
            .collect();

        let mut curves = Vec::new();
        for (slot, found) in Slot::ALL.iter().zip(&matches) {
            let record = found.map(|(_, r)| r);
            let samples = match sample_curve(record, &ready.scale, &options) {
                Ok(samples) => samples,
                Err(e) => {
                    warn!("no curve for {:?} slot: {}", slot, e);
                    Vec::new()
                }
            };
            if let (Some(record), false) = (record, samples.is_empty()) {
                let color = self.slot_color(*slot);
                curves.push(PathPrimitive {
                    slot: *slot,
                    team: record.team.clone(),
                    points: to_pixels(&samples, &ready.scale),
                    stroke: color,
                    fill: color,
                    fill_opacity: self.config.density.fill_opacity,
                });
            }
        }

        let matchup = match (matches[0], matches[1]) {
            (Some((_, left)), Some((_, right))) => self.matchup(left, right),
            _ => None,
        };

        RenderCommand::ReplaceCurves {
            curves,
            matchup,
            outcome: outcome(matches[queried.index()].is_some()),
        }
    }

    fn matchup(&self, left: &RatingRecord, right: &RatingRecord) -> Option<Matchup> {
        let mode = self.config.model.variance_mode;
        let beta = self.config.model.beta;
        let (left, right) = match (mode.rating(left), mode.rating(right)) {
            (Ok(l), Ok(r)) => (l, r),
            _ => return None,
        };
        Some(Matchup {
            left_win_probability: win_probability(&[left], &[right], beta)?,
            quality: match_quality(left, right, beta),
        })
    }

    fn slot_color(&self, slot: Slot) -> Rgb {
        match slot {
            Slot::Left => self.config.density.left_color,
            Slot::Right => self.config.density.right_color,
        }
    }
}

fn outcome(matched: bool) -> QueryOutcome {
    if matched {
        QueryOutcome::Matched
    } else {
        QueryOutcome::LookupMiss
    }
}

fn axis(orient: AxisOrient, scale: &LinearScale, offset: f64) -> AxisPrimitive {
    AxisPrimitive {
        orient,
        offset,
        extent: scale.range(),
        ticks: scale.ticks(DEFAULT_TICK_COUNT),
        label: None,
    }
}
