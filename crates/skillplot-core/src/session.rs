//! Application session
//!
//! A session owns both charts and their scenes. The dataset is loaded once
//! and shared between them; each query field is routed to the chart and slot
//! it belongs to.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chart::{ChartController, ChartKind, Slot};
use crate::config::SkillplotConfig;
use crate::error::SkillplotResult;
use crate::render::{RenderCommand, RenderSurface};
use crate::scene::Scene;
use skillplot_io::RatingTable;
use skillplot_stats::SummaryStats;

/// The three query inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    /// Scatter chart team
    Team,
    /// Density chart, left slot
    Left,
    /// Density chart, right slot
    Right,
}

impl QueryField {
    pub const ALL: [QueryField; 3] = [QueryField::Team, QueryField::Left, QueryField::Right];

    pub fn chart(&self) -> ChartKind {
        match self {
            QueryField::Team => ChartKind::Scatter,
            QueryField::Left | QueryField::Right => ChartKind::Density,
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            QueryField::Right => Slot::Right,
            QueryField::Team | QueryField::Left => Slot::Left,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryField::Team => "Team",
            QueryField::Left => "Blue",
            QueryField::Right => "Red",
        }
    }
}

/// `mu` and `sigma` column summaries
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub mu: SummaryStats,
    pub sigma: SummaryStats,
}

impl DatasetSummary {
    pub fn from_table(table: &RatingTable) -> Self {
        Self {
            records: table.len(),
            mu: SummaryStats::from_data(&table.mus()),
            sigma: SummaryStats::from_data(&table.sigmas()),
        }
    }
}

/// Both charts and what they currently show
#[derive(Clone, Debug)]
pub struct ChartSession {
    scatter: ChartController,
    density: ChartController,
    scatter_scene: Scene,
    density_scene: Scene,
    summary: Option<DatasetSummary>,
}

impl ChartSession {
    pub fn new(config: &SkillplotConfig) -> Self {
        let scatter = ChartController::scatter(config);
        let density = ChartController::density(config);
        Self {
            scatter_scene: Scene::for_chart(&scatter),
            density_scene: Scene::for_chart(&density),
            scatter,
            density,
            summary: None,
        }
    }

    /// Deliver the dataset load result to both charts
    ///
    /// Queries typed while loading are replayed so the scenes match the
    /// current field contents. Returns the replayed commands, one per
    /// non-empty field; a failed load replays nothing.
    pub fn load(
        &mut self,
        result: SkillplotResult<Arc<RatingTable>>,
    ) -> Vec<(QueryField, RenderCommand)> {
        match result {
            Ok(table) => {
                self.summary = Some(DatasetSummary::from_table(&table));
                let command = self.scatter.load(Ok(Arc::clone(&table)));
                self.scatter_scene.apply(&command);
                let command = self.density.load(Ok(table));
                self.density_scene.apply(&command);
                self.replay()
            }
            Err(e) => {
                let message = e.to_string();
                let command = self.scatter.fail(message.clone());
                self.scatter_scene.apply(&command);
                let command = self.density.fail(message);
                self.density_scene.apply(&command);
                Vec::new()
            }
        }
    }

    /// Route a query to its chart and apply the result
    pub fn on_query(&mut self, field: QueryField, text: &str) -> RenderCommand {
        let (chart, scene) = self.chart_mut(field.chart());
        let command = chart.on_query(field.slot(), text);
        scene.apply(&command);
        command
    }

    /// Current text of a field as last seen by its chart
    pub fn query(&self, field: QueryField) -> &str {
        self.chart(field.chart()).query(field.slot())
    }

    pub fn chart(&self, kind: ChartKind) -> &ChartController {
        match kind {
            ChartKind::Scatter => &self.scatter,
            ChartKind::Density => &self.density,
        }
    }

    pub fn scene(&self, kind: ChartKind) -> &Scene {
        match kind {
            ChartKind::Scatter => &self.scatter_scene,
            ChartKind::Density => &self.density_scene,
        }
    }

    pub fn summary(&self) -> Option<&DatasetSummary> {
        self.summary.as_ref()
    }

    fn chart_mut(&mut self, kind: ChartKind) -> (&mut ChartController, &mut Scene) {
        match kind {
            ChartKind::Scatter => (&mut self.scatter, &mut self.scatter_scene),
            ChartKind::Density => (&mut self.density, &mut self.density_scene),
        }
    }

    fn replay(&mut self) -> Vec<(QueryField, RenderCommand)> {
        let mut replayed = Vec::new();
        for field in QueryField::ALL {
            let text = self.query(field).to_string();
            if !text.is_empty() {
                replayed.push((field, self.on_query(field, &text)));
            }
        }
        replayed
    }
}
