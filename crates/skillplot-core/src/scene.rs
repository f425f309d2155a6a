//! Retained scene for one chart
//!
//! Holds what is currently on screen, with every scatter point keyed by its
//! record so a highlight can restyle it in place. The terminal views and the
//! exporter both paint from a `Scene`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chart::{ChartController, ChartKind};
use crate::render::{
    AxisPrimitive, Matchup, PathPrimitive, PointPrimitive, Readout, RenderCommand, RenderSurface,
};
use skillplot_io::RecordId;

/// What a scene is able to show
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    Loading,
    Ready,
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub kind: ChartKind,
    pub width: f64,
    pub height: f64,
    pub status: SceneStatus,
    pub axes: Vec<AxisPrimitive>,
    pub points: BTreeMap<RecordId, PointPrimitive>,
    pub highlighted: Option<RecordId>,
    pub curves: Vec<PathPrimitive>,
    pub readout: Option<Readout>,
    pub matchup: Option<Matchup>,
}

impl Scene {
    pub fn new(kind: ChartKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            status: SceneStatus::Loading,
            axes: Vec::new(),
            points: BTreeMap::new(),
            highlighted: None,
            curves: Vec::new(),
            readout: None,
            matchup: None,
        }
    }

    /// An empty scene sized for `chart`
    pub fn for_chart(chart: &ChartController) -> Self {
        let (width, height) = chart.size();
        Self::new(chart.kind(), width, height)
    }

    pub fn is_ready(&self) -> bool {
        self.status == SceneStatus::Ready
    }

    pub fn highlighted(&self) -> Option<&PointPrimitive> {
        self.highlighted.and_then(|id| self.points.get(&id))
    }

    /// Points in paint order, the highlighted one last so it sits on top
    pub fn points_in_draw_order(&self) -> impl Iterator<Item = &PointPrimitive> {
        self.points
            .values()
            .filter(move |p| Some(p.id) != self.highlighted)
            .chain(self.highlighted())
    }
}

impl RenderSurface for Scene {
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::Ignored => {}
            RenderCommand::Unavailable { message } => {
                self.status = SceneStatus::Unavailable(message.clone());
            }
            RenderCommand::DrawChart { axes, points } => {
                self.status = SceneStatus::Ready;
                self.axes = axes.clone();
                self.points = points.iter().map(|p| (p.id, p.clone())).collect();
                self.highlighted = None;
                self.curves.clear();
                self.readout = None;
                self.matchup = None;
            }
            RenderCommand::Highlight {
                default_style,
                target,
                readout,
                ..
            } => {
                for point in self.points.values_mut() {
                    point.style = *default_style;
                }
                self.highlighted = None;
                if let Some((id, style)) = target {
                    if let Some(point) = self.points.get_mut(id) {
                        point.style = *style;
                        self.highlighted = Some(*id);
                    }
                }
                self.readout = readout.clone();
            }
            RenderCommand::ReplaceCurves {
                curves, matchup, ..
            } => {
                self.curves = curves.clone();
                self.matchup = *matchup;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Slot;
    use crate::config::SkillplotConfig;
    use crate::render::Rgb;
    use skillplot_io::{RatingRecord, RatingTable};
    use std::sync::Arc;

    fn loaded(kind: ChartKind) -> (ChartController, Scene) {
        let table = RatingTable::new(vec![
            RatingRecord::new("A", 1500.0, 200.0, 2.0),
            RatingRecord::new("B", 1600.0, 150.0, 1.0),
        ]);
        let mut chart = ChartController::new(kind, &SkillplotConfig::default());
        let mut scene = Scene::for_chart(&chart);
        scene.apply(&chart.load(Ok(Arc::new(table))));
        (chart, scene)
    }

    #[test]
    fn test_new_scene_is_loading() {
        let chart = ChartController::scatter(&SkillplotConfig::default());
        let scene = Scene::for_chart(&chart);
        assert_eq!(scene.status, SceneStatus::Loading);
        assert_eq!((scene.width, scene.height), (800.0, 600.0));
    }

    #[test]
    fn test_highlight_moves_between_points() {
        let (mut chart, mut scene) = loaded(ChartKind::Scatter);
        scene.apply(&chart.on_query(Slot::Left, "A"));
        assert_eq!(scene.highlighted, Some(RecordId(0)));

        scene.apply(&chart.on_query(Slot::Left, "B"));
        assert_eq!(scene.highlighted, Some(RecordId(1)));
        assert_eq!(scene.points[&RecordId(0)].style.fill, Rgb::BLACK);
        assert_eq!(scene.points[&RecordId(1)].style.fill, Rgb::CORAL);
        let coral = scene
            .points
            .values()
            .filter(|p| p.style.fill == Rgb::CORAL)
            .count();
        assert_eq!(coral, 1);
    }

    #[test]
    fn test_miss_clears_highlight() {
        let (mut chart, mut scene) = loaded(ChartKind::Scatter);
        scene.apply(&chart.on_query(Slot::Left, "A"));
        scene.apply(&chart.on_query(Slot::Left, "Nobody"));
        assert!(scene.highlighted.is_none());
        assert!(scene.readout.is_none());
        assert!(scene.points.values().all(|p| p.style.fill == Rgb::BLACK));
    }

    #[test]
    fn test_draw_order_puts_highlight_last() {
        let (mut chart, mut scene) = loaded(ChartKind::Scatter);
        scene.apply(&chart.on_query(Slot::Left, "A"));
        let order: Vec<RecordId> = scene.points_in_draw_order().map(|p| p.id).collect();
        assert_eq!(order, vec![RecordId(1), RecordId(0)]);
    }

    #[test]
    fn test_curves_are_replaced() {
        let (mut chart, mut scene) = loaded(ChartKind::Density);
        scene.apply(&chart.on_query(Slot::Left, "A"));
        scene.apply(&chart.on_query(Slot::Right, "B"));
        assert_eq!(scene.curves.len(), 2);
        assert!(scene.matchup.is_some());

        scene.apply(&chart.on_query(Slot::Left, ""));
        assert_eq!(scene.curves.len(), 1);
        assert_eq!(scene.curves[0].team, "B");
        assert!(scene.matchup.is_none());
    }

    #[test]
    fn test_unavailable() {
        let mut scene = Scene::new(ChartKind::Density, 800.0, 200.0);
        scene.apply(&RenderCommand::Unavailable {
            message: "boom".to_string(),
        });
        assert_eq!(scene.status, SceneStatus::Unavailable("boom".to_string()));
        scene.apply(&RenderCommand::Ignored);
        assert!(!scene.is_ready());
    }
}
