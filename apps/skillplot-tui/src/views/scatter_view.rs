//! Scatter view: every team at (μ, σ), the queried team highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use skillplot_core::{Scale, Scene};

use super::{color, domain_labels, draw_status, to_data};

const TITLE: &str = " Scatter (μ, σ) ";

pub struct ScatterView;

impl ScatterView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scene: &Scene, scale: Option<&Scale>) {
        if !draw_status(frame, area, TITLE, scene) {
            return;
        }
        let Some(scale) = scale else {
            return;
        };

        let others: Vec<(f64, f64)> = scene
            .points_in_draw_order()
            .filter(|p| Some(p.id) != scene.highlighted)
            .map(|p| to_data(scale, (p.cx, p.cy)))
            .collect();
        let highlighted = scene.highlighted();
        let target: Vec<(f64, f64)> = highlighted
            .map(|p| vec![to_data(scale, (p.cx, p.cy))])
            .unwrap_or_default();

        let mut datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Gray))
            .data(&others)];
        if let Some(point) = highlighted {
            datasets.push(
                Dataset::default()
                    .name(point.tooltip.team.clone())
                    .marker(Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color(point.style.fill)))
                    .data(&target),
            );
        }

        let x = scale.x.domain();
        let y = scale.y.domain();
        let chart = Chart::new(datasets)
            .block(Block::default().title(TITLE).borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .title("μ")
                    .bounds([x.0, x.1])
                    .labels(domain_labels(x, None)),
            )
            .y_axis(
                Axis::default()
                    .title("σ")
                    .bounds([y.0, y.1])
                    .labels(domain_labels(y, None)),
            );
        frame.render_widget(chart, area);
    }
}
