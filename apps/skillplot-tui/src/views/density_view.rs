//! Density view: the left and right teams' rating curves

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use skillplot_core::{Scale, Scene};

use super::{color, domain_labels, draw_status, to_data};

const TITLE: &str = " Density ";

pub struct DensityView;

impl DensityView {
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

        let curves: Vec<(String, Color, Vec<(f64, f64)>)> = scene
            .curves
            .iter()
            .map(|c| {
                let data = c.points.iter().map(|&p| to_data(scale, p)).collect();
                (c.team.clone(), color(c.stroke), data)
            })
            .collect();

        let datasets: Vec<Dataset> = curves
            .iter()
            .map(|(team, fg, data)| {
                Dataset::default()
                    .name(team.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*fg))
                    .data(data)
            })
            .collect();

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
                    .bounds([y.0, y.1])
                    .labels(domain_labels(y, Some(4))),
            );
        frame.render_widget(chart, area);
    }
}
