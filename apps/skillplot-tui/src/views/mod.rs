//! Chart views
//!
//! Both views paint a `Scene` on a ratatui `Chart`. Scene primitives are in
//! pixel space with y growing downward, so they are mapped back into data
//! space through the chart's scale first.

mod density_view;
mod scatter_view;

pub use density_view::DensityView;
pub use scatter_view::ScatterView;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use skillplot_core::{display2, Rgb, Scale, Scene, SceneStatus};

/// Draw the loading or error state; returns true when the scene is ready
pub(crate) fn draw_status(frame: &mut Frame, area: Rect, title: &str, scene: &Scene) -> bool {
    let (message, color) = match &scene.status {
        SceneStatus::Ready => return true,
        SceneStatus::Loading => ("loading…".to_string(), Color::DarkGray),
        SceneStatus::Unavailable(reason) => (format!("No data: {}", reason), Color::Red),
    };
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
    false
}

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Pixel coordinates back to (μ, value)
pub(crate) fn to_data(scale: &Scale, (px, py): (f64, f64)) -> (f64, f64) {
    (scale.x.invert(px), scale.y.invert(py))
}

/// Labels at both ends and the middle of a domain
pub(crate) fn domain_labels((lo, hi): (f64, f64), precision: Option<usize>) -> Vec<Line<'static>> {
    [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| match precision {
            Some(p) => Line::from(format!("{:.*}", p, v)),
            None => Line::from(display2(v)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillplot_core::LinearScale;

    #[test]
    fn test_to_data_flips_y() {
        let scale = Scale {
            x: LinearScale::new((0.0, 100.0), (40.0, 780.0)),
            y: LinearScale::new((0.0, 200.0), (560.0, 20.0)),
        };
        let (x, y) = to_data(&scale, (40.0, 20.0));
        assert_eq!((x, y), (0.0, 200.0));
    }

    #[test]
    fn test_domain_labels() {
        let labels = domain_labels((1200.0, 1800.0), None);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1], Line::from("1500"));
    }
}
