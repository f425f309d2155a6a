//! Single-line query field

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A labelled text field whose border shows focus and lookup result
pub struct QueryInput<'a> {
    label: &'a str,
    text: &'a str,
    focused: bool,
    missed: bool,
    accent: Color,
}

impl<'a> QueryInput<'a> {
    pub fn new(label: &'a str, text: &'a str) -> Self {
        Self {
            label,
            text,
            focused: false,
            missed: false,
            accent: Color::Cyan,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Mark the current text as matching no team
    pub fn missed(mut self, missed: bool) -> Self {
        self.missed = missed;
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    pub fn border_color(&self) -> Color {
        match (self.focused, self.missed) {
            (_, true) => Color::Red,
            (true, false) => self.accent,
            (false, false) => Color::DarkGray,
        }
    }
}

impl Widget for QueryInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(self.text)];
        if self.focused {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()));
        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_colors() {
        assert_eq!(QueryInput::new("Team", "").border_color(), Color::DarkGray);
        assert_eq!(
            QueryInput::new("Team", "A").focused(true).border_color(),
            Color::Cyan
        );
        assert_eq!(
            QueryInput::new("Team", "Z").focused(true).missed(true).border_color(),
            Color::Red
        );
    }

    #[test]
    fn test_render_shows_label_and_text() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        QueryInput::new("Blue", "254").render(area, &mut buf);
        let row: String = (0u16..20).map(|x| buf[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains("254"));
        let top: String = (0u16..20).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert!(top.contains("Blue"));
    }
}
