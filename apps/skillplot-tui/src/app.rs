//! Application state and main render loop

use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use skillplot_core::{
    display2, format_percent, ChartKind, ChartSession, IoError, QueryField, QueryOutcome,
    SkillplotConfig, SkillplotError,
};

use crate::focus::Focus;
use crate::keybindings::{self, Action};
use crate::loader::LoadResult;
use crate::views::{self, DensityView, ScatterView};
use crate::widgets::QueryInput;

/// Main application state
pub struct App {
    /// Both charts and their scenes
    pub session: ChartSession,
    /// Visible chart and focused field
    pub focus: Focus,
    /// Text of each query field, indexed like `QueryField::ALL`
    pub inputs: [String; 3],
    /// Lookup result of each field's last edit
    pub outcomes: [Option<QueryOutcome>; 3],
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Dataset path shown in the status bar
    pub data_label: String,
    /// Pending dataset load
    loader: Option<Receiver<LoadResult>>,
    config: SkillplotConfig,
    scatter_view: ScatterView,
    density_view: DensityView,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &SkillplotConfig, data_label: String, loader: Receiver<LoadResult>) -> Self {
        Self {
            session: ChartSession::new(config),
            focus: Focus::default(),
            inputs: Default::default(),
            outcomes: [None; 3],
            show_help: false,
            data_label,
            loader: Some(loader),
            config: config.clone(),
            scatter_view: ScatterView::new(),
            density_view: DensityView::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Hand the dataset to the session once the loader has finished
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.loader else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(SkillplotError::DataUnavailable(IoError::Io(
                "loader stopped before delivering data".to_string(),
            ))),
        };
        self.loader = None;
        for (field, command) in self.session.load(result) {
            self.outcomes[field_index(field)] = command.outcome();
        }
    }

    /// Returns true when the application should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(action) = keybindings::action(code, modifiers) else {
            return false;
        };
        match action {
            Action::Quit => return true,
            Action::ToggleView => self.focus.toggle_view(),
            Action::CycleField => self.focus.cycle_field(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Insert(c) => {
                self.input_mut().push(c);
                self.submit();
            }
            Action::Backspace => {
                if self.input_mut().pop().is_some() {
                    self.submit();
                }
            }
            Action::Clear => {
                self.input_mut().clear();
                self.submit();
            }
        }
        false
    }

    fn input_mut(&mut self) -> &mut String {
        &mut self.inputs[field_index(self.focus.field())]
    }

    /// Every edit is a query
    fn submit(&mut self) {
        let field = self.focus.field();
        let index = field_index(field);
        let command = self.session.on_query(field, &self.inputs[index]);
        self.outcomes[index] = command.outcome();
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Min(0),    // Chart
                Constraint::Length(1), // Readout
                Constraint::Length(3), // Query fields
            ])
            .split(size);

        self.render_status_bar(frame, chunks[0]);
        self.render_chart(frame, chunks[1]);
        self.render_readout(frame, chunks[2]);
        self.render_inputs(frame, chunks[3]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" [{}] ", self.focus),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {} | ", self.data_label)),
        ];

        match self.session.summary() {
            Some(summary) => {
                let range = |extent: Option<(f64, f64)>| match extent {
                    Some((lo, hi)) => format!("{}..{}", display2(lo), display2(hi)),
                    None => "-".to_string(),
                };
                spans.push(Span::raw(format!(
                    "{} teams | μ {} (mean {}) | σ {} | ",
                    summary.records,
                    range(summary.mu.extent()),
                    display2(summary.mu.mean),
                    range(summary.sigma.extent()),
                )));
                if summary.mu.missing > 0 {
                    spans.push(Span::styled(
                        format!("{} malformed | ", summary.mu.missing),
                        Style::default().fg(Color::Yellow),
                    ));
                }
            }
            None if self.is_loading() => spans.push(Span::raw("loading… | ")),
            None => spans.push(Span::styled("no data | ", Style::default().fg(Color::Red))),
        }
        spans.push(Span::raw(format!(
            "{} | F1 help",
            self.config.model.variance_mode.label()
        )));

        let status_bar =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status_bar, area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let kind = self.focus.view();
        let scene = self.session.scene(kind);
        let scale = self.session.chart(kind).scale();
        match kind {
            ChartKind::Scatter => self.scatter_view.render(frame, area, scene, scale),
            ChartKind::Density => self.density_view.render(frame, area, scene, scale),
        }
    }

    fn render_readout(&self, frame: &mut Frame, area: Rect) {
        let scene = self.session.scene(self.focus.view());
        let line = match self.focus.view() {
            ChartKind::Scatter => match &scene.readout {
                Some(r) => Line::from(vec![
                    Span::styled(
                        format!(" {} ", r.team),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        " rank {}  μ {}  σ {}",
                        display2(r.rank),
                        display2(r.mu),
                        display2(r.sigma)
                    )),
                ]),
                None => Line::from(" Type a team name"),
            },
            ChartKind::Density => match &scene.matchup {
                Some(m) => {
                    let mut text = format!(
                        " {} beats {}: {}",
                        self.session.query(QueryField::Left),
                        self.session.query(QueryField::Right),
                        format_percent(m.left_win_probability)
                    );
                    if let Some(q) = m.quality {
                        text.push_str(&format!("  match quality {}", format_percent(q)));
                    }
                    Line::from(text)
                }
                None => Line::from(" Enter two teams to compare (Up/Down switches field)"),
            },
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_inputs(&self, frame: &mut Frame, area: Rect) {
        let fields = self.focus.visible_fields();
        let constraints = vec![Constraint::Ratio(1, fields.len() as u32); fields.len()];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (field, chunk) in fields.iter().zip(chunks.iter()) {
            let index = field_index(*field);
            let accent = match field {
                QueryField::Team => Color::Cyan,
                QueryField::Left => views::color(self.config.density.left_color),
                QueryField::Right => views::color(self.config.density.right_color),
            };
            let missed = self.outcomes[index] == Some(QueryOutcome::LookupMiss)
                && !self.inputs[index].trim().is_empty();
            let input = QueryInput::new(field.label(), &self.inputs[index])
                .focused(*field == self.focus.field())
                .missed(missed)
                .accent(accent);
            frame.render_widget(input, *chunk);
        }
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
skillplot - Help

Views:
  Tab / Shift-Tab - Switch scatter / density

Query fields:
  type        - Look up a team (exact, case-sensitive)
  Backspace   - Delete a character
  Ctrl-U      - Clear the field
  Up / Down   - Switch blue / red field (density)

Other:
  F1          - Toggle this help
  Esc, Ctrl-C - Quit
"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, help_area);
        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, help_area);
    }
}

fn field_index(field: QueryField) -> usize {
    match field {
        QueryField::Team => 0,
        QueryField::Left => 1,
        QueryField::Right => 2,
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use skillplot_core::{RatingRecord, RatingTable, SceneStatus};
    use std::sync::mpsc;
    use std::sync::Arc;

    fn table() -> Arc<RatingTable> {
        Arc::new(RatingTable::new(vec![
            RatingRecord::new("A", 1500.0, 200.0, 2.0),
            RatingRecord::new("B", 1600.0, 150.0, 1.0),
        ]))
    }

    fn app() -> (App, mpsc::Sender<LoadResult>) {
        let (tx, rx) = mpsc::channel();
        (
            App::new(&SkillplotConfig::default(), "ratings.csv".to_string(), rx),
            tx,
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_typing_before_load_is_replayed() {
        let (mut app, tx) = app();
        type_text(&mut app, "B");
        assert!(app.session.scene(ChartKind::Scatter).highlighted.is_none());

        tx.send(Ok(table())).unwrap();
        app.poll_load();
        assert!(!app.is_loading());
        assert_eq!(app.session.scene(ChartKind::Scatter).readout.as_ref().map(|r| r.team.as_str()), Some("B"));
        assert_eq!(app.outcomes[0], Some(QueryOutcome::Matched));
    }

    #[test]
    fn test_every_keystroke_queries() {
        let (mut app, tx) = app();
        tx.send(Ok(table())).unwrap();
        app.poll_load();

        type_text(&mut app, "AB");
        assert_eq!(app.outcomes[0], Some(QueryOutcome::LookupMiss));
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.outcomes[0], Some(QueryOutcome::Matched));
        assert!(app.session.scene(ChartKind::Scatter).highlighted.is_some());
    }

    #[test]
    fn test_density_fields() {
        let (mut app, tx) = app();
        tx.send(Ok(table())).unwrap();
        app.poll_load();

        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        type_text(&mut app, "A");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        type_text(&mut app, "B");

        assert_eq!(app.inputs, ["".to_string(), "A".to_string(), "B".to_string()]);
        let scene = app.session.scene(ChartKind::Density);
        assert_eq!(scene.curves.len(), 2);
        assert!(scene.matchup.is_some());
    }

    #[test]
    fn test_load_failure() {
        let (mut app, tx) = app();
        drop(tx);
        app.poll_load();
        assert!(matches!(
            app.session.scene(ChartKind::Scatter).status,
            SceneStatus::Unavailable(_)
        ));
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _tx) = app();
        assert!(app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.handle_key(KeyCode::F(1), KeyModifiers::NONE));
        assert!(app.show_help);
    }

    #[test]
    fn test_render_smoke() {
        let (mut app, tx) = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        tx.send(Ok(table())).unwrap();
        app.poll_load();
        type_text(&mut app, "A");
        terminal.draw(|f| app.render(f)).unwrap();
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::F(1), KeyModifiers::NONE);
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
