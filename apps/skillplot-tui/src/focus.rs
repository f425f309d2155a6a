//! Which chart is shown and which query field receives keystrokes

use skillplot_core::{ChartKind, QueryField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    view: ChartKind,
    /// Remembered while the scatter view is shown
    density_field: QueryField,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            view: ChartKind::Scatter,
            density_field: QueryField::Left,
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.view {
            ChartKind::Scatter => write!(f, "SCATTER"),
            ChartKind::Density => write!(f, "DENSITY"),
        }
    }
}

impl Focus {
    pub fn view(&self) -> ChartKind {
        self.view
    }

    /// The field edits go to
    pub fn field(&self) -> QueryField {
        match self.view {
            ChartKind::Scatter => QueryField::Team,
            ChartKind::Density => self.density_field,
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ChartKind::Scatter => ChartKind::Density,
            ChartKind::Density => ChartKind::Scatter,
        };
    }

    /// Switch between the left and right density fields
    pub fn cycle_field(&mut self) {
        if self.view == ChartKind::Density {
            self.density_field = match self.density_field {
                QueryField::Left => QueryField::Right,
                _ => QueryField::Left,
            };
        }
    }

    /// Fields shown in the input bar for the current view
    pub fn visible_fields(&self) -> &'static [QueryField] {
        match self.view {
            ChartKind::Scatter => &[QueryField::Team],
            ChartKind::Density => &[QueryField::Left, QueryField::Right],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_only_in_density_view() {
        let mut focus = Focus::default();
        focus.cycle_field();
        assert_eq!(focus.field(), QueryField::Team);

        focus.toggle_view();
        assert_eq!(focus.field(), QueryField::Left);
        focus.cycle_field();
        assert_eq!(focus.field(), QueryField::Right);

        focus.toggle_view();
        focus.toggle_view();
        assert_eq!(focus.field(), QueryField::Right);
    }
}
