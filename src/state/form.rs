// Search form and results grid interaction state.
// Tracks keyboard focus, the country dropdown, and the selected card.

use ratatui::widgets::ListState;

use super::filter::Filter;

/// Focusable controls, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    Country,
    State,
    Discipline,
    #[default]
    Search,
    Results,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::Country,
        Field::State,
        Field::Discipline,
        Field::Search,
        Field::Results,
    ];

    pub fn next(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether this field accepts typed text.
    pub fn is_text_input(&self) -> bool {
        matches!(self, Field::State | Field::Discipline)
    }
}

/// Open country dropdown. Index 0 is the "Select a country" entry.
#[derive(Debug, Clone, Default)]
pub struct CountryPicker {
    pub list_state: ListState,
}

impl CountryPicker {
    /// Open the picker on the filter's current country.
    pub fn open(countries: &[String], current: &str) -> Self {
        let selected = countries
            .iter()
            .position(|c| c == current)
            .map(|i| i + 1)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self { list_state }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Move down; `option_count` includes the placeholder entry.
    pub fn select_next(&mut self, option_count: usize) {
        let i = self.selected();
        if i + 1 < option_count {
            self.list_state.select(Some(i + 1));
        }
    }

    pub fn select_prev(&mut self) {
        let i = self.selected();
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    /// The country the current selection stands for ("" for the placeholder).
    pub fn chosen<'a>(&self, countries: &'a [String]) -> &'a str {
        match self.selected() {
            0 => "",
            i => countries.get(i - 1).map(String::as_str).unwrap_or(""),
        }
    }
}

/// Keyboard state for the whole screen.
#[derive(Debug, Default)]
pub struct FormState {
    /// Focused control.
    pub focus: Field,
    /// Country dropdown, when open.
    pub picker: Option<CountryPicker>,
    /// Selected card index in the results grid.
    pub selected_card: Option<usize>,
    /// Columns in the most recently drawn grid, for vertical movement.
    pub grid_columns: usize,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            grid_columns: 1,
            ..Self::default()
        }
    }

    /// Type a character into the focused text input.
    pub fn insert_char(&self, filter: &mut Filter, c: char) {
        if let Some(text) = self.focused_text(filter) {
            text.push(c);
        }
    }

    /// Delete the last character of the focused text input.
    pub fn delete_char(&self, filter: &mut Filter) {
        if let Some(text) = self.focused_text(filter) {
            text.pop();
        }
    }

    fn focused_text<'a>(&self, filter: &'a mut Filter) -> Option<&'a mut String> {
        match self.focus {
            Field::State => Some(&mut filter.state),
            Field::Discipline => Some(&mut filter.discipline),
            _ => None,
        }
    }

    /// Keep the card selection inside a result set of `count` cards.
    pub fn clamp_selection(&mut self, count: usize) {
        self.selected_card = match (self.selected_card, count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some(i.min(n - 1)),
        };
    }

    /// Move the card selection by `dx` columns and `dy` rows.
    pub fn move_selection(&mut self, count: usize, dx: isize, dy: isize) {
        if count == 0 {
            self.selected_card = None;
            return;
        }
        let columns = self.grid_columns.max(1) as isize;
        let current = self.selected_card.unwrap_or(0) as isize;
        let target = current + dx + dy * columns;
        let clamped = target.clamp(0, count as isize - 1);
        self.selected_card = Some(clamped as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["Canada".to_string(), "USA".to_string()]
    }

    #[test]
    fn test_field_cycle() {
        let mut field = Field::Country;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, Field::Country);
        assert_eq!(Field::Country.prev(), Field::Results);
        assert_eq!(Field::State.next(), Field::Discipline);
    }

    #[test]
    fn test_text_editing_targets_focus() {
        let mut form = FormState::new();
        let mut filter = Filter::default();

        form.focus = Field::State;
        form.insert_char(&mut filter, 'C');
        form.insert_char(&mut filter, 'A');
        form.focus = Field::Discipline;
        form.insert_char(&mut filter, 'x');
        form.delete_char(&mut filter);
        form.insert_char(&mut filter, 'e');

        form.focus = Field::Search;
        form.insert_char(&mut filter, 'z');

        assert_eq!(filter, Filter::new("e", "CA", ""));
    }

    #[test]
    fn test_picker_open_on_current() {
        let picker = CountryPicker::open(&names(), "USA");
        assert_eq!(picker.selected(), 2);
        assert_eq!(picker.chosen(&names()), "USA");

        let picker = CountryPicker::open(&names(), "");
        assert_eq!(picker.selected(), 0);
        assert_eq!(picker.chosen(&names()), "");
    }

    #[test]
    fn test_picker_bounds() {
        let mut picker = CountryPicker::open(&names(), "");
        picker.select_prev();
        assert_eq!(picker.selected(), 0);

        for _ in 0..5 {
            picker.select_next(names().len() + 1);
        }
        assert_eq!(picker.selected(), 2);
        assert_eq!(picker.chosen(&names()), "USA");
    }

    #[test]
    fn test_grid_movement() {
        let mut form = FormState::new();
        form.grid_columns = 3;
        form.clamp_selection(7);
        assert_eq!(form.selected_card, Some(0));

        form.move_selection(7, 1, 0);
        assert_eq!(form.selected_card, Some(1));
        form.move_selection(7, 0, 1);
        assert_eq!(form.selected_card, Some(4));
        form.move_selection(7, 0, 1);
        assert_eq!(form.selected_card, Some(6));
        form.move_selection(7, 0, -1);
        assert_eq!(form.selected_card, Some(3));

        form.clamp_selection(2);
        assert_eq!(form.selected_card, Some(1));
        form.clamp_selection(0);
        assert_eq!(form.selected_card, None);
    }
}
