// Hero section with the search form.
// Country dropdown, state and discipline inputs, and the Find Jobs control.

use ratatui::{prelude::*, widgets::*};

use crate::state::{BoardState, Field, FormState};

/// Rows the hero section needs.
pub const HERO_HEIGHT: u16 = 7;

/// Placeholder entry of the country dropdown.
pub const COUNTRY_PLACEHOLDER: &str = "Select a country";

/// Draw the heading and search form.
pub fn draw_hero(frame: &mut Frame, board: &BoardState, form: &FormState, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Form row
        ])
        .split(inner);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Kick-Start Your Career",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let subtitle = Paragraph::new("Search for Job Opportunities Worldwide")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(subtitle, chunks[1]);

    draw_form_row(frame, board, form, chunks[3]);
}

fn draw_form_row(frame: &mut Frame, board: &BoardState, form: &FormState, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Min(16),
        ])
        .split(area);

    let filter = &board.filter;

    let country = if filter.country.is_empty() {
        Span::styled(COUNTRY_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(filter.country.as_str())
    };
    draw_input(
        frame,
        " Country ",
        Line::from(vec![country, Span::styled(" ▾", Style::default().fg(Color::DarkGray))]),
        form.focus == Field::Country,
        cells[0],
    );

    draw_input(
        frame,
        " State ",
        text_line(&filter.state, "State", form.focus == Field::State),
        form.focus == Field::State,
        cells[1],
    );

    draw_input(
        frame,
        " Jobs ",
        text_line(&filter.discipline, "Jobs", form.focus == Field::Discipline),
        form.focus == Field::Discipline,
        cells[2],
    );

    draw_search_button(frame, board.loading, form.focus == Field::Search, cells[3]);
}

/// Input text with a placeholder when empty and a cursor when focused.
fn text_line<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let mut spans = if value.is_empty() && !focused {
        vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::raw(value)]
    };
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn draw_input(frame: &mut Frame, title: &str, content: Line, focused: bool, area: Rect) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.to_string()),
    );
    frame.render_widget(input, area);
}

/// The submit control; shows progress and looks disabled while loading.
fn draw_search_button(frame: &mut Frame, loading: bool, focused: bool, area: Rect) {
    let (label, style) = if loading {
        ("Searching...", Style::default().fg(Color::DarkGray))
    } else if focused {
        (
            "🔍 Find Jobs",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("🔍 Find Jobs", Style::default().fg(Color::Blue))
    };

    let border = if focused && !loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(button, area);
}
