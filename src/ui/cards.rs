// Results grid of internship cards.
// Lays out one to three columns depending on terminal width.

use ratatui::{prelude::*, widgets::*};

use crate::api::Internship;

/// Rows each card occupies, borders included.
pub const CARD_HEIGHT: u16 = 10;

/// Description length shown on a card before truncation.
pub const DESCRIPTION_LIMIT: usize = 120;

/// Number of grid columns for a given width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..80 => 1,
        80..120 => 2,
        _ => 3,
    }
}

/// Cut a description to at most [`DESCRIPTION_LIMIT`] characters, always followed by `...`.
pub fn truncate_description(description: &str) -> String {
    let cut = description
        .char_indices()
        .nth(DESCRIPTION_LIMIT)
        .map_or(description.len(), |(i, _)| i);
    format!("{}...", &description[..cut])
}

/// Draw the grid. Returns the number of columns used.
pub fn draw_grid(
    frame: &mut Frame,
    internships: &[Internship],
    selected: Option<usize>,
    area: Rect,
) -> usize {
    let columns = grid_columns(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

    // Scroll so the selected card's row is on screen
    let selected_row = selected.unwrap_or(0) / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + row_offset;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            let Some(internship) = internships.get(index) else {
                return columns;
            };
            draw_card(frame, internship, selected == Some(index), *cell);
        }
    }

    columns
}

/// Draw a single posting.
pub fn draw_card(frame: &mut Frame, internship: &Internship, selected: bool, area: Rect) {
    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title, company, location
            Constraint::Min(1),    // Description
            Constraint::Length(2), // Posted date, schedule
        ])
        .split(inner);

    // No image support in the terminal; mark postings that have one
    let icon = if internship.thumbnail.is_some() {
        "🖼 "
    } else {
        "🏢"
    };

    let header = vec![
        Line::from(vec![
            Span::raw(format!("{} ", icon)),
            Span::styled(
                internship.title.as_str(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            internship.company_name.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            internship.location.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let description = Paragraph::new(truncate_description(&internship.description))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[1]);

    let mut footer = Vec::new();
    if let Some(date) = &internship.date {
        footer.push(Line::from(Span::styled(
            format!("Posted on: {}", date),
            Style::default().fg(Color::DarkGray),
        )));
    }
    footer.push(Line::from(Span::styled(
        internship.schedule_type.as_str(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}
