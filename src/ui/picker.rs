// Country dropdown popup.
// Rendered on top of the form while the user picks a country.

use ratatui::{prelude::*, widgets::*};

use crate::state::CountryPicker;

use super::hero::COUNTRY_PLACEHOLDER;

/// Draw the country dropdown as a centered popup.
pub fn draw_country_picker(frame: &mut Frame, countries: &[String], picker: &mut CountryPicker) {
    let area = frame.area();

    // Placeholder plus countries, borders, and the instructions row
    let wanted = countries.len() as u16 + 1 + 2 + 1;
    let modal_width = 40.min(area.width);
    let modal_height = wanted.clamp(5, 20).min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(modal_area);

    let mut items = Vec::with_capacity(countries.len() + 1);
    items.push(ListItem::new(Span::styled(
        COUNTRY_PLACEHOLDER,
        Style::default().fg(Color::DarkGray),
    )));
    items.extend(
        countries
            .iter()
            .map(|name| ListItem::new(Span::styled(name.as_str(), Style::default().fg(Color::White)))),
    );

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Country "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, chunks[0], &mut picker.list_state);

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Choose  ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" = Move  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let instructions_widget = Paragraph::new(instructions)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(instructions_widget, chunks[1]);
}
