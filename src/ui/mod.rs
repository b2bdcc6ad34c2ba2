// UI module for rendering the TUI.
// Contains the hero search form, results grid, dropdown, and help overlay.

mod cards;
mod hero;
mod picker;

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{BoardState, Field, FormState, ResultsSource};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let country_names = app.country_names();
    draw_board(frame, &app.board, &mut app.form);
    draw_status_bar(frame, app, status_area(frame.area()));

    if let Some(picker) = app.form.picker.as_mut() {
        picker::draw_country_picker(frame, &country_names, picker);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn status_area(area: Rect) -> Rect {
    Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1.min(area.height))
}

/// Draw the hero and results sections.
pub fn draw_board(frame: &mut Frame, board: &BoardState, form: &mut FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hero::HERO_HEIGHT), // Hero with search form
            Constraint::Min(1),                    // Results
            Constraint::Length(1),                 // Status bar
        ])
        .split(frame.area());

    hero::draw_hero(frame, board, form, chunks[0]);
    draw_results(frame, board, form, chunks[1]);
}

/// Draw the error banner and the grid of cards.
fn draw_results(frame: &mut Frame, board: &BoardState, form: &mut FormState, area: Rect) {
    let (banner_area, grid_area) = if board.error.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let (Some(banner_area), Some(error)) = (banner_area, &board.error) {
        let banner = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red));
        frame.render_widget(banner, banner_area);
    }

    if board.internships.is_empty() {
        let message = if board.loading {
            "⏳ Searching..."
        } else {
            "No internships found"
        };
        let style = if board.loading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(text, grid_area);
        return;
    }

    let selected = if form.focus == Field::Results {
        form.selected_card
    } else {
        None
    };
    form.grid_columns = cards::draw_grid(frame, &board.internships, selected, grid_area);
}

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Draw the status bar with keybinding hints and result provenance.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = if app.form.focus.is_text_input() {
        vec![
            Span::raw(" type "),
            Span::styled("Edit", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Next", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
        ]
    } else if app.form.focus == Field::Results {
        vec![
            Span::raw(" ←↑↓→ "),
            Span::styled("Move", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵/o "),
            Span::styled("Open", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Next", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" Tab "),
            Span::styled("Next", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Select", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Jobs", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    if let Some(message) = &app.status_message {
        hints.push(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Cyan),
        ));
    } else if let Some(info) = app.board.results_info {
        let source = match info.source {
            ResultsSource::Cache => "cached",
            ResultsSource::Network => "fetched",
        };
        hints.push(Span::styled(
            format!(
                "  {} results, {} {}",
                app.board.internships.len(),
                source,
                format_relative_time(&info.updated_at)
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 17.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("Tab/Shift-Tab", "Move between fields"),
        key("Enter", "Open dropdown / search / open"),
        key("type", "Edit State and Jobs"),
        key("/", "Jump to Jobs"),
        key("←↑↓→ or hjkl", "Move through results"),
        key("o", "Open posting in browser"),
        key("Esc", "Leave field / close popup"),
        key("?", "Show/hide this help"),
        key("q / Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
