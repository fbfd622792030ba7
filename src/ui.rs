//! UI rendering for the staff directory viewer
//!
//! Renders the employee list and the error screen using ratatui widgets.
//! The employee list shows the company header with the members sorted by
//! name; the error screen shows the failure text and the retry keybinding.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the directory screen: company header, employee list, key hints
pub fn render_directory(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            app.company_name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ({} employees)", app.employees.len())),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .employees
        .iter()
        .map(|employee| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<24}", employee.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<16}", employee.phone_number),
                    Style::default().fg(Color::Green),
                ),
            ];
            if !employee.skills.is_empty() {
                spans.push(Span::styled(
                    employee.skills.join(", "),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if !app.employees.is_empty() {
        list_state.select(Some(app.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Employees"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    let hints = Paragraph::new("j/k: move   r: refresh   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Renders the error screen with the failure text and retry hint
pub fn render_error(frame: &mut Frame, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    let error_text = Paragraph::new(format!("Could not load directory: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error_text, chunks[1]);

    let hint = Paragraph::new("Press 'r' to retry, 'q' to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}
