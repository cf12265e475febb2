//! UI rendering

mod buffs_view;
mod damage_view;
mod guide_view;
mod help_view;
mod profile_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use sheet_core::types::Severity;

/// Orange used for warnings and amplified damage
pub const ORANGE: Color = Color::Rgb(255, 153, 0);

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Damage => damage_view::draw(f, app, chunks[1]),
        Tab::Buffs => buffs_view::draw(f, app, chunks[1]),
        Tab::Profile => profile_view::draw(f, app, chunks[1]),
        Tab::Guide => guide_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next page"), ("Esc", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Damage => vec![
            ("↑/↓", "Field"),
            ("Space", "Toggle"),
            ("←/→", "Element"),
            ("^N", "Add attack"),
            ("^D", "Add defense"),
            ("^X", "Remove defense"),
            ("^L", "Clear"),
        ],
        Tab::Buffs => vec![("↑/↓", "Field"), ("^N", "Add row"), ("^L", "Clear")],
        Tab::Profile => vec![
            ("↑/↓", "Field"),
            ("←/→", "Choose"),
            ("^R", "Random"),
            ("^L", "Reset"),
            ("^Z", "Undo"),
            ("^S", "Save"),
            ("^E", "Export"),
        ],
        Tab::Guide => vec![("↑/↓", "Section"), ("Enter/Space", "Open/close")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    // Add tab-specific keys first
    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    // Add separator if we have tab-specific keys
    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    // Add common keys
    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let title = match &app.status {
        Some(status) => format!(" {} ", status),
        None => " Keys ".to_string(),
    };

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sekai Character Sheet "),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Style for the row under the cursor
pub fn focus_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => ORANGE,
    }
}

/// Label and typed text of an input
pub fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let mut text = value.to_string();
    if focused {
        text.push('▏');
    }
    Line::from(vec![
        Span::styled(format!("{:26}", label), Style::default().fg(Color::Gray)),
        Span::styled(text, Style::default().fg(Color::White)),
    ])
}

/// Label and value of a choice, with arrows when focused
pub fn choice_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let text = if focused {
        format!("◀ {} ▶", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::styled(format!("{:26}", label), Style::default().fg(Color::Gray)),
        Span::styled(text, Style::default().fg(Color::Cyan)),
    ])
}

pub fn checkbox_line(label: &str, checked: bool) -> Line<'static> {
    let (mark, color) = if checked {
        ("[x]", Color::Green)
    } else {
        ("[ ]", Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{} ", mark), Style::default().fg(color)),
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn stat_line(name: &str, value: impl std::fmt::Display) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}
