//! Help tab view

use super::section_header;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        section_header("Navigation"),
        key_line("Tab / Shift+Tab", "Next/previous page"),
        key_line("F1-F5", "Jump to page (Damage/Buffs/Profile/Guide/Help)"),
        key_line("↑  ↓", "Move between fields"),
        key_line("Esc / Ctrl+C", "Quit"),
        Line::from(""),
        section_header("Editing"),
        key_line("Type / Backspace", "Edit the field under the cursor"),
        key_line("←/→", "Change element, gender, race or class"),
        key_line("Space / Enter", "Tick a checkbox or open a guide section"),
        Line::from(""),
        section_header("Damage"),
        key_line("Ctrl+N", "Add an attack"),
        key_line("Ctrl+D", "Add a defense row to the current attack"),
        key_line("Ctrl+X", "Remove the defense row under the cursor"),
        key_line("Ctrl+L", "Clear the page"),
        Line::from(""),
        section_header("Buffs"),
        key_line("Ctrl+N", "Add a modifier row"),
        key_line("Ctrl+L", "Clear the page"),
        Line::from(""),
        section_header("Profile"),
        key_line("Ctrl+R", "Build a random valid character"),
        key_line("Ctrl+L", "Reset every field"),
        key_line("Ctrl+Z", "Undo the last reset or build"),
        key_line("Ctrl+S", "Save now"),
        key_line("Ctrl+E", "Export the summary as text"),
        Line::from(""),
        section_header("Data"),
        Line::from(Span::styled(
            format!("  Pages save after every change to {}", app.data_dir().display()),
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
