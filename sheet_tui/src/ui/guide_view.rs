//! Guide view - Intro and collapsible sections

use super::focus_style;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let intro_height = (app.guide.intro_text().lines().count() as u16 + 2).min(area.height / 3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(intro_height), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new(app.guide.intro_text().to_string())
        .block(Block::default().borders(Borders::ALL).title(" Guide "))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });
    f.render_widget(intro, chunks[0]);

    draw_sections(f, app, chunks[1]);
}

fn draw_sections(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    let mut focused_line = 0;

    for (i, section) in app.guide.sections.iter().enumerate() {
        let marker = if section.open { "▼" } else { "▶" };
        let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        if i == app.guide_cursor {
            focused_line = lines.len();
            style = style.patch(focus_style());
        }
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, section.title),
            style,
        )));

        if section.open {
            let body_style = if section.body.is_some() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            for text in section.body_text().lines() {
                lines.push(Line::from(Span::styled(format!("    {}", text), body_style)));
            }
            lines.push(Line::from(""));
        }
    }

    // Keep the focused header on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focused_line.saturating_sub(visible.saturating_sub(1));

    let mode = if app.guide.single_open {
        " Sections (one at a time) "
    } else {
        " Sections "
    };
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(mode))
        .scroll((scroll as u16, 0));

    f.render_widget(paragraph, area);
}
