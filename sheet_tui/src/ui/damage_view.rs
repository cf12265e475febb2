//! Damage calculator view

use super::{checkbox_line, choice_line, focus_style, input_line};
use crate::app::{App, DamageRow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use sheet_core::types::DamageEffect;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_form(f, app, chunks[0]);
    draw_results(f, app, chunks[1]);
}

fn row_line(app: &App, row: DamageRow, focused: bool) -> Line<'static> {
    let Some(record) = app.damage.attacks.get(row.attack()) else {
        return Line::from("");
    };
    match row {
        DamageRow::Value(a) => {
            let mut line = input_line(&format!("Attack {} value", a + 1), &record.value, focused);
            line.spans[0].style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
            line
        }
        DamageRow::Element(_) => choice_line("  Element", record.damage_type.name(), focused),
        DamageRow::TrueDamage(_) => checkbox_line(
            "  True Damage",
            record.has_effect(DamageEffect::TrueDamage),
        ),
        DamageRow::PierceDamage(_) => checkbox_line(
            "  Pierce Damage",
            record.has_effect(DamageEffect::PierceDamage),
        ),
        DamageRow::AntiTrue(_) => checkbox_line("  Defender: Anti True", record.defense.anti_true),
        DamageRow::AntiPierce(_) => {
            checkbox_line("  Defender: Anti Pierce", record.defense.anti_pierce)
        }
        DamageRow::Multiplier(_) => input_line("  Resistance multiplier", &record.resistance, focused),
        DamageRow::ResistancePercent(_, r) => {
            let text = record.resistances.get(r).map(|e| e.percent.as_str()).unwrap_or("");
            input_line(&format!("  Defense {} reduction %", r + 1), text, focused)
        }
        DamageRow::ResistanceFixed(_, r) => {
            let text = record.resistances.get(r).map(|e| e.fixed.as_str()).unwrap_or("");
            input_line(&format!("  Defense {} fixed", r + 1), text, focused)
        }
    }
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .damage_rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| ListItem::new(row_line(app, row, i == app.damage_cursor)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Attacks "))
        .highlight_style(focus_style());

    let mut state = ListState::default().with_selected(Some(app.damage_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for (i, result) in app.damage_results.iter().enumerate() {
        let element = app
            .damage
            .attacks
            .get(i)
            .map(|r| r.damage_type.name())
            .unwrap_or("None");
        let damage_color = if result.is_negative() {
            Color::Red
        } else {
            Color::Green
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("Attack {}: ", i + 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:.2}", result.damage),
                Style::default().fg(damage_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} damage, {})", result.branch, element),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", result.summary()),
            Style::default().fg(Color::White),
        )));
        if result.is_negative() {
            lines.push(Line::from(Span::styled(
                "  Defense exceeds the attack",
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Damage Taken "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
