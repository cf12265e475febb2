//! Buff/debuff calculator view

use super::{focus_style, input_line, stat_line};
use crate::app::{App, CalcRow};
use sheet_core::input::round_cents;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_form(f, app, chunks[0]);
    draw_result(f, app, chunks[1]);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .calc_rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let focused = i == app.calc_cursor;
            let line = match row {
                CalcRow::Base => input_line("Base value", &app.calc.base_value, focused),
                CalcRow::Count => {
                    input_line("Buff/debuff count", &app.calc.buff_debuff_count, focused)
                }
                CalcRow::Percent(n) => {
                    input_line(&format!("  #{} percent", n), app.calc.percent_text(n), focused)
                }
                CalcRow::Fixed(n) => {
                    input_line(&format!("  #{} fixed", n), app.calc.fixed_text(n), focused)
                }
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Modifiers "))
        .highlight_style(focus_style());

    let mut state = ListState::default().with_selected(Some(app.calc_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let result = &app.buff_result;
    let value_color = if result.show_warning {
        Color::Red
    } else {
        Color::Green
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Final value: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.2}", result.final_value),
                Style::default().fg(value_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("After percents", format!("{:.2}", round_cents(result.after_percent))),
        stat_line("Modifier rows", app.calc.count()),
        Line::from(""),
        Line::from(Span::styled("Steps:", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            result.steps.clone(),
            Style::default().fg(Color::White),
        )),
    ];

    if result.show_warning {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Warning: the final value is negative",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Result "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
