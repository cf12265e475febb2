//! Character profile view

use super::{choice_line, focus_style, input_line, section_header, severity_color, stat_line, ORANGE};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use sheet_core::profile::{
    option_label, AllocationStatus, ProfileField, ResistanceEffect, ResistanceStatus,
    ResistanceTone,
};
use sheet_core::types::DamageElement;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(chunks[1]);

    draw_form(f, app, chunks[0]);
    draw_validation(f, app, right[0]);
    draw_summary(f, app, right[1]);
}

pub fn tone_color(tone: ResistanceTone) -> Color {
    match tone {
        ResistanceTone::Good => Color::LightGreen,
        ResistanceTone::Reduced => Color::Rgb(74, 144, 226),
        ResistanceTone::Neutral => Color::Rgb(224, 224, 224),
        ResistanceTone::Bad => ORANGE,
    }
}

fn field_line(app: &App, field: ProfileField, focused: bool) -> Line<'static> {
    let value = app.profile.get(field);
    let mut line = match field.options() {
        Some(options) => {
            let shown: &str = match option_label(options, value) {
                Some(label) => label,
                None if value.is_empty() => "-",
                None => value,
            };
            choice_line(field.label(), shown, focused)
        }
        None => input_line(field.label(), value, focused),
    };

    if let Some(message) = app.report.message_for(field) {
        line.spans.push(Span::styled(
            format!("  {}", message.text),
            Style::default().fg(severity_color(message.severity)),
        ));
    } else if let Some(help) = app.report.limits.help(field) {
        line.spans.push(Span::styled(
            format!("  ({})", help),
            Style::default().fg(Color::DarkGray),
        ));
    }
    line
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = ProfileField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| ListItem::new(field_line(app, *field, i == app.profile_cursor)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Profile "))
        .highlight_style(focus_style());

    let mut state = ListState::default().with_selected(Some(app.profile_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_validation(f: &mut Frame, app: &App, area: Rect) {
    let report = &app.report;

    let (verdict, verdict_color) = if report.valid {
        ("✔ Profile is valid", Color::LightGreen)
    } else {
        ("✘ Profile is invalid", Color::Red)
    };
    let unused_color = match report.allocation_status {
        AllocationStatus::Exact => Color::LightGreen,
        AllocationStatus::Under(_) => ORANGE,
        AllocationStatus::Over(_) => Color::Red,
    };
    let resistance_color = match report.resistance_status {
        ResistanceStatus::Exact => Color::LightGreen,
        ResistanceStatus::Over => ORANGE,
        ResistanceStatus::Under => Color::Red,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            verdict,
            Style::default().fg(verdict_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            report.unused_text(),
            Style::default().fg(unused_color),
        )),
        Line::from(Span::styled(
            format!("Resistance {}", report.resistance_text()),
            Style::default().fg(resistance_color),
        )),
    ];

    // Live explanation reads blanks as zero
    let live = app.profile.snapshot.resistances_or(0.0);
    for (element, value) in [
        (DamageElement::Kinetic, live.kinetic),
        (DamageElement::Pressure, live.pressure),
        (DamageElement::Force, live.force),
    ] {
        let effect = ResistanceEffect::from_coefficient(value);
        lines.push(Line::from(vec![
            Span::styled(format!("{:10}", element.name()), Style::default().fg(Color::Gray)),
            Span::styled(
                effect.describe(element),
                Style::default().fg(tone_color(effect.tone())),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Validation "))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let accent = Style::default().fg(Color::Rgb(74, 144, 226));

    let mut lines = vec![
        section_header("Basic information"),
        stat_line("Name", &summary.name),
        stat_line(
            "Birth date",
            format!(
                "{}/{}/{} (Age: {})",
                summary.day,
                summary.month,
                summary.year,
                summary.age_text()
            ),
        ),
        stat_line("Gender", &summary.gender),
        stat_line("Race", &summary.race),
        stat_line("Class", &summary.class),
        stat_line("Biography", &summary.bio),
        Line::from(""),
        section_header("Stats"),
        stat_line("Total stat", summary.stats.total),
        stat_line("Real HP", summary.real_hp),
        stat_line("SPD", summary.stats.spd),
        stat_line("REF", summary.stats.reflex),
    ];
    for (name, value) in summary.optional_stats() {
        lines.push(stat_line(name, value));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Derived"));
    let mut derived = vec![
        ("Skill range", format!("{} m", summary.skill_range)),
        ("HP regen cap", format!("{} HP/turn", summary.hp_per_turn)),
        ("Carry weight", format!("{} kg", summary.carry_weight)),
        ("Move speed", format!("{} m/s", summary.move_speed)),
        (
            "Reaction speed",
            format!("{} m/s ({} SPD)", summary.reaction_speed, summary.reaction_speed),
        ),
    ];
    if let Some(push) = summary.push_resistance {
        derived.push(("Push resistance", format!("{} kg", push)));
    }
    if let Some(push) = summary.shield_push_resistance {
        derived.push(("Shield push", format!("{} kg", push)));
    }
    for (name, value) in derived {
        lines.push(Line::from(vec![
            Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
            Span::styled(value, accent),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Resistances"));
    for (element, value, effect) in summary.resistance_effects() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:10}{:.2}  ", element.name(), value),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                effect.describe(element),
                Style::default().fg(tone_color(effect.tone())),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Summary "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
