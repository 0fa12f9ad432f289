//! Rendering of the model into a frame.

use chrono::{DateTime, Local, Utc};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use dex_core::Creature;

use crate::app::{Model, Tone};
use crate::keys::{FETCH_HELP, FILTER_HELP, InputMode, QUIT_HELP};

/// Label at the top of the card.
pub const CARD_LABEL: &str = "Fetch a pokemon!";

/// Title of the caught list.
pub const LIST_TITLE: &str = "PokeDex";

/// Last line of the final frame.
pub const FAREWELL: &str = "Good Bye!";

const CARD_WIDTH: u16 = 40;
const CARD_HEIGHT: u16 = 8;
const MIN_WIDTH: u16 = 44;
const MIN_HEIGHT: u16 = 16;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, model: &Model) {
    let outer = Block::default().padding(Padding::new(2, 2, 1, 1));
    let area = outer.inner(frame.area());

    if let Some(err) = model.error() {
        draw_error(frame, err, area);
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = Paragraph::new("Terminal too small").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, area);
        return;
    }

    let farewell_height = if model.is_quitting() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CARD_HEIGHT),     // Card
            Constraint::Min(3),                  // Caught list or spinner
            Constraint::Length(1),               // Status
            Constraint::Length(2),               // Help
            Constraint::Length(farewell_height), // Farewell
        ])
        .split(area);

    draw_card(frame, model, chunks[0]);
    if model.current().is_none() {
        draw_waiting(frame, model, chunks[1]);
    } else {
        draw_list(frame, model, chunks[1]);
    }
    draw_status(frame, model, chunks[2]);
    draw_help(frame, model, chunks[3]);
    if model.is_quitting() {
        draw_farewell(frame, chunks[4]);
    }
}

/// Card with the most recent catch.
fn draw_card(frame: &mut Frame, model: &Model, area: Rect) {
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CARD_WIDTH), Constraint::Min(0)])
        .split(area)[0];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .padding(Padding::horizontal(2));

    let mut lines: Vec<Line<'static>> = vec![Line::from(Span::styled(
        CARD_LABEL,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(entry) = model.current() {
        lines.extend(card_lines(&entry.creature));
    }

    let card = Paragraph::new(lines).block(block);
    frame.render_widget(card, area);
}

/// Name, number, types, size and base stats.
fn card_lines(creature: &Creature) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        creature.name.clone(),
        Style::default().fg(Color::Cyan).bold(),
    ))];

    let mut header = vec![Span::styled(
        format!("#{:03}", creature.id),
        Style::default().fg(Color::Yellow),
    )];
    let types = creature.type_label();
    if !types.is_empty() {
        header.push(Span::raw("  "));
        header.push(Span::styled(types, Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(header));

    if creature.height > 0 || creature.weight > 0 {
        lines.push(Line::from(Span::styled(
            format!("{:.1} m  {:.1} kg", creature.height_m(), creature.weight_kg()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for row in creature.stats.chunks(3) {
        let text = row
            .iter()
            .map(|s| format!("{} {}", stat_abbrev(&s.stat.name), s.base_stat))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(text));
    }

    lines
}

fn stat_abbrev(name: &str) -> &str {
    match name {
        "hp" => "HP",
        "attack" => "Atk",
        "defense" => "Def",
        "special-attack" => "SpA",
        "special-defense" => "SpD",
        "speed" => "Spe",
        other => other,
    }
}

/// Spinner shown until the first catch.
fn draw_waiting(frame: &mut Frame, model: &Model, area: Rect) {
    let text = if model.is_catching() {
        "Catching..."
    } else {
        "Waiting for a command..."
    };
    let line = Line::from(vec![
        Span::styled(model.spinner_frame(), Style::default().fg(Color::Magenta)),
        Span::raw("  "),
        Span::raw(text),
    ]);
    let area = Rect {
        y: area.y.saturating_add(1),
        height: area.height.saturating_sub(1),
        ..area
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Caught creatures, newest first.
fn draw_list(frame: &mut Frame, model: &Model, area: Rect) {
    let visible = model.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(entry.creature.name.clone()),
                Span::raw("  "),
                Span::styled(
                    format!("#{}", entry.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(
                    caught_time(entry.caught_at),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let count = model.registry().len();
    let title = match model.input_mode() {
        InputMode::Filter => format!(" {LIST_TITLE} ({count}) | filter: {}_ ", model.filter()),
        InputMode::Normal if !model.filter().is_empty() => format!(
            " {LIST_TITLE} ({}/{count}) | filter: \"{}\" ",
            visible.len(),
            model.filter()
        ),
        InputMode::Normal => format!(" {LIST_TITLE} ({count}) "),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("\u{25b6} ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(model.cursor()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Local wall-clock time of a catch.
fn caught_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Notification line.
fn draw_status(frame: &mut Frame, model: &Model, area: Rect) {
    let line = if model.is_catching() && model.current().is_some() {
        Line::from(vec![
            Span::styled(model.spinner_frame(), Style::default().fg(Color::Magenta)),
            Span::raw("  Catching..."),
        ])
    } else if let Some(status) = model.status() {
        let color = match status.tone {
            Tone::Info => Color::Magenta,
            Tone::Error => Color::Red,
        };
        Line::from(Span::styled(
            status.text.replace('\t', "  "),
            Style::default().fg(color),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Key help.
fn draw_help(frame: &mut Frame, model: &Model, area: Rect) {
    let style = Style::default().fg(Color::DarkGray);
    let lines = match model.input_mode() {
        InputMode::Filter => vec![Line::from(Span::styled(FILTER_HELP, style))],
        InputMode::Normal => vec![
            Line::from(Span::styled(FETCH_HELP, style)),
            Line::from(Span::styled(QUIT_HELP, style)),
        ],
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_farewell(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(FAREWELL, Style::default().fg(Color::Magenta))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Error text in place of the main view.
fn draw_error(frame: &mut Frame, err: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(FAREWELL, Style::default().fg(Color::Magenta))),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
