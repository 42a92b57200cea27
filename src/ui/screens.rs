//! Per-screen rendering.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
    Frame,
};

use super::grid::{grid_height, grid_width, render_grid};
use super::helpers::{centered_rect, display_width, format_duration, format_millis, truncate_to_width};
use super::theme::{
    key_hint_style, title_style, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR,
    COLOR_STATUS, COLOR_SUCCESS,
};
use crate::app::{App, Screen};
use crate::models::PlayerStats;

const DIALOG_WIDTH: u16 = 60;

fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(COLOR_ACCENT),
        ));
        spans.push(Span::styled(format!(" {}", label), key_hint_style()));
    }
    Line::from(spans)
}

fn dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let height = lines.len() as u16 + 4;
    let rect = centered_rect(area, DIALOG_WIDTH, height);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(format!(" {} ", title), title_style()));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .centered()
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}

pub fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        app.loading_message.clone(),
        Style::default().fg(COLOR_ACCENT),
    ))];
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(COLOR_STATUS),
        )));
    }
    let rect = centered_rect(area, area.width, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).centered(), rect);
}

/// Playing, Checking and Solved share the grid view.
pub fn render_puzzle(frame: &mut Frame, area: Rect, app: &mut App) {
    let [header, _, body, status, keys] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);

    let cursor = if app.screen == Screen::Playing {
        app.cursor
    } else {
        None
    };
    let width = grid_width(body, app.max_width);
    let height = grid_height(&app.cells, width).min(body.height);
    let grid_area = Rect {
        y: body.y + (body.height - height) / 2,
        height: body.height - (body.height - height) / 2,
        ..body
    };
    render_grid(
        frame,
        grid_area,
        &app.cells,
        cursor,
        app.max_width,
        &mut app.hit_areas,
    );

    let status_line = match app.screen {
        Screen::Checking => Line::from(Span::styled(
            "Checking your solution...",
            Style::default().fg(COLOR_STATUS),
        )),
        Screen::Solved => {
            let mut spans = vec![Span::styled(
                format!("Solved in {}!", format_duration(app.completion_time)),
                Style::default()
                    .fg(COLOR_SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(status) = &app.status {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(status.clone(), Style::default().fg(COLOR_STATUS)));
            }
            Line::from(spans)
        }
        _ => match &app.status {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(COLOR_STATUS),
            )),
            None => Line::default(),
        },
    };
    frame.render_widget(Paragraph::new(status_line).centered(), status);

    let hints: &[(&str, &str)] = match app.screen {
        Screen::Solved if app.is_registered() => &[("s", "stats"), ("q", "quit")],
        Screen::Solved => &[("q", "quit")],
        Screen::Checking => &[("esc", "quit")],
        _ => &[
            ("a-z", "guess"),
            ("⌫", "clear"),
            ("tab", "next empty"),
            ("enter", "submit"),
            ("^r", "reset"),
            ("esc", "quit"),
        ],
    };
    frame.render_widget(Paragraph::new(key_hints(hints)).centered(), keys);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let timer = format_duration(app.elapsed());
    let title = match &app.puzzle {
        Some(puzzle) if puzzle.category.is_empty() => format!("Cryptoquip · {}", puzzle.date),
        Some(puzzle) => format!("Cryptoquip · {} · {}", puzzle.date, puzzle.category),
        None => "Cryptoquip".to_string(),
    };
    let room = area.width.saturating_sub(display_width(&timer) + 1);

    frame.render_widget(
        Paragraph::new(Span::styled(truncate_to_width(&title, room), title_style())),
        area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(timer, Style::default().fg(COLOR_ACCENT))).right_aligned(),
        area,
    );
}

pub fn render_error(frame: &mut Frame, area: Rect, app: &App) {
    let message = app
        .error
        .as_ref()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Something went wrong.".to_string());
    let can_retry = app.error.as_ref().is_some_and(|e| e.retry.is_some());

    let hints: &[(&str, &str)] = if can_retry {
        &[("r", "retry"), ("q", "quit")]
    } else {
        &[("q", "quit")]
    };
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(COLOR_ERROR))),
        Line::default(),
        key_hints(hints),
    ];
    dialog(frame, area, "Error", lines);
}

pub fn render_onboarding(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Welcome to Cryptoquip!"),
        Line::default(),
        Line::from(Span::styled(
            "Track your solves, streaks and best times?",
            Style::default().fg(COLOR_ACCENT),
        )),
        Line::from(Span::styled(
            "An anonymous player id is created; you can opt out any time.",
            Style::default().fg(COLOR_DIM),
        )),
        Line::default(),
        key_hints(&[("y", "yes, track my stats"), ("n", "no thanks")]),
    ];
    dialog(frame, area, "Welcome", lines);
}

pub fn render_claim_code(frame: &mut Frame, area: Rect, app: &App) {
    let code = app.claim_code.clone().unwrap_or_default();
    let lines = vec![
        Line::from("You're registered. Your claim code is:"),
        Line::default(),
        Line::from(Span::styled(
            code,
            Style::default()
                .fg(COLOR_SUCCESS)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Keep it to link your stats on another device.",
            Style::default().fg(COLOR_DIM),
        )),
        Line::from(Span::styled("Press any key to continue", key_hint_style())),
    ];
    dialog(frame, area, "Claim code", lines);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(COLOR_DIM)),
        Span::styled(value, Style::default().fg(COLOR_ACCENT)),
    ])
}

fn optional_time(millis: Option<u64>) -> String {
    millis.map(format_millis).unwrap_or_else(|| "-".to_string())
}

pub fn stats_lines(stats: &PlayerStats) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat_line("Solved", stats.solved_count.to_string()),
        stat_line("Current streak", stats.current_streak.to_string()),
        stat_line("Longest streak", stats.longest_streak.to_string()),
        stat_line("Best time", optional_time(stats.best_time_ms)),
        stat_line("Average time", optional_time(stats.average_time_ms)),
    ];
    if !stats.recent.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Recent", title_style())));
        lines.extend(
            stats
                .recent
                .iter()
                .map(|solve| stat_line(&solve.date.to_string(), format_millis(solve.completion_time_ms))),
        );
    }
    lines
}

pub fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = match &app.stats {
        Some(stats) => stats_lines(stats),
        None => vec![Line::from("No statistics yet.")],
    };
    lines.push(Line::default());
    lines.push(key_hints(&[("esc", "back")]));

    let height = lines.len() as u16 + 2;
    let rect = centered_rect(area, 40, height);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(" Your stats ", title_style()));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
