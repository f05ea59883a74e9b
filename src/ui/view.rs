//! Frame rendering: header, progress ring, preset chips, footer

use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::presets::PresetList;
use crate::state::countdown::TimerSnapshot;
use crate::state::duration::{DurationSecs, MAX_SECONDS, MIN_SECONDS};

use super::input::{InputMode, UiState};

/// Everything one frame needs, gathered before drawing so the render path
/// takes no locks
pub struct FrameData<'a> {
    pub snapshot: TimerSnapshot,
    pub presets: &'a PresetList,
    pub last_chime: Option<DateTime<Local>>,
    pub ui: &'a UiState,
}

/// Draw one frame
pub fn render(frame: &mut Frame, data: &FrameData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], data);
    render_ring(frame, chunks[1], &data.snapshot);
    render_chips(frame, chunks[2], data);
    render_footer(frame, chunks[3], data);
}

fn render_header(frame: &mut Frame, area: Rect, data: &FrameData) {
    let mut spans = vec![
        Span::raw("interval "),
        Span::styled(
            data.snapshot.active.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(at) = data.last_chime {
        spans.push(Span::raw("   last chime "));
        spans.push(Span::styled(
            at.format("%H:%M:%S").to_string(),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" chimer "),
        );
    frame.render_widget(header, area);
}

fn render_ring(frame: &mut Frame, area: Rect, snapshot: &TimerSnapshot) {
    let points = arc_points(snapshot.progress());

    // Keep the ring circular: a cell is roughly twice as tall as it is
    // wide, and braille packs 2x4 dots per cell
    let aspect = f64::from(area.width.max(1)) / (2.0 * f64::from(area.height.max(1)));
    let (x_span, y_span) = if aspect >= 1.0 {
        (1.3 * aspect, 1.3)
    } else {
        (1.3, 1.3 / aspect)
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_span, x_span])
        .y_bounds([-y_span, y_span])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &points,
                color: Color::Cyan,
            });
        });
    frame.render_widget(canvas, area);

    // The numeric readout floats in the empty center of the ring
    let (status, status_style) = if snapshot.running {
        ("RUNNING", Style::default().fg(Color::Green))
    } else {
        ("STOPPED", Style::default().fg(Color::Yellow))
    };
    let number_style = if snapshot.running {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
    };
    let readout = Paragraph::new(vec![
        Line::from(Span::styled(snapshot.remaining.to_string(), number_style)),
        Line::from(Span::styled(status, status_style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(readout, center_of(area));
}

/// Points along the elapsed arc, clockwise from twelve o'clock
fn arc_points(progress: f64) -> Vec<(f64, f64)> {
    let sweep = progress.clamp(0.0, 1.0) * std::f64::consts::TAU;
    if sweep <= f64::EPSILON {
        return Vec::new();
    }
    // Enough samples that a full ring stays gapless at braille resolution
    let steps = (sweep * 96.0).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let theta = sweep * i as f64 / steps as f64;
            (theta.sin(), theta.cos())
        })
        .collect()
}

/// Small centered rect for the readout text
fn center_of(area: Rect) -> Rect {
    let width = area.width.min(12);
    let height = area.height.min(2);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_chips(frame: &mut Frame, area: Rect, data: &FrameData) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, value) in data.presets.entries().iter().enumerate() {
        let active = *value == data.snapshot.active;
        let mut style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if i == data.ui.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", value), style));
        spans.push(Span::raw(" "));
    }
    let chips = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(chips, area);
}

fn render_footer(frame: &mut Frame, area: Rect, data: &FrameData) {
    let lines = match data.ui.mode {
        InputMode::Normal => help_lines(),
        InputMode::Custom => prompt_lines("custom duration", "set", data, true),
        InputMode::EditPreset { index } => {
            let target = data
                .presets
                .get(index)
                .map(|v| v.to_string())
                .unwrap_or_default();
            prompt_lines(&format!("edit preset {}", target), "apply", data, false)
        }
    };
    let footer = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            key("space"),
            Span::raw(" start/stop   "),
            key("\u{2190}\u{2192}"),
            Span::raw(" choose   "),
            key("enter"),
            Span::raw(" select"),
        ]),
        Line::from(vec![
            key("c"),
            Span::raw(" custom   "),
            key("e"),
            Span::raw(" edit   "),
            key("d"),
            Span::raw(" delete   "),
            key("q"),
            Span::raw(" quit"),
        ]),
    ]
}

fn prompt_lines(
    label: &str,
    submit: &str,
    data: &FrameData,
    offer_add: bool,
) -> Vec<Line<'static>> {
    let parsed = DurationSecs::parse(&data.ui.buffer);
    let valid = parsed.is_some();
    let rejected = !data.ui.buffer.is_empty() && !valid;

    let input_style = if rejected {
        Style::default().fg(Color::Red)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let input = vec![
        Span::raw(format!("{}: ", label)),
        Span::styled(format!("{}_", data.ui.buffer), input_style),
        Span::styled(
            format!("  ({}-{} seconds)", MIN_SECONDS, MAX_SECONDS),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let mut hints = vec![key("enter"), Span::raw(format!(" {}   ", submit))];
    if offer_add {
        // The add action dims when it would be rejected
        let addable = parsed.map(|v| !data.presets.contains(v)).unwrap_or(false);
        let add_style = if addable {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        hints.push(Span::styled("a", add_style));
        hints.push(Span::styled(
            " add to presets   ",
            if addable {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ));
    }
    hints.push(key("esc"));
    hints.push(Span::raw(" cancel"));

    vec![Line::from(input), Line::from(hints)]
}

fn key(label: &str) -> Span<'static> {
    Span::styled(
        label.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}
