use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::confetti::ConfettiAnimation;
use crate::round::Round;
use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 4;
const GALLOWS_PARTS: u32 = 10;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Setup => render_setup(self, area, buf),
            Screen::Playing => render_playing(self, area, buf),
            Screen::RoundComplete => render_round_complete(self, area, buf),
            Screen::GameComplete => {
                render_game_complete(self, area, buf);
                if self.confetti.is_active {
                    render_confetti(&self.confetti, area, buf);
                }
            }
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Paragraph centered both ways by padding the top with a computed gap.
fn render_centered_lines(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let gap = (area.height.saturating_sub(lines.len() as u16)) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([Constraint::Length(gap), Constraint::Min(1)])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let difficulty = session.difficulty();
    let scoring = session.scoring();

    let lines = vec![
        Line::from(Span::styled("G A L L O W S", bold().fg(Color::Cyan))),
        Line::from(""),
        Line::from(vec![
            Span::raw("category "),
            Span::styled(session.category_name().to_string(), bold()),
            Span::raw("  ·  difficulty "),
            Span::styled(session.difficulty_name().to_string(), bold()),
        ]),
        Line::from(""),
        Line::from(format!(
            "{} rounds · {}s per word · {} wrong guesses allowed",
            session.rounds_per_session(),
            difficulty.time_per_question,
            difficulty.max_wrong_guesses,
        )),
        Line::from(Span::styled(
            format!(
                "wrong guess -{} · timeout -{} · no-hint bonus +{}",
                scoring.wrong_guess_penalty, scoring.timeout_penalty, scoring.hint_bonus
            ),
            dim(),
        )),
        Line::from(Span::styled(
            format!("confetti at {}+ points", difficulty.confetti_threshold),
            dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("(enter) start  (esc) quit", dim())),
    ];

    render_centered_lines(lines, area, buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let Some(round) = session.round() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1), // timer
            Constraint::Length(1), // time gauge
            Constraint::Length(1), // badges
            Constraint::Length(1),
            Constraint::Min(7),    // word + hints | gallows
            Constraint::Length(3), // keyboard
            Constraint::Length(1), // help
        ])
        .split(area);

    let timer_style = if round.time_left() <= 10 {
        bold().fg(Color::Red)
    } else {
        bold()
    };
    Paragraph::new(Span::styled(format!("{}s", round.time_left()), timer_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let ratio = f64::from(round.time_left()) / f64::from(round.time_per_question().max(1));
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("")
        .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("round {}/{}", session.round_number(), session.rounds_per_session()),
            bold(),
        ),
        Span::raw("   "),
        Span::styled(format!("score {}", session.score()), bold().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(
            format!("{} · {}", session.category_name(), session.difficulty_name()),
            dim(),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(12)])
        .split(chunks[4]);

    render_word_panel(round, app, main[0], buf);
    render_gallows(round, main[1], buf);
    render_keyboard(round, chunks[5], buf);

    Paragraph::new(Span::styled(
        "type a letter to guess · (1)(2) hints · (esc) quit",
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

fn render_word_panel(round: &Round, app: &App, area: Rect, buf: &mut Buffer) {
    let mask = spaced_mask(&round.masked_word());
    // Center short masks; long ones wrap better left-aligned.
    let alignment = if mask.width() <= area.width as usize {
        Alignment::Center
    } else {
        Alignment::Left
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(mask, bold().fg(Color::Cyan))),
        Line::from(""),
    ];

    if round.hint1_shown() {
        lines.push(Line::from(Span::styled(
            format!("hint 1: {}", round.hint1()),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled("(1) reveal hint 1", dim())));
    }
    if round.hint2_shown() {
        lines.push(Line::from(Span::styled(
            format!("hint 2: {}", round.hint2()),
            Style::default().fg(Color::Yellow),
        )));
    } else if round.hint1_used() {
        lines.push(Line::from(Span::styled(
            format!("(2) reveal hint 2 (-{})", app.session.scoring().hint2_penalty),
            dim(),
        )));
    }

    Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_gallows(round: &Round, area: Rect, buf: &mut Buffer) {
    let mut lines: Vec<Line> = gallows_art(round.wrong_guesses(), round.max_wrong_guesses())
        .into_iter()
        .map(Line::from)
        .collect();
    lines.push(Line::from(Span::styled(
        format!("{}/{}", round.wrong_guesses(), round.max_wrong_guesses()),
        if round.wrong_guesses() > 0 {
            Style::default().fg(Color::Red)
        } else {
            dim()
        },
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_keyboard(round: &Round, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let mut spans = Vec::new();
            for letter in row.chars() {
                let style = if round.guessed().contains(&letter) {
                    if round.word().contains(letter) {
                        bold().fg(Color::Green)
                    } else {
                        dim().fg(Color::Red)
                    }
                } else {
                    Style::default()
                };
                spans.push(Span::styled(letter.to_string(), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_round_complete(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let word = session.round().map(|r| r.word().to_string()).unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("round {}/{}", session.round_number(), session.rounds_per_session()),
            dim(),
        )),
        Line::from(""),
    ];

    if let Some(resolution) = &app.last_resolution {
        if resolution.outcome.is_won() {
            lines.push(Line::from(Span::styled("Correct!", bold().fg(Color::Green))));
            lines.push(Line::from(Span::styled(word, bold())));
            lines.push(Line::from(format!("+{} points", resolution.round_score)));
        } else {
            lines.push(Line::from(Span::styled("Missed", bold().fg(Color::Red))));
            lines.push(Line::from(Span::styled(word, bold())));
            if resolution.outcome.timed_out() {
                lines.push(Line::from(Span::styled(
                    format!("-{} timeout penalty", session.scoring().timeout_penalty),
                    Style::default().fg(Color::Red),
                )));
            } else {
                lines.push(Line::from("better luck next time"));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("score {}", session.score()),
        bold().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("(enter) next round  (r) setup", dim())));

    render_centered_lines(lines, area, buf);
}

fn render_game_complete(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(summary) = app.session.summary() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled("Game Complete", dim())),
        Line::from(""),
        Line::from("final score"),
        Line::from(Span::styled(
            format!("{}", summary.final_score),
            bold().fg(Color::Yellow),
        )),
        Line::from(""),
    ];
    if summary.confetti {
        lines.push(Line::from(Span::styled(
            "new high spirits! enjoy the confetti",
            Style::default().fg(Color::Magenta),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "(enter) play again  (r) setup  (esc) quit",
        dim(),
    )));

    render_centered_lines(lines, area, buf);
}

/// Draw confetti pieces on top of whatever is already in the buffer.
fn render_confetti(confetti: &ConfettiAnimation, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Magenta,
        Color::Blue,
        Color::LightRed,
        Color::LightYellow,
        Color::LightGreen,
        Color::LightCyan,
    ];

    for piece in &confetti.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let x = piece.x as u16;
        let y = piece.y as u16;
        if x < area.width && y < area.height {
            let color = colors[piece.color_index % colors.len()];
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&piece.symbol.to_string());
                cell.set_style(Style::default().fg(color));
            }
        }
    }
}

/// Masked word with letters spread out for readability; spaces between words
/// widen to a clear gap.
pub fn spaced_mask(mask: &str) -> String {
    let mut out = String::new();
    for (i, c) in mask.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(if c == ' ' { ' ' } else { c });
    }
    out
}

/// ASCII gallows built from the same ten parts as the classic drawing, with
/// parts shown proportional to the wrong-guess budget spent. The figure is
/// complete exactly when the budget is exhausted.
pub fn gallows_art(wrong_guesses: u32, max_wrong_guesses: u32) -> Vec<String> {
    const WIDTH: usize = 8;
    const HEIGHT: usize = 6;

    let shown = if max_wrong_guesses == 0 {
        GALLOWS_PARTS
    } else {
        let ratio = f64::from(wrong_guesses) / f64::from(max_wrong_guesses);
        ((ratio * f64::from(GALLOWS_PARTS)).ceil() as u32).min(GALLOWS_PARTS)
    };

    let mut grid = vec![vec![' '; WIDTH]; HEIGHT];

    // base
    if shown >= 1 {
        for cell in grid[5].iter_mut().take(7) {
            *cell = '─';
        }
    }
    // pole
    if shown >= 2 {
        for row in grid.iter_mut().take(5) {
            row[1] = '│';
        }
        grid[5][1] = '┴';
    }
    // top beam
    if shown >= 3 {
        for col in 2..5 {
            grid[0][col] = '─';
        }
        grid[0][1] = '┌';
        grid[0][5] = '┐';
    }
    // noose
    if shown >= 4 {
        grid[1][5] = '│';
    }
    // head
    if shown >= 5 {
        grid[2][5] = 'O';
    }
    // body
    if shown >= 6 {
        grid[3][5] = '│';
    }
    // arms
    if shown >= 7 {
        grid[3][4] = '/';
    }
    if shown >= 8 {
        grid[3][6] = '\\';
    }
    // legs
    if shown >= 9 {
        grid[4][4] = '/';
    }
    if shown >= 10 {
        grid[4][6] = '\\';
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}
