//! Lays a board snapshot out as styled text lines for a given terminal size.

use clisweeper_core::{BoardSnapshot, Coord2, GameState, Glyph};
use crossterm::style::Color;

const BANNER: [&str; 3] = ["+============+", "| CLIsweeper |", "+============+"];

/// Banner, status line and a spacer above the grid.
const HEADER_ROWS: u16 = BANNER.len() as u16 + 2;
/// Spacer, outcome message and key help below the grid.
const FOOTER_ROWS: u16 = 3;

const NUMBER_COLORS: [Color; 8] = [
    Color::Blue,
    Color::DarkGreen,
    Color::Red,
    Color::DarkBlue,
    Color::DarkRed,
    Color::DarkCyan,
    Color::Black,
    Color::Grey,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Style {
    const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bold: false,
        }
    }

    const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

pub type Line = Vec<Span>;

/// One screenful, lines never exceed the viewport width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    lines: Vec<Line>,
}

impl Frame {
    fn new(width: u16) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Plain text of every line, styles dropped.
    pub fn text(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }

    fn push_line(&mut self, spans: impl IntoIterator<Item = (String, Style)>) {
        let mut room = usize::from(self.width);
        let mut line = Line::new();
        for (mut text, style) in spans {
            if room == 0 {
                break;
            }
            if let Some((cut, _)) = text.char_indices().nth(room) {
                text.truncate(cut);
            }
            room -= text.chars().count();
            line.push(Span { text, style });
        }
        self.lines.push(line);
    }

    fn push_text(&mut self, text: impl Into<String>, style: Style) {
        self.push_line([(text.into(), style)]);
    }
}

/// Smallest terminal that can show a board of `size`.
pub fn required_size(size: Coord2) -> (u16, u16) {
    let grid_width = (2 * u16::from(size.0)).saturating_sub(1);
    let banner_width = BANNER[0].len() as u16;
    (
        grid_width.max(banner_width),
        HEADER_ROWS + u16::from(size.1) + FOOTER_ROWS,
    )
}

pub fn glyph_char(glyph: Glyph) -> char {
    match glyph {
        Glyph::Hidden => '#',
        Glyph::Flagged => 'F',
        Glyph::Questioned => '?',
        Glyph::Empty => ' ',
        Glyph::Number(count) => char::from(b'0' + count.min(9)),
        Glyph::Mine => '*',
    }
}

fn glyph_style(glyph: Glyph) -> Style {
    match glyph {
        Glyph::Hidden => Style::fg(Color::Grey),
        Glyph::Flagged | Glyph::Questioned => Style::fg(Color::DarkCyan),
        Glyph::Empty => Style::default(),
        Glyph::Number(count) => NUMBER_COLORS
            .get(usize::from(count.saturating_sub(1)))
            .map_or_else(Style::default, |&color| Style::fg(color)),
        Glyph::Mine => Style::fg(Color::Red).bold(),
    }
}

pub fn render(snapshot: &BoardSnapshot, viewport: Viewport) -> Frame {
    let mut frame = Frame::new(viewport.width);

    let (min_width, min_height) = required_size(snapshot.size);
    if viewport.width < min_width || viewport.height < min_height {
        frame.push_text("Terminal too small", Style::fg(Color::Red).bold());
        frame.push_text(format!("need {}x{}", min_width, min_height), Style::default());
        return frame;
    }

    for banner_line in BANNER {
        frame.push_text(banner_line, Style::fg(Color::DarkCyan));
    }
    frame.push_text(
        format!(
            "Flags left: {}  Time: {}",
            snapshot.flags_left, snapshot.elapsed_secs
        ),
        Style::default(),
    );
    frame.push_text("", Style::default());

    let in_progress = matches!(snapshot.state, GameState::InProgress);
    for row in snapshot.iter_rows() {
        let mut spans = Vec::new();
        for (coords, glyph) in row {
            if coords.0 > 0 {
                spans.push((" ".to_owned(), Style::default()));
            }
            let (ch, style) = if in_progress && coords == snapshot.cursor {
                let ch = match glyph {
                    Glyph::Empty => 'o',
                    _ => glyph_char(glyph),
                };
                (ch, Style::fg(Color::Red).bold())
            } else {
                (glyph_char(glyph), glyph_style(glyph))
            };
            spans.push((ch.to_string(), style));
        }
        frame.push_line(spans);
    }

    frame.push_text("", Style::default());
    match snapshot.state {
        GameState::InProgress => {
            frame.push_text("", Style::default());
            frame.push_text(
                "arrows move, space reveal, f flag, g question, q give up",
                Style::fg(Color::Grey),
            );
        }
        GameState::Won => {
            frame.push_text("You win! :)", Style::fg(Color::Green).bold());
            frame.push_text("r new game, q quit", Style::fg(Color::Grey));
        }
        GameState::Lost => {
            frame.push_text("Game over :(", Style::fg(Color::Red).bold());
            frame.push_text("r new game, q quit", Style::fg(Color::Grey));
        }
    }

    frame
}
