use crate::ScreenSize;
use crate::cell::Cell;
use crate::field::Grid;
use crate::view::Button;
use crate::view::SPEED_MAX;
use crate::view::SPEED_STEP;
use crate::view::Widgets;

pub const TITLE: &str = "Game of Life";

/// Screen row of the first grid row
pub const GRID_TOP: ScreenSize = 2;

/// Every cell is drawn this many columns wide, so it looks roughly square
pub const CELL_WIDTH: ScreenSize = 2;

const ALIVE: &str = "██";
const DEAD: &str = "··";

const HELP: &str = "space: run/stop  n: next  r: random  c: clear  +/-: speed  arrows: size  q: quit";

/// What a span looks like, mapped to terminal colors when painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Title,
    Alive,
    Dead,
    Button,
    ButtonDisabled,
    Text,
    Help,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub type Line = Vec<Span>;

/// Lay out the whole screen, top to bottom
pub fn layout(grid: &Grid, widgets: &Widgets) -> Vec<Line> {
    let mut lines = vec![vec![Span::new(TITLE, Style::Title)], Vec::new()];

    for row in grid.rows() {
        // consecutive cells of the same state share a span
        let mut line: Line = Vec::new();
        for &cell in row {
            let (glyph, style) = match cell {
                Cell::Alive => (ALIVE, Style::Alive),
                Cell::Dead => (DEAD, Style::Dead),
            };

            match line.last_mut() {
                Some(span) if span.style == style => span.text.push_str(glyph),
                _ => line.push(Span::new(glyph, style)),
            }
        }

        lines.push(line);
    }

    lines.push(Vec::new());
    lines.push(buttons(widgets));
    lines.push(vec![Span::new(
        format!("Width: {}  Height: {}", widgets.width, widgets.height),
        Style::Text,
    )]);
    lines.push(vec![Span::new(
        format!("Speed: [{}] {}", slider(widgets.speed), speed_output(widgets.speed)),
        Style::Text,
    )]);
    lines.push(vec![Span::new(HELP, Style::Help)]);

    if let Some(alert) = &widgets.alert {
        lines.push(vec![Span::new(
            format!("{alert} (press any key)"),
            Style::Alert,
        )]);
    }

    lines
}

fn buttons(widgets: &Widgets) -> Line {
    let mut line = Vec::new();

    for (i, button) in Button::ALL.into_iter().enumerate() {
        if i > 0 {
            line.push(Span::new(" ", Style::Text));
        }

        let style = if widgets.is_enabled(button) {
            Style::Button
        } else {
            Style::ButtonDisabled
        };

        line.push(Span::new(format!("[ {} ]", button.label(widgets)), style));
    }

    line
}

/// One notch per slider step
fn slider(speed: f64) -> String {
    let notches = (SPEED_MAX / SPEED_STEP).round() as usize;
    let filled = ((speed.clamp(0.0, SPEED_MAX) / SPEED_STEP).round() as usize).min(notches);

    format!("{}{}", "#".repeat(filled), "-".repeat(notches - filled))
}

/// The readout next to the slider, e.g. `1.0 s`
pub fn speed_output(speed: f64) -> String {
    format!("{speed:.1} s")
}

/// Lines as plain text, without styling
pub fn to_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.iter().map(|span| span.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
