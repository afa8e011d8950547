use std::io;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyEventKind;
use crossterm::queue;
use crossterm::style::Attribute;
use crossterm::style::Attributes;
use crossterm::style::Color;
use crossterm::style::ContentStyle;
use crossterm::style::PrintStyledContent;
use crossterm::style::StyledContent;
use crossterm::terminal;

use crate::events::UiEvent;
use crate::field::Grid;
use crate::io::convert_event;
use crate::view::StateUpdate;
use crate::view::View;
use crate::view::Widgets;
use crate::view::layout;
use crate::view::layout::Style;

/// Draws the game on a terminal and reads input from it.
///
/// The terminal is expected to be in raw mode, with mouse capture on, for the lifetime of the
/// view. Every update repaints the whole screen, which is plenty for the grids this is meant for.
pub struct TermView<W: Write> {
    out: W,

    /// Last grid handed to `update_field`, kept to repaint on widget changes
    grid: Grid,

    widgets: Widgets,
}

impl<W: Write> TermView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            grid: Grid::default(),
            widgets: Widgets::default(),
        }
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    /// Repaint the screen
    pub fn draw(&mut self) -> io::Result<()> {
        let lines = layout::layout(&self.grid, &self.widgets);

        queue!(
            self.out,
            terminal::BeginSynchronizedUpdate,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        for line in &lines {
            for span in line {
                let content = StyledContent::new(style(span.style), span.text.as_str());
                queue!(self.out, PrintStyledContent(content))?;
            }

            queue!(self.out, cursor::MoveToNextLine(1))?;
        }

        queue!(self.out, terminal::EndSynchronizedUpdate)?;
        self.out.flush()
    }

    /// Turn a terminal event into what the user meant, if anything
    pub fn handle_event(&mut self, event: CtEvent) -> io::Result<Option<UiEvent>> {
        // Any key acknowledges a pending alert, and does nothing else
        let pressed = matches!(event, CtEvent::Key(key) if key.kind == KeyEventKind::Press);

        if pressed && self.widgets.alert.is_some() {
            self.widgets.alert = None;
            self.draw()?;

            return Ok(None);
        }

        Ok(convert_event(&self.widgets, event))
    }
}

fn style(style: Style) -> ContentStyle {
    let (color, attribute) = match style {
        Style::Title => (Color::White, Some(Attribute::Bold)),
        Style::Alive => (Color::Green, None),
        Style::Dead => (Color::DarkGrey, None),
        Style::Button => (Color::Cyan, Some(Attribute::Bold)),
        Style::ButtonDisabled => (Color::DarkGrey, Some(Attribute::Dim)),
        Style::Text => (Color::Reset, None),
        Style::Help => (Color::DarkGrey, None),
        Style::Alert => (Color::Red, Some(Attribute::Bold)),
    };

    ContentStyle {
        foreground_color: Some(color),
        attributes: attribute.map_or_else(Attributes::default, Attributes::from),
        ..ContentStyle::default()
    }
}

impl<W: Write> View for TermView<W> {
    fn update_field(&mut self, grid: &Grid) -> io::Result<()> {
        self.grid.clone_from(grid);
        self.widgets.track_grid(grid);

        self.draw()
    }

    fn update_state(&mut self, state: StateUpdate) -> io::Result<()> {
        self.widgets.apply(state);

        self.draw()
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        self.widgets.alert = Some(message.to_string());

        self.draw()
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        self.handle_event(event)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event as CtEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;

    use super::TermView;
    use crate::events::UiEvent;
    use crate::field::Grid;
    use crate::view::StateUpdate;
    use crate::view::View;

    fn key(c: char) -> CtEvent {
        CtEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_draw_writes_screen() {
        let mut view = TermView::new(Vec::new());

        view.update_field(&Grid::from_rows(&[[1u8, 0]])).unwrap();
        view.update_state(StateUpdate {
            width: Some(2),
            height: Some(1),
            speed: Some(1.0),
            running: None,
        })
        .unwrap();

        let out = String::from_utf8_lossy(&view.out);
        assert!(out.contains("Game of Life"));
        assert!(out.contains("██"));
        assert!(out.contains("Width: 2  Height: 1"));
        assert!(out.contains("1.0 s"));
    }

    #[test]
    fn test_alert_swallows_next_key() {
        let mut view = TermView::new(Vec::new());
        view.update_field(&Grid::from_rows(&[[1u8]])).unwrap();

        view.alert("Game over!").unwrap();
        assert!(String::from_utf8_lossy(&view.out).contains("Game over!"));

        assert_eq!(view.handle_event(key('n')).unwrap(), None);
        assert_eq!(view.widgets().alert, None);
        assert_eq!(view.handle_event(key('n')).unwrap(), Some(UiEvent::Step));
    }
}
