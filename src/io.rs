use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::ScreenSize;
use crate::events::UiEvent;
use crate::view::Button;
use crate::view::SPEED_MAX;
use crate::view::SPEED_STEP;
use crate::view::Widgets;
use crate::view::layout::CELL_WIDTH;
use crate::view::layout::GRID_TOP;

/// Converts a crossterm event into a game event, given what is currently on screen
pub fn convert_event(widgets: &Widgets, event: CtEvent) -> Option<UiEvent> {
    match event {
        CtEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            convert_key(widgets, key_event)
        }
        CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => cell_at(widgets, column, row).map(|(x, y)| UiEvent::CellClick { x, y }),
        CtEvent::Resize(..) => Some(UiEvent::Redraw),
        _ => None,
    }
}

fn convert_key(widgets: &Widgets, key_event: KeyEvent) -> Option<UiEvent> {
    // Disabled buttons don't click
    let press = |button: Button, event: UiEvent| widgets.is_enabled(button).then_some(event);

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(UiEvent::Exit),
        KeyEvent {
            code: KeyCode::Char(' ' | 'p'),
            ..
        } => press(Button::Run, UiEvent::RunToggle(!widgets.running)),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => press(Button::Next, UiEvent::Step),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => press(Button::Random, UiEvent::Randomize),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => press(Button::Clear, UiEvent::Clear),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Some(UiEvent::SpeedChange(nudge_speed(widgets.speed, 1))),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Some(UiEvent::SpeedChange(nudge_speed(widgets.speed, -1))),
        KeyEvent {
            code: KeyCode::Right,
            ..
        } => Some(resize(widgets, 1, 0)),
        KeyEvent {
            code: KeyCode::Left,
            ..
        } => Some(resize(widgets, -1, 0)),
        KeyEvent {
            code: KeyCode::Up, ..
        } => Some(resize(widgets, 0, 1)),
        KeyEvent {
            code: KeyCode::Down,
            ..
        } => Some(resize(widgets, 0, -1)),
        _ => None,
    }
}

/// Move the speed slider by `notches`, staying on the slider
fn nudge_speed(speed: f64, notches: i32) -> f64 {
    let notch = (speed / SPEED_STEP).round() + notches as f64;

    (notch * SPEED_STEP).clamp(0.0, SPEED_MAX)
}

/// Size inputs never go below one cell
fn resize(widgets: &Widgets, dw: isize, dh: isize) -> UiEvent {
    let step = |n: usize, d: isize| n.saturating_add_signed(d).max(1);

    UiEvent::SizeChange {
        width: step(widgets.width, dw),
        height: step(widgets.height, dh),
    }
}

/// Cell under the screen position `(column, row)`, if any
pub fn cell_at(widgets: &Widgets, column: ScreenSize, row: ScreenSize) -> Option<(usize, usize)> {
    let y = row.checked_sub(GRID_TOP)? as usize;
    let x = (column / CELL_WIDTH) as usize;

    (x < widgets.grid_width && y < widgets.grid_height).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event as CtEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::cell_at;
    use super::convert_event;
    use crate::events::UiEvent;
    use crate::field::Grid;
    use crate::view::Widgets;

    fn key(code: KeyCode) -> CtEvent {
        CtEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// Widgets for a 4x3 field with some life on it
    fn live_widgets() -> Widgets {
        let mut widgets = Widgets {
            width: 4,
            height: 3,
            speed: 1.0,
            ..Default::default()
        };
        widgets.track_grid(&Grid::from_rows(&[[0u8, 0, 0, 1], [0; 4], [0; 4]]));

        widgets
    }

    #[test]
    fn test_buttons() {
        let widgets = live_widgets();
        let convert = |code| convert_event(&widgets, key(code));

        assert_eq!(convert(KeyCode::Char(' ')), Some(UiEvent::RunToggle(true)));
        assert_eq!(convert(KeyCode::Char('n')), Some(UiEvent::Step));
        assert_eq!(convert(KeyCode::Char('r')), Some(UiEvent::Randomize));
        assert_eq!(convert(KeyCode::Char('c')), Some(UiEvent::Clear));
        assert_eq!(convert(KeyCode::Char('q')), Some(UiEvent::Exit));
        assert_eq!(convert(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_run_button_asks_for_opposite() {
        let mut widgets = live_widgets();
        widgets.running = true;

        assert_eq!(
            convert_event(&widgets, key(KeyCode::Char('p'))),
            Some(UiEvent::RunToggle(false))
        );
    }

    #[test]
    fn test_disabled_buttons_ignore_keys() {
        let mut widgets = live_widgets();
        widgets.track_grid(&Grid::dead(4, 3));

        assert_eq!(convert_event(&widgets, key(KeyCode::Char(' '))), None);
        assert_eq!(convert_event(&widgets, key(KeyCode::Char('n'))), None);
        assert_eq!(convert_event(&widgets, key(KeyCode::Char('c'))), None);
        assert_eq!(
            convert_event(&widgets, key(KeyCode::Char('r'))),
            Some(UiEvent::Randomize)
        );
    }

    #[test]
    fn test_ctrl_c_exits() {
        let widgets = Widgets::default();
        let event = CtEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(convert_event(&widgets, event), Some(UiEvent::Exit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let widgets = live_widgets();
        let event = CtEvent::Key(KeyEvent::new_with_kind(
            KeyCode::Char('n'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));

        assert_eq!(convert_event(&widgets, event), None);
    }

    #[test]
    fn test_speed_slider() {
        let mut widgets = live_widgets();
        let speed = |widgets: &Widgets, code| match convert_event(widgets, key(code)) {
            Some(UiEvent::SpeedChange(s)) => s,
            other => panic!("unexpected {other:?}"),
        };

        assert!((speed(&widgets, KeyCode::Char('+')) - 1.1).abs() < 1e-9);
        assert!((speed(&widgets, KeyCode::Char('-')) - 0.9).abs() < 1e-9);

        widgets.speed = 5.0;
        assert_eq!(speed(&widgets, KeyCode::Char('=')), 5.0);

        widgets.speed = 0.0;
        assert_eq!(speed(&widgets, KeyCode::Char('-')), 0.0);
    }

    #[test]
    fn test_size_inputs() {
        let mut widgets = live_widgets();
        let convert = |widgets: &Widgets, code| convert_event(widgets, key(code));

        assert_eq!(
            convert(&widgets, KeyCode::Right),
            Some(UiEvent::SizeChange {
                width: 5,
                height: 3
            })
        );
        assert_eq!(
            convert(&widgets, KeyCode::Down),
            Some(UiEvent::SizeChange {
                width: 4,
                height: 2
            })
        );

        widgets.width = 1;
        assert_eq!(
            convert(&widgets, KeyCode::Left),
            Some(UiEvent::SizeChange {
                width: 1,
                height: 3
            })
        );
    }

    #[test]
    fn test_click_maps_to_cell() {
        let widgets = live_widgets();

        assert_eq!(
            convert_event(&widgets, click(0, 2)),
            Some(UiEvent::CellClick { x: 0, y: 0 })
        );
        assert_eq!(
            convert_event(&widgets, click(7, 4)),
            Some(UiEvent::CellClick { x: 3, y: 2 })
        );

        // title, past the right edge, below the grid
        assert_eq!(convert_event(&widgets, click(0, 0)), None);
        assert_eq!(cell_at(&widgets, 8, 2), None);
        assert_eq!(cell_at(&widgets, 0, 5), None);
    }

    #[test]
    fn test_resize_redraws() {
        let widgets = Widgets::default();

        assert_eq!(
            convert_event(&widgets, CtEvent::Resize(80, 24)),
            Some(UiEvent::Redraw)
        );
    }
}
