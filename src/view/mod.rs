use std::io;
use std::time::Duration;

use crate::events::UiEvent;
use crate::field::Grid;

pub mod layout;
pub mod term;

pub use self::term::TermView;

/// Largest speed the slider can show, in seconds
pub const SPEED_MAX: f64 = 5.0;

/// Slider resolution, in seconds
pub const SPEED_STEP: f64 = 0.1;

/// Partial update of the control widgets. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateUpdate {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed: Option<f64>,
    pub running: Option<bool>,
}

/// Rendering and input surface of the game
pub trait View {
    /// Draw the grid, and disable the buttons that need a living cell if there is none
    fn update_field(&mut self, grid: &Grid) -> io::Result<()>;

    /// Reflect controller state in the control widgets
    fn update_state(&mut self, state: StateUpdate) -> io::Result<()>;

    /// Show a message the user has to acknowledge
    fn alert(&mut self, message: &str) -> io::Result<()>;

    /// Wait at most `timeout` for the user to do something
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Run,
    Next,
    Random,
    Clear,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Run, Button::Next, Button::Random, Button::Clear];

    pub fn label(self, widgets: &Widgets) -> &'static str {
        match self {
            Button::Run if widgets.running => "Stop",
            Button::Run => "Play",
            Button::Next => "Next",
            Button::Random => "Random",
            Button::Clear => "Clear",
        }
    }

    /// Buttons that are useless on an empty field
    pub fn needs_life(self) -> bool {
        !matches!(self, Button::Random)
    }
}

/// Everything shown on screen besides the grid itself
#[derive(Debug, Clone, PartialEq)]
pub struct Widgets {
    /// Width input
    pub width: usize,

    /// Height input
    pub height: usize,

    /// Speed slider, in seconds
    pub speed: f64,

    pub running: bool,

    /// Set when the drawn grid has no living cell
    pub buttons_disabled: bool,

    /// Dimensions of the drawn grid, used to map clicks to cells
    pub grid_width: usize,
    pub grid_height: usize,

    pub alert: Option<String>,
}

impl Default for Widgets {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            speed: 0.0,
            running: false,
            buttons_disabled: true,
            grid_width: 0,
            grid_height: 0,
            alert: None,
        }
    }
}

impl Widgets {
    pub fn is_enabled(&self, button: Button) -> bool {
        !(button.needs_life() && self.buttons_disabled)
    }

    /// Apply the fields that are set
    pub fn apply(&mut self, state: StateUpdate) {
        if let (Some(width), Some(height)) = (state.width, state.height) {
            self.width = width;
            self.height = height;
        }

        if let Some(speed) = state.speed {
            self.speed = speed;
        }

        if let Some(running) = state.running {
            self.running = running;
        }
    }

    /// Remember the drawn grid's shape and whether it has any life
    pub fn track_grid(&mut self, grid: &Grid) {
        self.grid_width = grid.width();
        self.grid_height = grid.height();
        self.buttons_disabled = grid.is_dead();
    }
}
