/// What the user asked for, independent of how they asked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// A cell of the drawn grid was clicked
    CellClick { x: usize, y: usize },

    /// The run button was pressed. Carries the requested state: `true` to start.
    RunToggle(bool),

    /// Advance the field by one generation
    Step,

    /// Fill the field at random
    Randomize,

    /// Kill every cell
    Clear,

    /// Seconds between automatic steps
    SpeedChange(f64),

    /// New field dimensions, in cells
    SizeChange { width: usize, height: usize },

    /// The screen needs to be drawn again, e.g. after the terminal was resized
    Redraw,

    /// Exit the application
    Exit,
}

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}
