use std::io;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::events::Flow;
use crate::events::UiEvent;
use crate::field::Fill;
use crate::field::GameField;
use crate::field::Generation;
use crate::timer::Timer;
use crate::view::SPEED_MAX;
use crate::view::StateUpdate;
use crate::view::View;

/// Speed used in place of a non-positive one
pub const SPEED_MIN: f64 = 0.1;

/// Shown when the field has nowhere left to go
pub const GAME_OVER: &str = "Game over!";

/// Keep `speed` in `(0, SPEED_MAX]`, complaining about anything outside
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() || speed <= 0.0 {
        warn!(speed, "Speed must be greater than 0");
        return SPEED_MIN;
    }

    if speed > SPEED_MAX {
        warn!(speed, "Speed should not be more than {SPEED_MAX}");
        return SPEED_MAX;
    }

    speed
}

/// Wires a view to a field: user events mutate the field, and every mutation is drawn.
///
/// While running, a one-shot timer is re-armed after each generation, `speed` seconds apart.
pub struct Game<F, V> {
    field: F,
    view: V,
    timer: Timer,
    running: bool,

    /// Seconds between automatic steps
    speed: f64,
}

impl<F: GameField, V: View> Game<F, V> {
    /// Take ownership of both ends and draw the initial state
    pub fn new(field: F, view: V, speed: f64) -> io::Result<Self> {
        let mut game = Self {
            field,
            view,
            timer: Timer::new(),
            running: false,
            speed: clamp_speed(speed),
        };

        game.render_initial_state()?;

        Ok(game)
    }

    fn render_initial_state(&mut self) -> io::Result<()> {
        let state = self.field.state();

        self.view.update_field(state)?;
        self.view.update_state(StateUpdate {
            width: Some(state.width()),
            height: Some(state.height()),
            speed: Some(self.speed),
            running: Some(self.running),
        })
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// When the next automatic step is due, if one is scheduled
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// React to a single user event
    pub fn handle(&mut self, event: UiEvent, now: Instant) -> io::Result<Flow> {
        debug!(?event, "Handling event");

        match event {
            UiEvent::CellClick { x, y } => self.toggle_cell(x, y)?,
            UiEvent::RunToggle(run) => self.toggle_is_running(run, now)?,
            UiEvent::Step => self.next(now)?,
            UiEvent::Randomize => self.fill(Fill::Random)?,
            UiEvent::Clear => self.fill(Fill::Dead)?,
            UiEvent::SpeedChange(speed) => self.change_speed(speed, now)?,
            UiEvent::SizeChange { width, height } => self.change_field_size(width, height)?,
            UiEvent::Redraw => self.render_initial_state()?,
            UiEvent::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Run a generation if the timer is due
    pub fn tick(&mut self, now: Instant) -> io::Result<()> {
        if self.timer.fire(now) {
            self.next(now)?;
        }

        Ok(())
    }

    fn toggle_cell(&mut self, x: usize, y: usize) -> io::Result<()> {
        if let Err(e) = self.field.toggle_cell(x, y) {
            warn!("Ignoring click: {e}");
            return Ok(());
        }

        self.view.update_field(self.field.state())
    }

    fn change_field_size(&mut self, width: usize, height: usize) -> io::Result<()> {
        self.field.set_size(width, height);

        let state = self.field.state();

        self.view.update_field(state)?;
        self.view.update_state(StateUpdate {
            width: Some(state.width()),
            height: Some(state.height()),
            ..Default::default()
        })
    }

    fn change_speed(&mut self, speed: f64, now: Instant) -> io::Result<()> {
        self.speed = clamp_speed(speed);

        self.view.update_state(StateUpdate {
            speed: Some(self.speed),
            ..Default::default()
        })?;

        if self.running {
            self.start(now);
        }

        Ok(())
    }

    /// One generation, by hand or by timer
    fn next(&mut self, now: Instant) -> io::Result<()> {
        let generation = self.field.next_generation();

        self.view.update_field(self.field.state())?;

        if self.running {
            self.toggle_is_running(generation.is_advanced(), now)?;
        }

        if let Generation::Ended(reason) = generation {
            info!(?reason, "Game over");
            self.view.alert(GAME_OVER)?;
        }

        Ok(())
    }

    fn toggle_is_running(&mut self, run: bool, now: Instant) -> io::Result<()> {
        if run {
            self.start(now);
        } else {
            self.stop();
        }

        if self.running != run {
            info!(running = run, "Toggled auto-step");
            self.running = run;

            self.view.update_state(StateUpdate {
                running: Some(run),
                ..Default::default()
            })?;
        }

        Ok(())
    }

    fn start(&mut self, now: Instant) {
        self.timer.schedule(now, Duration::from_secs_f64(self.speed));
    }

    fn stop(&mut self) {
        self.timer.cancel();
    }

    fn fill(&mut self, fill: Fill) -> io::Result<()> {
        self.field.fill(fill);

        self.view.update_field(self.field.state())
    }
}

#[cfg(test)]
mod tests {
    use super::SPEED_MIN;
    use super::clamp_speed;

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(1.0), 1.0);
        assert_eq!(clamp_speed(5.0), 5.0);
        assert_eq!(clamp_speed(0.0), SPEED_MIN);
        assert_eq!(clamp_speed(-3.0), SPEED_MIN);
        assert_eq!(clamp_speed(f64::NAN), SPEED_MIN);
        assert_eq!(clamp_speed(7.5), 5.0);
    }
}
