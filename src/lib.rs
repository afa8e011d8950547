pub mod cell;
pub mod config;
pub mod events;
pub mod field;
pub mod game;
pub mod io;
pub mod timer;
pub mod view;

pub type ScreenSize = u16;
