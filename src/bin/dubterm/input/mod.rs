//! Input subsystem wiring that turns terminal key presses into form events.

mod event;
mod spawn;

pub(crate) use event::InputEvent;
pub(crate) use spawn::spawn_input_thread;
