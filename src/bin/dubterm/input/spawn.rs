//! Key-capture thread. Blocks on crossterm reads and forwards semantic
//! events, leaving the event loop free to run its tick.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};
use dubterm::log_debug;
use std::env;
use std::thread;

use super::event::{map_key_event, InputEvent};

/// Turn a raw terminal event into something the event loop understands.
fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key_event(key),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

/// Read terminal events until the channel closes or the read fails.
///
/// A failed send means the event loop is gone and the thread just returns.
/// A failed read usually means the tty went away, so it is logged first.
pub(crate) fn spawn_input_thread(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        // DUBTERM_DEBUG_INPUT mirrors every forwarded event into the debug log.
        let echo = env::var_os("DUBTERM_DEBUG_INPUT").is_some();
        loop {
            let raw = match event::read() {
                Ok(raw) => raw,
                Err(err) => {
                    log_debug(&format!("terminal event read failed: {err}"));
                    return;
                }
            };
            if let Some(input) = translate(raw) {
                if echo {
                    log_debug(&format!("input: {input:?}"));
                }
                if tx.send(input).is_err() {
                    return;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn key_events_translate_through_the_key_map() {
        let raw = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
        assert_eq!(translate(raw), Some(InputEvent::Submit));
    }

    #[test]
    fn resize_events_carry_the_new_geometry() {
        assert_eq!(
            translate(Event::Resize(120, 40)),
            Some(InputEvent::Resize {
                cols: 120,
                rows: 40
            })
        );
    }

    #[test]
    fn focus_events_are_dropped() {
        assert_eq!(translate(Event::FocusGained), None);
        assert_eq!(translate(Event::FocusLost), None);
    }
}
