//! Terminal input listener
//!
//! Reads crossterm events on a dedicated thread and forwards them as
//! [`Msg`]s into the update loop's queue.

use crossterm::event::{self, Event, KeyEventKind};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::messages::Msg;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Translate a terminal event into a message
///
/// Key releases and repeats (reported by some terminals) are dropped, as are
/// focus and paste events.
pub fn translate(event: Event, at: Instant) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
        Event::Mouse(mouse) => Some(Msg::Mouse { event: mouse, at }),
        Event::Resize(width, height) => Some(Msg::Resize { width, height }),
        _ => None,
    }
}

/// Spawn the listener thread
///
/// The thread exits once the receiving side of `tx` is dropped or reading
/// from the terminal fails.
pub fn spawn_listener(tx: mpsc::UnboundedSender<Msg>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }

        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                tracing::error!(error = %e, "failed to poll terminal events");
                break;
            }
        }

        match event::read() {
            Ok(event) => {
                if let Some(msg) = translate(event, Instant::now()) {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read terminal event");
                break;
            }
        }
    })
}
