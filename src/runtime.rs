use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::command::Command;

/// Anything that can hand over terminal events with a deadline
pub trait EventSource {
    /// Wait up to `timeout` for the next event
    fn next_event(&self, timeout: Duration) -> Option<Event>;
}

impl EventSource for Receiver<Event> {
    fn next_event(&self, timeout: Duration) -> Option<Event> {
        match self.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // nothing will ever arrive; keep the tick cadence instead of spinning
                thread::sleep(timeout);
                None
            }
        }
    }
}

/// Forward terminal events from a reader thread. The thread exits once the
/// receiver is dropped or the terminal stops producing events.
pub fn terminal_events() -> Receiver<Event> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    rx
}

/// What the event loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Command(Command),
    Resize,
    /// the tick interval passed without a command
    Tick,
}

/// Turns raw terminal events into commands, one step at a time
pub struct Runner<E> {
    events: E,
    tick_rate: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(events: E, tick_rate: Duration) -> Self {
        Self { events, tick_rate }
    }

    /// Wait for the next command or resize, or a tick once `tick_rate` has passed.
    /// `typing` is the test's input gate and decides how keys are read.
    pub fn step(&self, typing: bool) -> Step {
        let deadline = Instant::now() + self.tick_rate;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.events.next_event(remaining) {
                Some(Event::Key(key)) => {
                    if let Some(command) = Command::from_key(key, typing) {
                        return Step::Command(command);
                    }
                }
                Some(Event::Resize(_, _)) => return Step::Resize,
                Some(_) => {}
                None => return Step::Tick,
            }
        }
    }
}
