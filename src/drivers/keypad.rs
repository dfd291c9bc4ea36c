//! Host keypad: stands in for the three request buttons.
//!
//! A reader thread takes lines from stdin and pushes one [`Signal`] per
//! recognised key into the shared [`SignalQueue`], the same way a button
//! ISR would on the board.
//!
//! | Key | Signal          |
//! |-----|-----------------|
//! | `a` | `AdultRequest`  |
//! | `c` | `ChildRequest`  |
//! | `f` | `FireAlarm`     |
//! | `q` | stop the shop   |
//!
//! Several keys on one line are handled left to right, so `aac` queues two
//! adults and a child.  Closing stdin also stops the shop.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use log::{debug, info, warn};

use crate::events::{Signal, SignalQueue};

/// What a single key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Signal(Signal),
    Quit,
}

/// Map one key to its action.  Unknown keys and whitespace map to `None`.
pub fn key_to_action(key: char) -> Option<KeyAction> {
    match key.to_ascii_lowercase() {
        'a' => Some(KeyAction::Signal(Signal::AdultRequest)),
        'c' => Some(KeyAction::Signal(Signal::ChildRequest)),
        'f' => Some(KeyAction::Signal(Signal::FireAlarm)),
        'q' => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Handle to the reader thread.
pub struct Keypad {
    closed: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Keypad {
    /// Start reading stdin on a background thread.
    pub fn spawn(queue: Arc<SignalQueue>) -> std::io::Result<Self> {
        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);
        let handle = std::thread::Builder::new()
            .name("keypad".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                feed(stdin.lock(), &queue);
                flag.store(true, Ordering::Release);
            })?;
        info!("Keypad: a = adult, c = child, f = fire alarm, q = quit");
        Ok(Self {
            closed,
            handle: Some(handle),
        })
    }

    /// True once the user quit or stdin reached end of file.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Wait for the reader thread if it has already finished.
    pub fn join(mut self) {
        if !self.is_closed() {
            // Blocked in read(); the process exit reaps it.
            return;
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Keypad: reader thread panicked");
            }
        }
    }
}

/// Push signals for every key read from `input` until quit or EOF.
/// Returns the number of signals queued.
pub fn feed(input: impl BufRead, queue: &SignalQueue) -> usize {
    let mut queued = 0;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Keypad: read error: {}", e);
                break;
            }
        };
        for key in line.chars() {
            match key_to_action(key) {
                Some(KeyAction::Signal(signal)) => {
                    debug!("Keypad: {:?}", signal);
                    if queue.push(signal).is_ok() {
                        queued += 1;
                    }
                }
                Some(KeyAction::Quit) => {
                    info!("Keypad: quit");
                    return queued;
                }
                None if key.is_whitespace() => {}
                None => debug!("Keypad: ignoring {:?}", key),
            }
        }
    }
    queued
}
