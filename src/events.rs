//! Interrupt-driven signal queue.
//!
//! Signals are produced by:
//! - Button ISRs (adult request, child request, fire alarm)
//! - The wall-clock scheduler (clock tick)
//!
//! Signals are consumed by the main loop, which hands them one at a time
//! to [`ShopService::dispatch`](crate::app::service::ShopService::dispatch).
//! Each one runs to completion before the next is taken.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Fire ISR    │────▶│  fire latch      │────▶│              │
//! │ Clock       │────▶│  tick counter    │────▶│  Main Loop   │
//! │ Button ISRs │────▶│  arrival channel │────▶│  (consumer)  │
//! └─────────────┘     │  (bounded, 16)   │     └──────────────┘
//!                     └──────────────────┘
//! ```
//!
//! Pop order is alarm, then ticks, then arrivals.  The fire alarm never
//! waits behind queued arrivals, and the arrivals that were pressed before
//! it are cancelled when it is handed out: those people are evacuated
//! with everyone else.  Each arrival carries the alarm epoch current when
//! it was pushed; anything older than the last alarm handed out is
//! dropped on the way out.
//!
//! Clock ticks never share the arrival channel, so a burst of button
//! presses cannot make the shop clock fall behind.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::error::{Error, Result};

/// Maximum number of pending arrivals.
pub const SIGNAL_QUEUE_DEPTH: usize = 16;

/// External inputs to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Signal {
    // ── Safety (highest priority) ─────────────────────────
    /// Fire alarm: evacuate the shop.
    FireAlarm = 0,

    // ── Arrivals ──────────────────────────────────────────
    /// An adult asks to come in.
    AdultRequest = 10,
    /// A child asks to come in, with one parent.
    ChildRequest = 11,

    // ── Clock ─────────────────────────────────────────────
    /// Wall-clock period elapsed.
    ClockTick = 20,
}

impl Signal {
    /// Decode a raw input byte (e.g. from a fuzzer or a serial line).
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::FireAlarm),
            10 => Some(Self::AdultRequest),
            11 => Some(Self::ChildRequest),
            20 => Some(Self::ClockTick),
            _ => None,
        }
    }
}

/// An arrival waiting in the channel, stamped with the alarm epoch.
#[derive(Debug, Clone, Copy)]
struct Arrival {
    signal: Signal,
    epoch: u32,
}

/// Bounded, ISR-safe multi-producer queue with a fire-alarm latch and a
/// clock-tick counter.
pub struct SignalQueue {
    arrivals: Channel<CriticalSectionRawMutex, Arrival, SIGNAL_QUEUE_DEPTH>,
    fire_alarm: AtomicBool,
    /// Bumped by every alarm push.
    alarm_epoch: AtomicU32,
    /// Epoch of the last alarm handed out; older arrivals are cancelled.
    cleared_epoch: AtomicU32,
    pending_ticks: AtomicU32,
    dropped: AtomicU32,
    cancelled: AtomicU32,
}

impl Default for SignalQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalQueue {
    pub const fn new() -> Self {
        Self {
            arrivals: Channel::new(),
            fire_alarm: AtomicBool::new(false),
            alarm_epoch: AtomicU32::new(0),
            cleared_epoch: AtomicU32::new(0),
            pending_ticks: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            cancelled: AtomicU32::new(0),
        }
    }

    /// Push a signal.  Safe to call from ISR context (never blocks).
    ///
    /// A fire alarm is latched and a clock tick is counted; neither can
    /// be dropped.  An arrival on a full queue is dropped and reported
    /// as an error.
    pub fn push(&self, signal: Signal) -> Result<()> {
        match signal {
            Signal::FireAlarm => {
                // Epoch first: whoever sees the latch sees the new epoch.
                self.alarm_epoch.fetch_add(1, Ordering::AcqRel);
                self.fire_alarm.store(true, Ordering::Release);
                Ok(())
            }
            Signal::ClockTick => {
                self.pending_ticks.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Signal::AdultRequest | Signal::ChildRequest => {
                let epoch = self.alarm_epoch.load(Ordering::Acquire);
                if self.arrivals.try_send(Arrival { signal, epoch }).is_err() {
                    let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                    warn!("Signal queue full, dropped {:?} ({} total)", signal, total);
                    return Err(Error::Queue("signal queue full"));
                }
                Ok(())
            }
        }
    }

    /// Pop the next signal: a latched fire alarm, then pending clock
    /// ticks, then arrivals in the order they were pushed.  Arrivals
    /// pushed before the last alarm handed out are discarded.
    pub fn pop(&self) -> Option<Signal> {
        if self.fire_alarm.swap(false, Ordering::AcqRel) {
            let epoch = self.alarm_epoch.load(Ordering::Acquire);
            self.cleared_epoch.store(epoch, Ordering::Release);
            return Some(Signal::FireAlarm);
        }

        if self
            .pending_ticks
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
        {
            return Some(Signal::ClockTick);
        }

        let cleared = self.cleared_epoch.load(Ordering::Acquire);
        while let Ok(arrival) = self.arrivals.try_receive() {
            if arrival.epoch >= cleared {
                return Some(arrival.signal);
            }
            self.cancelled.fetch_add(1, Ordering::Relaxed);
            info!("Signal queue: {:?} cancelled by fire alarm", arrival.signal);
        }
        None
    }

    /// Drain all pending signals into a callback.
    /// The fire latch is checked again before every signal, so an alarm
    /// raised mid-drain jumps the rest of the queue and cancels it.
    pub fn drain(&self, mut handler: impl FnMut(Signal)) {
        while let Some(signal) = self.pop() {
            handler(signal);
        }
    }

    /// Number of pending signals, including a latched alarm.  Arrivals an
    /// alarm has already cancelled still count until they are popped.
    pub fn len(&self) -> usize {
        self.arrivals.len()
            + usize::from(self.fire_alarm.load(Ordering::Acquire))
            + self.pending_ticks.load(Ordering::Acquire) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arrivals lost to a full queue since startup.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Arrivals discarded because a fire alarm followed them.
    pub fn cancelled(&self) -> u32 {
        self.cancelled.load(Ordering::Relaxed)
    }
}
