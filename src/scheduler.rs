//! Wall-clock scheduler.
//!
//! Turns elapsed real time into whole clock ticks.  The scheduler knows
//! nothing about barbers or queues: when a period has elapsed it calls
//! [`TickDelegate::on_tick`], and the main loop's delegate pushes
//! [`Signal::ClockTick`](crate::events::Signal::ClockTick) into the
//! signal queue.
//!
//! ```text
//!   elapsed ms ──▶ TickScheduler ──[period reached]──▶ TickDelegate
//!                                                          │
//!                                                          ▼
//!                                              ShopService::clock_tick()
//! ```
//!
//! Time is fed in by the caller, so tests drive it deterministically.

use log::{info, warn};

use crate::app::ports::TickDelegate;

/// Most ticks fired by one `advance` call.  A longer stall skips the
/// backlog instead of running the barbers through it in a burst.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

/// Fixed-period tick generator.
pub struct TickScheduler {
    period_ms: u32,
    /// Time accumulated towards the next tick.
    pending_ms: u64,
    /// Ticks fired since start.
    ticks: u64,
    /// Ticks skipped after stalls.
    skipped: u64,
    enabled: bool,
}

impl TickScheduler {
    pub fn new(period_ms: u32) -> Self {
        debug_assert!(period_ms > 0, "tick period must be non-zero");
        info!("Scheduler: tick period {} ms", period_ms);
        Self {
            period_ms: period_ms.max(1),
            pending_ms: 0,
            ticks: 0,
            skipped: 0,
            enabled: true,
        }
    }

    /// Account for `delta_ms` of elapsed time and fire every tick that is
    /// now due.  Returns the number fired.
    pub fn advance(&mut self, delta_ms: u32, delegate: &mut impl TickDelegate) -> u32 {
        if !self.enabled {
            return 0;
        }

        self.pending_ms += u64::from(delta_ms);
        let period = u64::from(self.period_ms);
        let due = self.pending_ms / period;
        self.pending_ms %= period;

        let fire = due.min(u64::from(MAX_CATCH_UP_TICKS)) as u32;
        if due > u64::from(fire) {
            let skipped = due - u64::from(fire);
            self.skipped += skipped;
            warn!("Scheduler: stalled, skipped {} ticks", skipped);
        }

        for _ in 0..fire {
            self.ticks += 1;
            delegate.on_tick(self.ticks);
        }
        fire
    }

    /// Stop firing ticks; elapsed time is discarded while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending_ms = 0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Ticks fired since start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks dropped because the caller stalled.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Milliseconds until the next tick is due.
    pub fn until_next_ms(&self) -> u32 {
        (u64::from(self.period_ms) - self.pending_ms) as u32
    }
}
