//! Shop service — the hexagonal core behind one critical section.
//!
//! [`ShopService`] owns the [`Shop`], the indicator panel, and the event
//! sink inside a single `critical-section` mutex.  Every handler below
//! takes that mutex for its whole run, so an arrival's capacity check and
//! its seat increment, a barber's idle check and its next haircut, and the
//! fire alarm's reset are each one indivisible step.  The handlers take
//! `&self` and can be called from button ISRs, the clock, or the main
//! loop; whichever gets the lock first runs to completion.
//!
//! ```text
//!   button ISR ──┐                                  ┌──▶ IndicatorPort
//!   clock tick ──┼──▶ ┌─────────────────────────┐ ──┤
//!   main loop  ──┘    │ critical section        │   └──▶ EventSink
//!                     │  Shop · panel · sink    │
//!                     └─────────────────────────┘
//! ```
//!
//! Nothing inside the lock blocks or loops without bound, so the fire
//! alarm waits at most one arrival or one tick pass.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::info;

use crate::config::ShopConfig;
use crate::events::Signal;
use crate::shop::{Admission, Indicators, Shop};

use super::events::{ShopEvent, Snapshot};
use super::ports::{EventSink, IndicatorPort};

/// Everything the handlers mutate, kept together under one lock.
struct Floor<P, S> {
    shop: Shop,
    panel: P,
    sink: S,
}

/// The shop service orchestrates all domain logic.
pub struct ShopService<P, S> {
    floor: Mutex<CriticalSectionRawMutex, RefCell<Floor<P, S>>>,
}

impl<P: IndicatorPort, S: EventSink> ShopService<P, S> {
    /// Construct the service around an empty shop.
    ///
    /// Does **not** touch the panel — call [`start`](Self::start) next.
    pub fn new(config: &ShopConfig, panel: P, sink: S) -> Self {
        Self {
            floor: Mutex::new(RefCell::new(Floor {
                shop: Shop::new(config),
                panel,
                sink,
            })),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the initial frame on the panel and announce startup.
    pub fn start(&self) {
        self.critical(|floor| {
            floor.sink.emit(&ShopEvent::Started);
            floor.panel.show(&floor.shop.indicators());
        });
        info!("ShopService started");
    }

    // ── Signal handlers ───────────────────────────────────────

    /// Adult request button.
    pub fn adult_request(&self) -> Admission {
        self.critical(|floor| {
            let admission = floor.shop.adult_arrival(&mut floor.sink);
            floor.panel.show(&floor.shop.indicators());
            admission
        })
    }

    /// Child request button (child plus one parent).
    pub fn child_request(&self) -> Admission {
        self.critical(|floor| {
            let admission = floor.shop.child_arrival(&mut floor.sink);
            floor.panel.show(&floor.shop.indicators());
            admission
        })
    }

    /// Fire alarm.  Always succeeds.
    pub fn fire_alarm(&self) {
        self.critical(|floor| {
            floor.shop.emergency_reset(&mut floor.sink);
            floor.panel.show(&floor.shop.indicators());
        });
    }

    /// One wall-clock tick: every barber advances, then the panel redraws.
    pub fn clock_tick(&self) {
        self.critical(|floor| {
            floor.shop.tick(&mut floor.sink);
            floor.panel.show(&floor.shop.indicators());
        });
    }

    /// Route a queued signal to its handler.  Returns the admission
    /// outcome for arrivals.
    pub fn dispatch(&self, signal: Signal) -> Option<Admission> {
        match signal {
            Signal::AdultRequest => Some(self.adult_request()),
            Signal::ChildRequest => Some(self.child_request()),
            Signal::FireAlarm => {
                self.fire_alarm();
                None
            }
            Signal::ClockTick => {
                self.clock_tick();
                None
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Consistent view of the shop, taken under the lock.
    pub fn snapshot(&self) -> Snapshot {
        self.critical(|floor| floor.shop.snapshot())
    }

    /// The frame currently on the panel.
    pub fn indicators(&self) -> Indicators {
        self.critical(|floor| floor.shop.indicators())
    }

    /// Inspect the shop under the lock (invariant checks, tests).
    pub fn with_shop<R>(&self, f: impl FnOnce(&Shop) -> R) -> R {
        self.critical(|floor| f(&floor.shop))
    }

    /// Inspect the panel adapter under the lock.
    pub fn with_panel<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        self.critical(|floor| f(&floor.panel))
    }

    /// Inspect the event sink under the lock.
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.critical(|floor| f(&floor.sink))
    }

    // ── Internal ──────────────────────────────────────────────

    fn critical<R>(&self, f: impl FnOnce(&mut Floor<P, S>) -> R) -> R {
        self.floor.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
