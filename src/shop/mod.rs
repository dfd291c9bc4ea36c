//! The shop floor: waiting room, three barbers, and the no-entry light.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │  Shop                                                        │
//!  │                                                              │
//!  │   adult/child arrival ──▶ chair?  ──▶ seat?  ──▶ no entry    │
//!  │   fire alarm          ──▶ everyone out, every barber idle    │
//!  │   clock tick          ──▶ barber 1, barber 2, barber 3       │
//!  │                                                              │
//!  │   WaitingRoom { adults, children, parents }  (≤ capacity)    │
//!  │   Barber[0] Adult   Barber[1] Adult   Barber[2] Child        │
//!  └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Shop` is plain data driven through `&mut self`.  It is never shared
//! directly: [`ShopService`](crate::app::service::ShopService) keeps it
//! inside a critical-section mutex so that every method below runs as
//! one indivisible step with respect to every other.

pub mod barber;
pub mod indicators;
pub mod waiting_room;

use log::{info, warn};
use serde::Serialize;

use crate::app::events::{Placement, ShopEvent, Snapshot};
use crate::app::ports::EventSink;
use crate::config::ShopConfig;
use crate::error::InvariantViolation;

pub use barber::{Barber, BarberState, CustomerClass, TickOutcome};
pub use indicators::Indicators;
pub use waiting_room::WaitingRoom;

/// Barbers on the floor: two for adults, one for children.
pub const BARBER_COUNT: usize = 3;

/// Panel index of the children's barber.
pub const CHILD_BARBER: usize = 2;

/// Result of one arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Went straight into the given barber's chair (0-based index).
    Chair { barber: usize },
    /// Took a waiting seat (two seats for a child and parent).
    Queued,
    /// No room; the no-entry light is on.
    Denied,
}

/// Running totals since power-on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShopStats {
    pub adults_served: u32,
    pub children_served: u32,
    pub denied: u32,
    pub evacuations: u32,
}

pub struct Shop {
    room: WaitingRoom,
    barbers: [Barber; BARBER_COUNT],
    no_entry: bool,
    ticks: u64,
    telemetry_interval_ticks: u32,
    stats: ShopStats,
}

impl Shop {
    /// Build an empty shop.  The config is assumed validated.
    pub fn new(config: &ShopConfig) -> Self {
        let (cut, rest) = (config.haircut_ticks, config.break_ticks);
        Self {
            room: WaitingRoom::new(config.waiting_capacity),
            barbers: [
                Barber::new(0, CustomerClass::Adult, cut, rest),
                Barber::new(1, CustomerClass::Adult, cut, rest),
                Barber::new(CHILD_BARBER, CustomerClass::Child, cut, rest),
            ],
            no_entry: false,
            ticks: 0,
            telemetry_interval_ticks: config.telemetry_interval_ticks.max(1),
            stats: ShopStats::default(),
        }
    }

    // ── Arrivals ──────────────────────────────────────────────

    /// An adult asks to come in.  Tries barber 1, barber 2, a waiting
    /// seat, then turns them away; exactly one of these happens.
    pub fn adult_arrival(&mut self, sink: &mut impl EventSink) -> Admission {
        self.no_entry = false;

        let admission = if let Some(idx) = self.free_adult_barber() {
            self.barbers[idx].start_haircut();
            self.stats.adults_served += 1;
            Admission::Chair { barber: idx }
        } else if self.room.can_admit(1) {
            self.room.admit_adult();
            Admission::Queued
        } else {
            Admission::Denied
        };

        self.finish_arrival(CustomerClass::Adult, admission, sink);
        admission
    }

    /// A child arrives with one parent.  The parent always needs a seat;
    /// the child needs one too unless the children's barber is free.
    pub fn child_arrival(&mut self, sink: &mut impl EventSink) -> Admission {
        self.no_entry = false;

        let admission = if self.barbers[CHILD_BARBER].is_available() && self.room.can_admit(1) {
            self.barbers[CHILD_BARBER].start_haircut();
            self.room.admit_parent();
            self.stats.children_served += 1;
            Admission::Chair { barber: CHILD_BARBER }
        } else if self.room.can_admit(2) {
            self.room.admit_child_with_parent();
            Admission::Queued
        } else {
            Admission::Denied
        };

        self.finish_arrival(CustomerClass::Child, admission, sink);
        admission
    }

    // ── Fire alarm ────────────────────────────────────────────

    /// Everyone leaves now.  Haircuts in progress are abandoned, the
    /// room is emptied, and the no-entry light goes out.  Calling it
    /// again on an empty shop changes nothing but the evacuation count.
    pub fn emergency_reset(&mut self, sink: &mut impl EventSink) {
        for barber in &mut self.barbers {
            barber.force_reset();
        }
        self.room.reset_all();
        self.no_entry = false;
        self.stats.evacuations += 1;

        warn!("FIRE ALARM: shop evacuated");
        sink.emit(&ShopEvent::Evacuated);
        self.debug_check();
    }

    // ── Clock ─────────────────────────────────────────────────

    /// One wall-clock tick: advance barber 1, 2 and 3 in that order.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        self.ticks += 1;

        for idx in 0..BARBER_COUNT {
            let outcome = self.barbers[idx].advance(&mut self.room);
            self.report_tick(idx, outcome, sink);
        }

        if self.ticks % u64::from(self.telemetry_interval_ticks) == 0 {
            sink.emit(&ShopEvent::Telemetry(self.snapshot()));
        }
        self.debug_check();
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn room(&self) -> &WaitingRoom {
        &self.room
    }

    /// Barber by panel index.  Panics if `idx >= BARBER_COUNT`.
    pub fn barber(&self, idx: usize) -> &Barber {
        &self.barbers[idx]
    }

    pub fn barbers(&self) -> &[Barber; BARBER_COUNT] {
        &self.barbers
    }

    pub fn no_entry(&self) -> bool {
        self.no_entry
    }

    /// Clock ticks since power-on.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> ShopStats {
        self.stats
    }

    pub fn indicators(&self) -> Indicators {
        Indicators::project(self)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ticks: self.ticks,
            adults_waiting: self.room.adults(),
            children_waiting: self.room.children(),
            parents_waiting: self.room.parents(),
            occupancy: self.room.occupancy() as u8,
            barbers: core::array::from_fn(|i| {
                (self.barbers[i].state(), self.barbers[i].remaining_ticks())
            }),
            no_entry: self.no_entry,
            stats: self.stats,
        }
    }

    /// Check every cross-entity invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let occupancy = self.room.occupancy();
        let capacity = self.room.capacity();
        if occupancy > capacity {
            return Err(InvariantViolation::OverCapacity { occupancy, capacity });
        }

        let parents = self.room.parents();
        let children = self.room.children();
        let child_in_chair = self.barbers[CHILD_BARBER].state() == BarberState::Cutting;
        if u16::from(parents) != u16::from(children) + u16::from(child_in_chair) {
            return Err(InvariantViolation::ParentMismatch {
                parents,
                children,
                child_in_chair,
            });
        }

        if let Some(barber) = self.barbers.iter().position(|b| !b.timer_consistent()) {
            return Err(InvariantViolation::BarberTimer { barber });
        }
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────

    fn free_adult_barber(&self) -> Option<usize> {
        self.barbers
            .iter()
            .position(|b| b.serves() == CustomerClass::Adult && b.is_available())
    }

    fn finish_arrival(
        &mut self,
        class: CustomerClass,
        admission: Admission,
        sink: &mut impl EventSink,
    ) {
        match admission {
            Admission::Chair { barber } => {
                sink.emit(&ShopEvent::Admitted {
                    class,
                    placement: Placement::Chair(barber),
                });
                sink.emit(&ShopEvent::HaircutStarted { barber, class });
            }
            Admission::Queued => {
                info!("{:?} seated, occupancy {}", class, self.room.occupancy());
                sink.emit(&ShopEvent::Admitted {
                    class,
                    placement: Placement::WaitingRoom,
                });
            }
            Admission::Denied => {
                self.no_entry = true;
                self.stats.denied += 1;
                warn!("{:?} turned away: waiting room full", class);
                sink.emit(&ShopEvent::Denied { class });
            }
        }
        self.debug_check();
    }

    fn report_tick(&mut self, idx: usize, outcome: TickOutcome, sink: &mut impl EventSink) {
        if outcome.finished {
            sink.emit(&ShopEvent::HaircutFinished { barber: idx });
        }
        if outcome.parent_left {
            sink.emit(&ShopEvent::ParentLeft);
        }
        if outcome.break_over {
            sink.emit(&ShopEvent::BreakOver { barber: idx });
        }
        if outcome.started {
            let class = self.barbers[idx].serves();
            match class {
                CustomerClass::Adult => self.stats.adults_served += 1,
                CustomerClass::Child => self.stats.children_served += 1,
            }
            sink.emit(&ShopEvent::HaircutStarted { barber: idx, class });
        }
        // A seat or a chair opened up: the next arrival may get in.
        if outcome.parent_left || outcome.break_over || outcome.started {
            self.no_entry = false;
        }
    }

    fn debug_check(&self) {
        if let Err(violation) = self.check_invariants() {
            log::error!("SHOP INVARIANT: {violation}");
            debug_assert!(false, "{violation}");
        }
    }
}
