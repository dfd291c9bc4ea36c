//! Per-barber timed state machine.
//!
//! ```text
//!            start_haircut()          countdown hits 0
//!   IDLE ───────────────────▶ CUTTING ─────────────────▶ ON BREAK
//!    ▲                                                      │
//!    └──────────────────── countdown hits 0 ◀───────────────┘
//!
//!   Any state ──[force_reset]──▶ IDLE
//! ```
//!
//! The wall clock calls [`Barber::advance`] exactly once per tick.  A
//! barber that ends up idle pulls the next waiting customer of its class
//! in the same tick, so a waiting customer never sees an idle chair.

use log::{debug, info};
use serde::Serialize;

use super::waiting_room::WaitingRoom;

/// Which customers a barber serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerClass {
    Adult,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarberState {
    /// Free to take a customer.
    Idle,
    /// Cutting hair; the busy LED is lit.
    Cutting,
    /// Mandatory break after a haircut.
    OnBreak,
}

/// What happened to a barber during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The haircut in progress finished this tick.
    pub finished: bool,
    /// The finished haircut was a child's and the parent left.
    pub parent_left: bool,
    /// The break ended this tick.
    pub break_over: bool,
    /// A waiting customer was pulled into the chair.
    pub started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barber {
    /// Position on the panel, 0-based.
    index: usize,
    serves: CustomerClass,
    state: BarberState,
    remaining_ticks: u16,
    haircut_ticks: u16,
    break_ticks: u16,
}

impl Barber {
    pub fn new(index: usize, serves: CustomerClass, haircut_ticks: u16, break_ticks: u16) -> Self {
        debug_assert!(haircut_ticks > 0 && break_ticks > 0);
        Self {
            index,
            serves,
            state: BarberState::Idle,
            remaining_ticks: 0,
            haircut_ticks: haircut_ticks.max(1),
            break_ticks: break_ticks.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn serves(&self) -> CustomerClass {
        self.serves
    }

    pub fn state(&self) -> BarberState {
        self.state
    }

    pub fn remaining_ticks(&self) -> u16 {
        self.remaining_ticks
    }

    pub fn is_available(&self) -> bool {
        self.state == BarberState::Idle
    }

    /// Busy LED: lit only while cutting.
    pub fn is_busy_lit(&self) -> bool {
        self.state == BarberState::Cutting
    }

    /// Put a customer in the chair.  The caller has already taken them
    /// out of the waiting room, or they never sat down.
    pub fn start_haircut(&mut self) {
        debug_assert!(self.is_available(), "barber {} not idle", self.index + 1);
        self.state = BarberState::Cutting;
        self.remaining_ticks = self.haircut_ticks;
        info!("Barber {}: haircut started ({:?})", self.index + 1, self.serves);
    }

    /// Advance one clock tick.
    pub fn advance(&mut self, room: &mut WaitingRoom) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.remaining_ticks > 0 {
            self.remaining_ticks -= 1;
            if self.remaining_ticks == 0 {
                match self.state {
                    BarberState::Cutting => {
                        outcome.finished = true;
                        // The parent waits for the haircut, not the break.
                        if self.serves == CustomerClass::Child {
                            outcome.parent_left = room.release_parent().is_ok();
                        }
                        self.state = BarberState::OnBreak;
                        self.remaining_ticks = self.break_ticks;
                        info!("Barber {}: haircut finished, on break", self.index + 1);
                    }
                    BarberState::OnBreak => {
                        outcome.break_over = true;
                        self.state = BarberState::Idle;
                        debug!("Barber {}: break over", self.index + 1);
                    }
                    BarberState::Idle => {}
                }
            }
        }

        if self.state == BarberState::Idle && self.take_waiting(room) {
            self.start_haircut();
            outcome.started = true;
        }

        outcome
    }

    /// Drop whatever is in progress.  A parent seated for an abandoned
    /// child haircut is not released here; the room is emptied separately.
    pub fn force_reset(&mut self) {
        self.state = BarberState::Idle;
        self.remaining_ticks = 0;
    }

    /// `remaining_ticks > 0` exactly when busy or on break.
    pub fn timer_consistent(&self) -> bool {
        match self.state {
            BarberState::Idle => self.remaining_ticks == 0,
            BarberState::Cutting | BarberState::OnBreak => self.remaining_ticks > 0,
        }
    }

    // ── Internal ──────────────────────────────────────────────────

    fn take_waiting(&self, room: &mut WaitingRoom) -> bool {
        match self.serves {
            CustomerClass::Adult if room.adults() > 0 => room.release_adult().is_ok(),
            CustomerClass::Child if room.children() > 0 => room.release_child_only().is_ok(),
            _ => false,
        }
    }
}
