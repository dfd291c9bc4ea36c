//! Outbound shop events.
//!
//! The [`Shop`](crate::shop::Shop) emits these through the
//! [`EventSink`](super::ports::EventSink) port while it still holds the
//! critical section, so a sink sees them in exactly the order the state
//! changed.

use serde::Serialize;

use crate::shop::{BARBER_COUNT, BarberState, CustomerClass, ShopStats};

/// Where an admitted customer went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Straight into a barber's chair (0-based panel index).
    Chair(usize),
    /// Into the waiting room.
    WaitingRoom,
}

/// Structured events emitted by the shop.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// The controller came up with an empty shop.
    Started,

    /// A customer got in.
    Admitted { class: CustomerClass, placement: Placement },

    /// A customer was turned away; the no-entry light is on.
    Denied { class: CustomerClass },

    /// A barber started cutting.
    HaircutStarted { barber: usize, class: CustomerClass },

    /// A barber finished cutting and went on break.
    HaircutFinished { barber: usize },

    /// A parent left with their child after the haircut.
    ParentLeft,

    /// A barber's break ended.
    BreakOver { barber: usize },

    /// Fire alarm: everyone is out.
    Evacuated,

    /// Periodic state report.
    Telemetry(Snapshot),
}

/// A point-in-time view of the shop suitable for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub ticks: u64,
    pub adults_waiting: u8,
    pub children_waiting: u8,
    pub parents_waiting: u8,
    pub occupancy: u8,
    /// State and remaining ticks per barber.
    pub barbers: [(BarberState, u16); BARBER_COUNT],
    pub no_entry: bool,
    pub stats: ShopStats,
}
