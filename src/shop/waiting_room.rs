//! Bounded waiting area shared by adults, children and their parents.
//!
//! The room only counts people; it knows nothing about barbers.  Callers
//! combine [`WaitingRoom::can_admit`] with an `admit_*` call inside the
//! same critical section, so the check and the increment can never be
//! split by another context.

use heapless::Vec;
use log::error;

use crate::config::MAX_WAITING_SEATS;
use crate::error::{Seat, SeatError};

/// Seat indicator strip, slot 0 first.
pub type SeatStrip = Vec<bool, MAX_WAITING_SEATS>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingRoom {
    capacity: u8,
    /// Adults waiting for an adult barber.
    adults: u8,
    /// Children waiting for the children's barber.
    children: u8,
    /// Parents waiting for their child's haircut to finish.
    parents: u8,
}

impl WaitingRoom {
    /// Create an empty room.  `capacity` is clamped to the panel size;
    /// [`ShopConfig::validate`](crate::config::ShopConfig::validate)
    /// rejects larger values before this point.
    pub fn new(capacity: u8) -> Self {
        Self {
            capacity: capacity.min(MAX_WAITING_SEATS as u8),
            adults: 0,
            children: 0,
            parents: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children(&self) -> u8 {
        self.children
    }

    pub fn parents(&self) -> u8 {
        self.parents
    }

    /// Seats currently taken.
    pub fn occupancy(&self) -> usize {
        self.adults as usize + self.children as usize + self.parents as usize
    }

    /// True if `n` more people fit.
    pub fn can_admit(&self, n: usize) -> bool {
        self.capacity().saturating_sub(self.occupancy()) >= n
    }

    pub fn admit_adult(&mut self) {
        debug_assert!(self.can_admit(1), "admit_adult without a free seat");
        self.adults += 1;
    }

    /// Seat a child together with their parent (two seats).
    pub fn admit_child_with_parent(&mut self) {
        debug_assert!(self.can_admit(2), "admit_child_with_parent without two free seats");
        self.children += 1;
        self.parents += 1;
    }

    /// Seat only the parent; their child went straight to the chair.
    pub fn admit_parent(&mut self) {
        debug_assert!(self.can_admit(1), "admit_parent without a free seat");
        self.parents += 1;
    }

    pub fn release_adult(&mut self) -> Result<(), SeatError> {
        Self::release(&mut self.adults, Seat::Adult)
    }

    /// A waiting child moves to the chair; their parent stays seated.
    pub fn release_child_only(&mut self) -> Result<(), SeatError> {
        Self::release(&mut self.children, Seat::Child)
    }

    pub fn release_parent(&mut self) -> Result<(), SeatError> {
        Self::release(&mut self.parents, Seat::Parent)
    }

    /// Everyone out.
    pub fn reset_all(&mut self) {
        self.adults = 0;
        self.children = 0;
        self.parents = 0;
    }

    /// Seat LEDs: the first `occupancy()` slots on, the rest off.
    pub fn render_indicator(&self) -> SeatStrip {
        let lit = self.occupancy();
        (0..self.capacity()).map(|slot| slot < lit).collect()
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Decrement a count.  Releasing from zero is a logic defect: debug
    /// builds stop here, release builds log it and leave the count at zero.
    fn release(count: &mut u8, seat: Seat) -> Result<(), SeatError> {
        if *count == 0 {
            let err = SeatError::Empty(seat);
            error!("WAITING ROOM INVARIANT: {err}");
            debug_assert!(false, "{err}");
            return Err(err);
        }
        *count -= 1;
        Ok(())
    }
}
