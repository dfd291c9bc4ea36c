//! Unified error types for the barbershop controller.
//!
//! A turned-away customer is **not** an error: it is an ordinary
//! [`Admission::Denied`](crate::shop::Admission::Denied) outcome shown
//! on the no-entry LED.  The types here cover logic defects (a seat
//! count about to go negative) and startup problems.
//! All variants are `Copy` so they can be passed out of the critical
//! section without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A waiting-room count was released below zero.
    Seat(SeatError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// The signal queue rejected an input.
    Queue(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seat(e) => write!(f, "seat: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Queue(msg) => write!(f, "queue: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Seat errors
// ---------------------------------------------------------------------------

/// Which waiting-room count an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Adult,
    Child,
    Parent,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adult => write!(f, "adult"),
            Self::Child => write!(f, "child"),
            Self::Parent => write!(f, "parent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatError {
    /// Release requested while the count was already zero.
    Empty(Seat),
}

impl fmt::Display for SeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(seat) => write!(f, "no {seat} waiting to release"),
        }
    }
}

impl From<SeatError> for Error {
    fn from(e: SeatError) -> Self {
        Self::Seat(e)
    }
}

// ---------------------------------------------------------------------------
// Invariant violations
// ---------------------------------------------------------------------------

/// A cross-entity invariant found broken by [`Shop::check_invariants`].
///
/// [`Shop::check_invariants`]: crate::shop::Shop::check_invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// More people seated than there are seats.
    OverCapacity { occupancy: usize, capacity: usize },
    /// Parents waiting does not match children waiting plus the child
    /// in the chair.
    ParentMismatch { parents: u8, children: u8, child_in_chair: bool },
    /// A barber's countdown disagrees with its state.
    BarberTimer { barber: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverCapacity { occupancy, capacity } => {
                write!(f, "occupancy {occupancy} exceeds capacity {capacity}")
            }
            Self::ParentMismatch { parents, children, child_in_chair } => write!(
                f,
                "parents={parents} children={children} child_in_chair={child_in_chair}"
            ),
            Self::BarberTimer { barber } => write!(f, "barber {barber} timer out of step"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
