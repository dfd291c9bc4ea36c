//! Input drivers that feed the signal queue.

#[cfg(feature = "std")]
pub mod keypad;
