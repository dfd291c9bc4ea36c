//! Application core — shop orchestration, zero I/O.
//!
//! This module wires the [`shop`](crate::shop) domain to the outside
//! world: the service that serialises every handler behind one critical
//! section, the events it emits, and the **port traits** defined in
//! [`ports`] that keep this layer testable without real LEDs or buttons.

pub mod events;
pub mod ports;
pub mod service;
