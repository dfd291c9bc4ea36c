//! Barbershop controller library.
//!
//! Three barbers (two for adults, one for children), a bounded waiting
//! room and a thirteen-LED panel, driven by button signals and a wall
//! clock.  The pure shop logic lives in [`shop`]; [`app`] serialises
//! every handler behind one critical section and talks to the outside
//! world through port traits implemented in [`adapters`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod shop;
