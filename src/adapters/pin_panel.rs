//! GPIO LED panel — drives the thirteen indicator LEDs through
//! `embedded-hal` output pins.
//!
//! | LEDs        | Count | Meaning                         |
//! |-------------|-------|---------------------------------|
//! | barber      | 3     | lit while cutting               |
//! | seat        | ≤ 8   | filled from slot 1 upwards      |
//! | no-entry    | 1     | last arrival turned away        |
//! | wall clock  | 1     | flips every tick                |
//!
//! Pin write failures are logged and swallowed: a dead LED must never
//! stop the shop.

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;
use log::warn;

use crate::app::ports::IndicatorPort;
use crate::config::MAX_WAITING_SEATS;
use crate::shop::BARBER_COUNT;

pub struct PinPanel<P: OutputPin> {
    barbers: [P; BARBER_COUNT],
    seats: Vec<P, MAX_WAITING_SEATS>,
    no_entry: P,
    wall_clock: P,
    write_failures: u32,
}

impl<P: OutputPin> PinPanel<P> {
    /// Take ownership of the panel pins and switch every LED off.
    pub fn new(
        barbers: [P; BARBER_COUNT],
        seats: Vec<P, MAX_WAITING_SEATS>,
        no_entry: P,
        wall_clock: P,
    ) -> Self {
        let mut panel = Self {
            barbers,
            seats,
            no_entry,
            wall_clock,
            write_failures: 0,
        };
        panel.all_off();
        panel
    }

    pub fn all_off(&mut self) {
        for idx in 0..BARBER_COUNT {
            self.set_barber(idx, false);
        }
        for pin in &mut self.seats {
            Self::drive(pin, false, &mut self.write_failures);
        }
        self.set_no_entry(false);
        self.set_wall_clock(false);
    }

    /// Pin writes that returned an error since startup.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    /// Hand the pins back (e.g. to reconfigure them on shutdown).
    pub fn release(self) -> ([P; BARBER_COUNT], Vec<P, MAX_WAITING_SEATS>, P, P) {
        (self.barbers, self.seats, self.no_entry, self.wall_clock)
    }

    fn drive(pin: &mut P, on: bool, failures: &mut u32) {
        if let Err(e) = pin.set_state(PinState::from(on)) {
            *failures = failures.saturating_add(1);
            warn!("LED pin write failed: {:?}", e);
        }
    }
}

impl<P: OutputPin> IndicatorPort for PinPanel<P> {
    fn set_barber(&mut self, index: usize, busy: bool) {
        if let Some(pin) = self.barbers.get_mut(index) {
            Self::drive(pin, busy, &mut self.write_failures);
        }
    }

    fn set_seats(&mut self, seats: &[bool]) {
        for (pin, on) in self.seats.iter_mut().zip(seats) {
            Self::drive(pin, *on, &mut self.write_failures);
        }
    }

    fn set_no_entry(&mut self, on: bool) {
        Self::drive(&mut self.no_entry, on, &mut self.write_failures);
    }

    fn set_wall_clock(&mut self, on: bool) {
        Self::drive(&mut self.wall_clock, on, &mut self.write_failures);
    }
}
