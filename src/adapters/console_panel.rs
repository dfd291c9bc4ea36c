//! Console LED panel for host simulation.
//!
//! Renders the panel as one line of text and logs it whenever a barber,
//! seat, or no-entry LED changes.  The wall clock flips every tick, so it
//! is only logged at `trace` level.
//!
//! ```text
//!   barbers [#.#] seats [###.....] no-entry [.]
//! ```

use heapless::String;
use log::{info, trace};

use crate::app::ports::IndicatorPort;
use crate::config::MAX_WAITING_SEATS;
use crate::shop::BARBER_COUNT;

const LIT: char = '#';
const DARK: char = '.';

pub struct ConsolePanel {
    barbers: [bool; BARBER_COUNT],
    seats: [bool; MAX_WAITING_SEATS],
    capacity: usize,
    no_entry: bool,
    wall_clock: bool,
    last_line: String<64>,
}

impl ConsolePanel {
    pub fn new(capacity: usize) -> Self {
        Self {
            barbers: [false; BARBER_COUNT],
            seats: [false; MAX_WAITING_SEATS],
            capacity: capacity.min(MAX_WAITING_SEATS),
            no_entry: false,
            wall_clock: false,
            last_line: String::new(),
        }
    }

    /// The most recently logged panel line.
    pub fn last_line(&self) -> &str {
        &self.last_line
    }

    pub fn wall_clock(&self) -> bool {
        self.wall_clock
    }

    fn render(&self) -> String<64> {
        let mut line = String::new();
        // Capacity is fixed well under 64 chars, push cannot fail.
        let _ = line.push_str("barbers [");
        for on in self.barbers {
            let _ = line.push(lamp(on));
        }
        let _ = line.push_str("] seats [");
        for on in &self.seats[..self.capacity] {
            let _ = line.push(lamp(*on));
        }
        let _ = line.push_str("] no-entry [");
        let _ = line.push(lamp(self.no_entry));
        let _ = line.push(']');
        line
    }

    fn refresh(&mut self) {
        let line = self.render();
        if line != self.last_line {
            info!("PANEL | {}", line);
            self.last_line = line;
        }
    }
}

fn lamp(on: bool) -> char {
    if on { LIT } else { DARK }
}

impl IndicatorPort for ConsolePanel {
    fn set_barber(&mut self, index: usize, busy: bool) {
        if let Some(slot) = self.barbers.get_mut(index) {
            *slot = busy;
        }
        self.refresh();
    }

    fn set_seats(&mut self, seats: &[bool]) {
        for (slot, on) in self.seats.iter_mut().zip(seats) {
            *slot = *on;
        }
        self.refresh();
    }

    fn set_no_entry(&mut self, on: bool) {
        self.no_entry = on;
        self.refresh();
    }

    fn set_wall_clock(&mut self, on: bool) {
        self.wall_clock = on;
        trace!("PANEL | clock [{}]", lamp(on));
    }

    fn show(&mut self, indicators: &crate::shop::Indicators) {
        self.barbers = indicators.barbers;
        for (slot, on) in self.seats.iter_mut().zip(&indicators.seats) {
            *slot = *on;
        }
        self.no_entry = indicators.no_entry;
        self.refresh();
        self.set_wall_clock(indicators.wall_clock);
    }
}
