//! Mock panel and sink for integration tests.
//!
//! Records every LED write and every emitted event so tests can assert on
//! the full history without real GPIO.

use barbershop::app::events::ShopEvent;
use barbershop::app::ports::{EventSink, IndicatorPort};
use barbershop::shop::CustomerClass;

// ── LED call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LedCall {
    Barber { index: usize, busy: bool },
    Seats(Vec<bool>),
    NoEntry(bool),
    WallClock(bool),
}

// ── MockPanel ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPanel {
    pub calls: Vec<LedCall>,
    pub barbers: [bool; 3],
    pub seats: Vec<bool>,
    pub no_entry: bool,
    pub wall_clock: bool,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seats_lit(&self) -> usize {
        self.seats.iter().filter(|on| **on).count()
    }

    /// Number of times the no-entry LED was switched on.
    pub fn no_entry_flashes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, LedCall::NoEntry(true)))
            .count()
    }
}

impl IndicatorPort for MockPanel {
    fn set_barber(&mut self, index: usize, busy: bool) {
        self.calls.push(LedCall::Barber { index, busy });
        self.barbers[index] = busy;
    }

    fn set_seats(&mut self, seats: &[bool]) {
        self.calls.push(LedCall::Seats(seats.to_vec()));
        self.seats = seats.to_vec();
    }

    fn set_no_entry(&mut self, on: bool) {
        self.calls.push(LedCall::NoEntry(on));
        self.no_entry = on;
    }

    fn set_wall_clock(&mut self, on: bool) {
        self.calls.push(LedCall::WallClock(on));
        self.wall_clock = on;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ShopEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&ShopEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn denials(&self, class: CustomerClass) -> usize {
        self.count(|e| matches!(e, ShopEvent::Denied { class: c } if *c == class))
    }

    pub fn has_telemetry(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ShopEvent::Telemetry(_)))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ShopEvent) {
        self.events.push(event.clone());
    }
}
