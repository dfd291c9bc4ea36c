//! Fuzz target: arbitrary signal sequences through `ShopService`
//!
//! Every byte is one raw signal code (unknown codes are skipped).  The
//! first byte picks the waiting-room capacity.  After each signal the
//! shop's invariants must hold and the seat LEDs must match occupancy.
//!
//! cargo fuzz run fuzz_signal_sequence

#![no_main]

use barbershop::app::ports::{IndicatorPort, NullSink};
use barbershop::app::service::ShopService;
use barbershop::config::ShopConfig;
use barbershop::events::{Signal, SignalQueue};
use libfuzzer_sys::fuzz_target;

struct DarkPanel;

impl IndicatorPort for DarkPanel {
    fn set_barber(&mut self, _index: usize, _busy: bool) {}
    fn set_seats(&mut self, _seats: &[bool]) {}
    fn set_no_entry(&mut self, _on: bool) {}
    fn set_wall_clock(&mut self, _on: bool) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let config = ShopConfig {
        waiting_capacity: first % 8 + 1,
        haircut_ticks: 3,
        ..ShopConfig::default()
    };
    let service = ShopService::new(&config, DarkPanel, NullSink);
    let queue = SignalQueue::new();

    // Push in bursts of eight, then drain, so alarms overtake arrivals.
    for chunk in rest.chunks(8) {
        for signal in chunk.iter().filter_map(|b| Signal::from_u8(*b % 24)) {
            let _ = queue.push(signal);
        }
        queue.drain(|signal| {
            service.dispatch(signal);
            service.with_shop(|shop| {
                assert!(shop.check_invariants().is_ok(), "{:?}", shop.check_invariants());
                assert_eq!(shop.indicators().seats_lit(), shop.room().occupancy());
            });
        });
    }
});
