//! End-to-end shop scenarios through `ShopService` with mock adapters.

use crate::mock_hw::{MockPanel, RecordingSink};

use barbershop::app::events::ShopEvent;
use barbershop::app::service::ShopService;
use barbershop::config::ShopConfig;
use barbershop::shop::{Admission, BarberState, CHILD_BARBER, CustomerClass};

type Service = ShopService<MockPanel, RecordingSink>;

fn make_service(config: ShopConfig) -> Service {
    let service = ShopService::new(&config, MockPanel::new(), RecordingSink::new());
    service.start();
    service
}

fn assert_consistent(service: &Service) {
    service.with_shop(|shop| {
        if let Err(v) = shop.check_invariants() {
            panic!("invariant violated: {}", v);
        }
    });
}

// ── A: full room turns the ninth adult away ───────────────────

#[test]
fn full_waiting_room_denies_ninth_adult() {
    let service = make_service(ShopConfig::default());
    assert_eq!(service.adult_request(), Admission::Chair { barber: 0 });
    assert_eq!(service.adult_request(), Admission::Chair { barber: 1 });

    for n in 0..8 {
        assert_eq!(service.adult_request(), Admission::Queued, "adult {} should queue", n + 1);
    }
    assert_eq!(service.adult_request(), Admission::Denied);

    let snap = service.snapshot();
    assert_eq!(snap.adults_waiting, 8);
    assert_eq!(snap.occupancy, 8);
    assert!(snap.no_entry);

    service.with_panel(|panel| {
        assert_eq!(panel.seats_lit(), 8);
        assert_eq!(panel.seats.len(), 8);
        assert!(panel.no_entry);
        assert_eq!(panel.no_entry_flashes(), 1);
        assert_eq!(panel.barbers, [true, true, false]);
    });
    service.with_sink(|sink| assert_eq!(sink.denials(CustomerClass::Adult), 1));
    assert_consistent(&service);
}

// ── B: idle children's barber takes the child at once ─────────

#[test]
fn child_goes_straight_to_idle_barber() {
    let service = make_service(ShopConfig::default());
    assert_eq!(service.child_request(), Admission::Chair { barber: CHILD_BARBER });

    let snap = service.snapshot();
    assert_eq!(snap.parents_waiting, 1);
    assert_eq!(snap.children_waiting, 0);
    assert_eq!(snap.barbers[CHILD_BARBER].0, BarberState::Cutting);
    service.with_panel(|panel| {
        assert_eq!(panel.barbers, [false, false, true]);
        assert_eq!(panel.seats_lit(), 1);
    });
    assert_consistent(&service);
}

// ── C: haircut, parent leaves, break, idle ────────────────────

#[test]
fn child_haircut_releases_parent_then_breaks() {
    let config = ShopConfig {
        break_ticks: 3,
        ..ShopConfig::default()
    };
    let service = make_service(config.clone());
    service.child_request();

    for _ in 0..config.haircut_ticks - 1 {
        service.clock_tick();
    }
    assert_eq!(service.snapshot().parents_waiting, 1, "parent stays until the last tick");

    service.clock_tick();
    let snap = service.snapshot();
    assert_eq!(snap.parents_waiting, 0);
    assert_eq!(snap.barbers[CHILD_BARBER], (BarberState::OnBreak, 3));
    service.with_panel(|panel| assert!(!panel.barbers[CHILD_BARBER]));

    service.clock_tick();
    service.clock_tick();
    assert_eq!(service.snapshot().barbers[CHILD_BARBER].0, BarberState::OnBreak);
    service.clock_tick();
    assert_eq!(service.snapshot().barbers[CHILD_BARBER], (BarberState::Idle, 0));

    service.with_sink(|sink| {
        assert_eq!(sink.count(|e| *e == ShopEvent::ParentLeft), 1);
        assert_eq!(sink.count(|e| *e == ShopEvent::BreakOver { barber: CHILD_BARBER }), 1);
    });
    assert_consistent(&service);
}

// ── D: fire alarm empties everything ──────────────────────────

#[test]
fn fire_alarm_resets_any_state() {
    let config = ShopConfig {
        waiting_capacity: 3,
        ..ShopConfig::default()
    };
    let service = make_service(config);
    service.adult_request();
    service.adult_request();
    service.child_request();
    service.adult_request();
    // Parent plus queued adult leave one seat; a waiting child needs two.
    assert_eq!(service.child_request(), Admission::Denied);
    service.clock_tick();
    assert!(service.snapshot().no_entry);

    service.fire_alarm();

    let snap = service.snapshot();
    assert_eq!(snap.occupancy, 0);
    assert!(snap.barbers.iter().all(|b| *b == (BarberState::Idle, 0)));
    assert!(!snap.no_entry);
    assert_eq!(snap.stats.evacuations, 1);
    service.with_panel(|panel| {
        assert_eq!(panel.barbers, [false; 3]);
        assert_eq!(panel.seats_lit(), 0);
        assert!(!panel.no_entry);
    });
    assert_consistent(&service);
}

// ── E: child needs two seats, only one free ───────────────────

#[test]
fn child_denied_when_only_one_seat_left() {
    let service = make_service(ShopConfig::default());
    service.child_request();
    service.adult_request();
    service.adult_request();
    for _ in 0..6 {
        assert_eq!(service.adult_request(), Admission::Queued);
    }
    let before = service.snapshot();
    assert_eq!(before.occupancy, 7);

    assert_eq!(service.child_request(), Admission::Denied);

    let after = service.snapshot();
    assert_eq!(after.occupancy, 7);
    assert_eq!(after.children_waiting, before.children_waiting);
    assert_eq!(after.parents_waiting, before.parents_waiting);
    assert!(after.no_entry);

    // A single adult still fits.
    assert_eq!(service.adult_request(), Admission::Queued);
    assert!(!service.snapshot().no_entry);
    assert_consistent(&service);
}

// ── Tick order ────────────────────────────────────────────────

#[test]
fn first_adult_barber_gets_first_pick() {
    let service = make_service(ShopConfig::default());
    service.adult_request();
    service.adult_request();
    service.adult_request();

    // Both finish together, both come off break together.
    for _ in 0..13 {
        service.clock_tick();
    }
    let snap = service.snapshot();
    assert_eq!(snap.barbers[0].0, BarberState::Cutting);
    assert_eq!(snap.barbers[1].0, BarberState::Idle);
    assert_eq!(snap.adults_waiting, 0);
    assert_consistent(&service);
}

#[test]
fn wall_clock_led_flips_every_tick() {
    let service = make_service(ShopConfig::default());
    let mut seen = Vec::new();
    for _ in 0..4 {
        service.clock_tick();
        seen.push(service.with_panel(|panel| panel.wall_clock));
    }
    assert_eq!(seen, [true, false, true, false]);
}

#[test]
fn telemetry_follows_configured_interval() {
    let config = ShopConfig {
        telemetry_interval_ticks: 5,
        ..ShopConfig::default()
    };
    let service = make_service(config);
    for _ in 0..4 {
        service.clock_tick();
    }
    service.with_sink(|sink| assert!(!sink.has_telemetry()));
    service.clock_tick();
    service.with_sink(|sink| {
        let snap = sink.events.iter().find_map(|e| match e {
            ShopEvent::Telemetry(s) => Some(s.clone()),
            _ => None,
        });
        assert_eq!(snap.map(|s| s.ticks), Some(5));
    });
}

#[test]
fn waiting_child_is_served_after_break() {
    let service = make_service(ShopConfig::default());
    service.child_request();
    assert_eq!(service.child_request(), Admission::Queued);
    assert_eq!(service.snapshot().occupancy, 3);

    // 12 ticks cutting, 1 tick break, then the queued child sits down.
    for _ in 0..13 {
        service.clock_tick();
    }
    let snap = service.snapshot();
    assert_eq!(snap.barbers[CHILD_BARBER].0, BarberState::Cutting);
    assert_eq!(snap.children_waiting, 0);
    assert_eq!(snap.parents_waiting, 1);
    assert_eq!(snap.stats.children_served, 2);
    assert_consistent(&service);
}
