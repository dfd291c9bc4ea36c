//! Signal queue → scheduler → service pipeline, as the main loop runs it.

use crate::mock_hw::{MockPanel, RecordingSink};

use barbershop::app::events::ShopEvent;
use barbershop::app::ports::TickDelegate;
use barbershop::app::service::ShopService;
use barbershop::config::ShopConfig;
use barbershop::events::{Signal, SignalQueue};
use barbershop::scheduler::TickScheduler;
use barbershop::shop::{Admission, BarberState};

struct QueueDelegate<'a>(&'a SignalQueue);

impl TickDelegate for QueueDelegate<'_> {
    fn on_tick(&mut self, _tick: u64) {
        let _ = self.0.push(Signal::ClockTick);
    }
}

fn make_service() -> ShopService<MockPanel, RecordingSink> {
    let service = ShopService::new(&ShopConfig::default(), MockPanel::new(), RecordingSink::new());
    service.start();
    service
}

#[test]
fn dispatch_reports_admissions() {
    let service = make_service();
    assert_eq!(service.dispatch(Signal::AdultRequest), Some(Admission::Chair { barber: 0 }));
    assert_eq!(service.dispatch(Signal::ChildRequest), Some(Admission::Chair { barber: 2 }));
    assert_eq!(service.dispatch(Signal::ClockTick), None);
    assert_eq!(service.dispatch(Signal::FireAlarm), None);
    assert_eq!(service.snapshot().occupancy, 0);
}

#[test]
fn fire_alarm_evacuates_arrivals_queued_before_it() {
    let service = make_service();
    let queue = SignalQueue::new();
    for _ in 0..4 {
        queue.push(Signal::AdultRequest).unwrap();
    }
    queue.push(Signal::ChildRequest).unwrap();
    queue.push(Signal::FireAlarm).unwrap();

    let mut order = Vec::new();
    queue.drain(|signal| {
        order.push(signal);
        service.dispatch(signal);
    });

    // Everyone who pressed before the alarm left with the evacuation.
    assert_eq!(order, [Signal::FireAlarm]);
    assert_eq!(queue.cancelled(), 5);
    let snap = service.snapshot();
    assert_eq!(snap.stats.evacuations, 1);
    assert_eq!(snap.occupancy, 0);
    assert!(snap.barbers.iter().all(|b| *b == (BarberState::Idle, 0)));
    assert!(!snap.no_entry);
}

#[test]
fn arrival_after_alarm_is_still_served() {
    let service = make_service();
    let queue = SignalQueue::new();
    queue.push(Signal::AdultRequest).unwrap();
    queue.push(Signal::FireAlarm).unwrap();
    queue.push(Signal::ChildRequest).unwrap();

    queue.drain(|s| {
        service.dispatch(s);
    });

    let snap = service.snapshot();
    assert_eq!(snap.barbers[0].0, BarberState::Idle);
    assert_eq!(snap.barbers[2].0, BarberState::Cutting);
    assert_eq!(snap.parents_waiting, 1);
}

#[test]
fn button_burst_does_not_starve_the_clock() {
    let service = make_service();
    let queue = SignalQueue::new();
    let mut scheduler = TickScheduler::new(1000);
    for _ in 0..barbershop::events::SIGNAL_QUEUE_DEPTH {
        queue.push(Signal::AdultRequest).unwrap();
    }
    assert!(queue.push(Signal::AdultRequest).is_err());

    assert_eq!(scheduler.advance(1000, &mut QueueDelegate(&queue)), 1);
    queue.drain(|s| {
        service.dispatch(s);
    });

    assert_eq!(service.snapshot().ticks, scheduler.ticks());
    assert_eq!(service.snapshot().ticks, 1);
}

#[test]
fn scheduler_drives_haircuts_through_queue() {
    let service = make_service();
    let queue = SignalQueue::new();
    let mut scheduler = TickScheduler::new(1000);

    queue.push(Signal::ChildRequest).unwrap();
    queue.drain(|s| {
        service.dispatch(s);
    });

    // 12 s of 10 ms polls: twelve ticks, the haircut is over.
    for _ in 0..1200 {
        scheduler.advance(10, &mut QueueDelegate(&queue));
        queue.drain(|s| {
            service.dispatch(s);
        });
    }
    assert_eq!(scheduler.ticks(), 12);
    let snap = service.snapshot();
    assert_eq!(snap.ticks, 12);
    assert_eq!(snap.parents_waiting, 0);
    assert_eq!(snap.barbers[2].0, BarberState::OnBreak);
    service.with_sink(|sink| {
        assert_eq!(sink.count(|e| *e == ShopEvent::HaircutFinished { barber: 2 }), 1);
    });
}

#[test]
fn burst_beyond_queue_depth_is_counted() {
    let service = make_service();
    let queue = SignalQueue::new();
    let mut accepted = 0;
    for _ in 0..20 {
        if queue.push(Signal::AdultRequest).is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, barbershop::events::SIGNAL_QUEUE_DEPTH);
    assert_eq!(queue.dropped(), 4);

    queue.drain(|s| {
        service.dispatch(s);
    });
    // 2 chairs + 8 seats, the remaining 6 turned away.
    let snap = service.snapshot();
    assert_eq!(snap.occupancy, 8);
    assert_eq!(snap.stats.denied, 6);
}

#[test]
fn events_arrive_in_state_change_order() {
    let service = make_service();
    service.adult_request();
    service.with_sink(|sink| {
        assert_eq!(sink.events[0], ShopEvent::Started);
        assert!(matches!(sink.events[1], ShopEvent::Admitted { .. }));
        assert!(matches!(sink.events[2], ShopEvent::HaircutStarted { barber: 0, .. }));
    });
}
