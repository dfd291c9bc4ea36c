//! Barbershop controller — host simulation entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  ConsolePanel      LogEventSink    JsonFileConfig   Keypad   │
//! │  (IndicatorPort)   (EventSink)     (ConfigPort)     (stdin)  │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │         ShopService (one critical section)           │    │
//! │  │   Shop · Barbers · WaitingRoom · Indicators          │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! │                                                              │
//! │  TickScheduler (delegate-driven) · SignalQueue (fire first)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use barbershop::adapters::console_panel::ConsolePanel;
use barbershop::adapters::json_config::JsonFileConfig;
use barbershop::adapters::log_sink::LogEventSink;
use barbershop::app::ports::{ConfigPort, TickDelegate};
use barbershop::app::service::ShopService;
use barbershop::config::ShopConfig;
use barbershop::drivers::keypad::Keypad;
use barbershop::events::{Signal, SignalQueue};
use barbershop::scheduler::TickScheduler;

// ── Scheduler delegate ────────────────────────────────────────
//
// The scheduler knows nothing about signals; this impl turns each
// elapsed period into a ClockTick on the shared queue.  Ticks are
// counted, not queued, so pushing one cannot fail.

struct QueueDelegate<'a> {
    queue: &'a SignalQueue,
}

impl TickDelegate for QueueDelegate<'_> {
    fn on_tick(&mut self, _tick: u64) {
        let _ = self.queue.push(Signal::ClockTick);
    }
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Barbershop v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (file or defaults) ──────────────────────────
    let source = JsonFileConfig::from_env();
    let config = match source.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            ShopConfig::default()
        }
    };
    info!(
        "Config: {} seats, haircut {} ticks, break {} ticks, tick {} ms",
        config.waiting_capacity, config.haircut_ticks, config.break_ticks, config.tick_period_ms
    );

    // ── 3. Service + inputs ───────────────────────────────────
    let panel = ConsolePanel::new(config.capacity());
    let service = ShopService::new(&config, panel, LogEventSink::new());
    let queue = Arc::new(SignalQueue::new());
    let keypad = Keypad::spawn(Arc::clone(&queue)).context("starting keypad thread")?;
    let mut scheduler = TickScheduler::new(config.tick_period_ms);

    service.start();

    // ── 4. Main loop ──────────────────────────────────────────
    //
    // Sleep, convert elapsed time into clock ticks, then run every
    // pending signal to completion.  The fire alarm is always popped
    // first.
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    let started = Instant::now();
    let mut fed_ms: u128 = 0;

    while !keypad.is_closed() {
        std::thread::sleep(poll);

        let elapsed_ms = started.elapsed().as_millis();
        let delta = u32::try_from(elapsed_ms - fed_ms).unwrap_or(u32::MAX);
        fed_ms = elapsed_ms;
        scheduler.advance(delta, &mut QueueDelegate { queue: &queue });

        queue.drain(|signal| {
            service.dispatch(signal);
        });
    }

    // Signals typed just before quitting still count.
    queue.drain(|signal| {
        service.dispatch(signal);
    });
    keypad.join();

    let snap = service.snapshot();
    info!(
        "Closing: {} adults and {} children served, {} turned away, {} evacuations",
        snap.stats.adults_served,
        snap.stats.children_served,
        snap.stats.denied,
        snap.stats.evacuations
    );
    if queue.dropped() > 0 {
        warn!("{} arrivals were dropped on a full queue", queue.dropped());
    }
    if queue.cancelled() > 0 {
        info!("{} arrivals were cancelled by a fire alarm", queue.cancelled());
    }
    Ok(())
}
