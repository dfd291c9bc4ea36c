//! Port traits — the hexagonal boundary between shop logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShopService (domain)
//! ```
//!
//! Driven adapters (LED panel, event sinks, config source) implement these
//! traits.  The [`ShopService`](super::service::ShopService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::config::ShopConfig;
use crate::shop::Indicators;

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the thirteen panel LEDs.
///
/// Called with the critical section held; implementations must not block.
pub trait IndicatorPort {
    /// Busy LED of barber `index` (0-based).
    fn set_barber(&mut self, index: usize, busy: bool);

    /// Waiting-seat LEDs, slot 0 first.
    fn set_seats(&mut self, seats: &[bool]);

    /// The no-entry LED.
    fn set_no_entry(&mut self, on: bool);

    /// The wall-clock LED.
    fn set_wall_clock(&mut self, on: bool);

    /// Apply a complete frame.
    fn show(&mut self, indicators: &Indicators) {
        for (index, busy) in indicators.barbers.iter().enumerate() {
            self.set_barber(index, *busy);
        }
        self.set_seats(&indicators.seats);
        self.set_no_entry(indicators.no_entry);
        self.set_wall_clock(indicators.wall_clock);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ShopEvent`](super::events::ShopEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ShopEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::ShopEvent) {}
}

// ───────────────────────────────────────────────────────────────
// Tick delegate (decouples the scheduler from the signal queue)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`TickScheduler`](crate::scheduler::TickScheduler)
/// invokes once per elapsed period.
///
/// The host binary forwards to the signal queue; tests can count ticks
/// or drive a [`ShopService`](super::service::ShopService) directly.
pub trait TickDelegate {
    /// `tick` is the 1-based count of periods since the scheduler started.
    fn on_tick(&mut self, tick: u64);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← config source)
// ───────────────────────────────────────────────────────────────

/// Loads the startup configuration.  There is no `save`: the shop's
/// constants never change while it runs.
pub trait ConfigPort {
    /// Implementations must return a config that passed
    /// [`ShopConfig::validate`].
    fn load(&self) -> Result<ShopConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config source exists.
    NotFound,
    /// The stored document could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the config source.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::NotFound => Self::Config("not found"),
            ConfigError::Corrupted => Self::Config("corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Config("I/O error"),
        }
    }
}
