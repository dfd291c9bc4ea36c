//! Shop configuration parameters
//!
//! Every constant the controller needs, fixed once at startup.
//! Values come from defaults or a JSON file read by
//! [`JsonFileConfig`](crate::adapters::json_config::JsonFileConfig);
//! nothing changes them while the shop is running.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Number of waiting-seat LEDs on the panel.  Capacity can be lower
/// but never higher.
pub const MAX_WAITING_SEATS: usize = 8;

/// Core shop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    // --- Waiting room ---
    /// Waiting seats shared by adults, children and parents
    pub waiting_capacity: u8,

    // --- Barbers ---
    /// Length of one haircut, in clock ticks
    pub haircut_ticks: u16,
    /// Break after each haircut, in clock ticks.  Must be at least one.
    pub break_ticks: u16,

    // --- Timing ---
    /// Wall clock period (milliseconds)
    pub tick_period_ms: u32,
    /// Event loop polling interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Telemetry report interval (ticks)
    pub telemetry_interval_ticks: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            // Waiting room
            waiting_capacity: MAX_WAITING_SEATS as u8,

            // Barbers
            haircut_ticks: 12,
            break_ticks: 1,

            // Timing
            tick_period_ms: 1000,      // one "minute" per second
            poll_interval_ms: 10,
            telemetry_interval_ticks: 60,
        }
    }
}

impl ShopConfig {
    /// Range-check every field.  Bad values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waiting_capacity == 0 {
            return Err(ConfigError::ValidationFailed("waiting_capacity must be at least 1"));
        }
        if self.waiting_capacity as usize > MAX_WAITING_SEATS {
            return Err(ConfigError::ValidationFailed(
                "waiting_capacity exceeds the seat indicator count",
            ));
        }
        if self.haircut_ticks == 0 {
            return Err(ConfigError::ValidationFailed("haircut_ticks must be at least 1"));
        }
        // A zero-length break would leave the barber stuck on break.
        if self.break_ticks == 0 {
            return Err(ConfigError::ValidationFailed("break_ticks must be at least 1"));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be at least 1"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > self.tick_period_ms {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be in 1..=tick_period_ms",
            ));
        }
        if self.telemetry_interval_ticks == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ticks must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Seat count as a `usize`, for indexing the indicator strip.
    pub fn capacity(&self) -> usize {
        self.waiting_capacity as usize
    }
}
