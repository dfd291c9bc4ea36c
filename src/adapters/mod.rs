//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements    | Connects to                 |
//! |-----------------|---------------|-----------------------------|
//! | `console_panel` | IndicatorPort | Log output (host simulation)|
//! | `pin_panel`     | IndicatorPort | `embedded-hal` output pins  |
//! | `log_sink`      | EventSink     | Log output                  |
//! | `json_config`   | ConfigPort    | JSON file on disk           |

pub mod console_panel;
#[cfg(feature = "std")]
pub mod json_config;
pub mod log_sink;
pub mod pin_panel;
