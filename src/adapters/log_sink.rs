//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured shop events to the
//! logger (serial console on the board, stderr on the host).

use log::{info, warn};

use crate::app::events::{Placement, ShopEvent};
use crate::app::ports::EventSink;

/// Adapter that logs every [`ShopEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged since startup.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ShopEvent) {
        self.emitted += 1;
        match event {
            ShopEvent::Started => {
                info!("START | shop open");
            }
            ShopEvent::Admitted { class, placement } => match placement {
                Placement::Chair(barber) => {
                    info!("ADMIT | {:?} -> barber {}", class, barber + 1);
                }
                Placement::WaitingRoom => {
                    info!("ADMIT | {:?} -> waiting room", class);
                }
            },
            ShopEvent::Denied { class } => {
                warn!("DENY  | {:?} turned away", class);
            }
            ShopEvent::HaircutStarted { barber, class } => {
                info!("CUT   | barber {} started ({:?})", barber + 1, class);
            }
            ShopEvent::HaircutFinished { barber } => {
                info!("DONE  | barber {} finished, on break", barber + 1);
            }
            ShopEvent::ParentLeft => {
                info!("LEAVE | parent left with child");
            }
            ShopEvent::BreakOver { barber } => {
                info!("READY | barber {} back from break", barber + 1);
            }
            ShopEvent::Evacuated => {
                warn!("FIRE  | shop evacuated");
            }
            ShopEvent::Telemetry(snap) => match serde_json::to_string(snap) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
        }
    }
}
