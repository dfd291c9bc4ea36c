//! Read-only projection of shop state onto the LED panel.
//!
//! ```text
//!   [B1] [B2] [B3]   [S1 S2 S3 S4 S5 S6 S7 S8]   [NO ENTRY]   [CLOCK]
//! ```
//!
//! Nothing here holds state of its own; [`Indicators`] is rebuilt from the
//! shop after every tick and every arrival.

use super::waiting_room::SeatStrip;
use super::{BARBER_COUNT, Shop};

/// Every visible output, in panel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    /// Busy LED per barber (barber 1 first).
    pub barbers: [bool; BARBER_COUNT],
    /// Waiting-seat LEDs, filled from slot 0 upwards.
    pub seats: SeatStrip,
    /// Lit while the last arrival was turned away.
    pub no_entry: bool,
    /// Flips on every tick.
    pub wall_clock: bool,
}

impl Indicators {
    pub fn project(shop: &Shop) -> Self {
        Self {
            barbers: core::array::from_fn(|i| shop.barber(i).is_busy_lit()),
            seats: shop.room().render_indicator(),
            no_entry: shop.no_entry(),
            wall_clock: shop.ticks() % 2 == 1,
        }
    }

    /// Number of lit seat LEDs.
    pub fn seats_lit(&self) -> usize {
        self.seats.iter().filter(|on| **on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::NullSink;
    use crate::config::ShopConfig;

    #[test]
    fn empty_shop_is_dark() {
        let shop = Shop::new(&ShopConfig::default());
        let ind = Indicators::project(&shop);
        assert_eq!(ind.barbers, [false; 3]);
        assert_eq!(ind.seats_lit(), 0);
        assert_eq!(ind.seats.len(), 8);
        assert!(!ind.no_entry);
        assert!(!ind.wall_clock);
    }

    #[test]
    fn wall_clock_toggles_each_tick() {
        let mut shop = Shop::new(&ShopConfig::default());
        let mut sink = NullSink;
        shop.tick(&mut sink);
        assert!(Indicators::project(&shop).wall_clock);
        shop.tick(&mut sink);
        assert!(!Indicators::project(&shop).wall_clock);
    }

    #[test]
    fn busy_barber_and_parent_seat_show() {
        let mut shop = Shop::new(&ShopConfig::default());
        let mut sink = NullSink;
        shop.child_arrival(&mut sink);
        let ind = Indicators::project(&shop);
        assert_eq!(ind.barbers, [false, false, true]);
        assert_eq!(ind.seats_lit(), 1);
    }
}
