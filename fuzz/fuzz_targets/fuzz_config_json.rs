//! Fuzz target: `ShopConfig::from_json`
//!
//! Arbitrary bytes must either be rejected or produce a config that
//! passes validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use barbershop::config::ShopConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ShopConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!((1..=8).contains(&config.capacity()));
    }
});
