//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the shop through the
//! service layer against mock adapters.  All tests run on the host with
//! no real hardware required.

mod mock_hw;
mod scenario_tests;
mod signal_flow_tests;
