#![doc(test(attr(deny(warnings))))]

//! Cycle Picker computes billing cycles (the 5th of one month through the 4th
//! of the next), classifies selected ranges, and renders the picker's trigger
//! text and presets for a host UI or the bundled CLI.

pub mod cli;
pub mod clock;
pub mod config;
pub mod cycle;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cycle Picker tracing initialized.");
    });
}
