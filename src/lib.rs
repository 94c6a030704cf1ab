#![doc(test(attr(deny(warnings))))]

//! Agenda Core offers the appointment-booking primitives of a real-estate
//! agency: typed appointment records, field validation, the multi-step
//! booking wizard, and snapshot persistence.

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Agenda Core tracing initialized.");
    });
}
