#![doc(test(attr(deny(warnings))))]

//! Presupuesto Core consolidates hierarchical budget datasets, redistributes
//! shared overhead across operating business units, and projects
//! profit-and-loss variance rows for dashboard charts and reports.

pub mod domain;
pub mod engine;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Presupuesto Core tracing initialized.");
    });
}
