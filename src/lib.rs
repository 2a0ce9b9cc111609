#![doc(test(attr(deny(warnings))))]

//! Money Magnet keeps a personal finance ledger: transactions, budgets,
//! savings goals, investments and bills, persisted as a single snapshot.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, using `directive` when `RUST_LOG` is unset.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Money Magnet tracing initialized.");
    });
}
