#![doc(test(attr(deny(warnings))))]

//! Fund Core ties the growfund domain, services, and storage crates
//! together behind a repository facade and an interactive CLI shell.

pub mod cli;
pub mod config;
pub mod core;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fund_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Fund Core tracing initialized.");
    });
}
