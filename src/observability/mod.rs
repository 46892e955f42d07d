//! Tracing initialization.
//!
//! The crate instruments its operations with `tracing` spans and events
//! throughout (query runs, store operations, load tickets, exports). Hosts
//! that already own a subscriber can ignore this module; for everything else
//! [`init_tracing`] installs a formatted subscriber with an env-filter
//! directive taken from the application [`Config`](crate::Config).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The `filter` string uses the standard env-filter syntax (e.g. `"info"`,
/// `"invopak=debug"`). Idempotent: only the first successful call takes
/// effect, later calls are silently ignored, so library consumers and tests
/// can call it freely.
pub fn init_tracing(filter: &str) {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer());

    let _ = subscriber.try_init();
}
