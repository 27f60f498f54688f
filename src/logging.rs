// SPDX-License-Identifier: MIT
//
// Diagnostic logging.
//
// Logs go to stderr so they never mix with the rendered text on stdout.
// Filtering follows RUST_LOG and defaults to warnings only:
//
//   RUST_LOG=debug                      every edit the engine applies
//   RUST_LOG=mpedit_core::engine=debug  just the coordinator
//   RUST_LOG=mpedit_core=trace          also each classifier pass

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, before the engine does any
/// work.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .init();
}
